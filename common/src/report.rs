//! 翻訳テキストのエクスポート
//!
//! ダウンロード用のプレーンテキストレポートを生成する。
//! 出力順は渡されたデータの順序そのまま（ファイルは登録順、領域はリスト順）。

use crate::types::{AnnotationArea, AnnotationSet};
use std::fmt::Write;

/// ダウンロード時の添付ファイル名
pub const EXPORT_FILE_NAME: &str = "translations.txt";

/// ダウンロード時のContent-Type
pub const EXPORT_CONTENT_TYPE: &str = "text/plain";

/// 1グループ分のレポート
pub fn format_group(group: &str, set: &AnnotationSet) -> String {
    let mut output = String::new();
    write_group(&mut output, group, set);
    output
}

/// 全グループ分のレポート（渡された順に連結）
pub fn format_all<'a, I>(groups: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a AnnotationSet)>,
{
    let mut output = String::new();
    for (group, set) in groups {
        write_group(&mut output, group, set);
    }
    output
}

fn write_group(output: &mut String, group: &str, set: &AnnotationSet) {
    // Stringへのwrite!は失敗しない
    let _ = writeln!(output, "=== 分组 [{}] ===", group);
    for (file_name, areas) in set.iter() {
        let _ = writeln!(output, "--- 文件: {} ---", file_name);
        write_areas(output, areas);
    }
}

fn write_areas(output: &mut String, areas: &[AnnotationArea]) {
    for (i, area) in areas.iter().enumerate() {
        let _ = writeln!(
            output,
            "区域 {} [位置: {}px, {}px 尺寸: {}x{}]",
            i + 1,
            area.x,
            area.y,
            area.width,
            area.height
        );
        let _ = writeln!(output, "原文: {}", area.original);
        let _ = writeln!(output, "翻译: {}\n", area.translation);
    }
}
