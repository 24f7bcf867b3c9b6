//! サイドカーJSONのエンコード/デコード
//!
//! フォーマット（1グループ1ファイル）:
//!
//! ```json
//! {
//!   "p1.png": [
//!     { "x": 10, "y": 20, "width": 30, "height": 40, "original": "你好", "translation": "Hello" }
//!   ]
//! }
//! ```
//!
//! キー順はファイルの登録順、領域のフィールド順は固定。
//! 読み込み時は未知のフィールドを無視し、負の幅/高さは正規化する
//! （旧データや上・左方向のドラッグで生じる）。

use crate::error::{Error, Result};
use crate::types::{AnnotationArea, AnnotationSet};
use serde_json::{json, Map, Value};

/// AnnotationSetをサイドカー形式のJSON文字列にする
///
/// 同じ内容なら常に同じバイト列になる。
pub fn encode_set(set: &AnnotationSet) -> Result<String> {
    let mut root = Map::new();
    for (file_name, areas) in set.iter() {
        root.insert(file_name.to_string(), areas_to_value(areas));
    }
    Ok(serde_json::to_string_pretty(&Value::Object(root))?)
}

/// 領域リストをJSON配列文字列にする（編集画面に渡す形式）
pub fn encode_areas(areas: &[AnnotationArea]) -> Result<String> {
    Ok(serde_json::to_string(&areas_to_value(areas))?)
}

/// サイドカーJSONをデコード
///
/// 空ファイル（新規作成直後のグループ）は空のセットとして扱う。
pub fn decode_set(text: &str) -> Result<AnnotationSet> {
    let mut set = AnnotationSet::new();
    if text.trim().is_empty() {
        return Ok(set);
    }

    let value: Value = serde_json::from_str(text)?;
    let root = match value {
        Value::Object(root) => root,
        other => {
            return Err(Error::Malformed(format!(
                "トップレベルがオブジェクトではありません: {}",
                type_name(&other)
            )))
        }
    };

    for (file_name, areas) in root {
        let areas = areas_from_value(&areas)
            .map_err(|e| Error::Malformed(format!("{}: {}", file_name, e)))?;
        set.insert(file_name, areas);
    }

    Ok(set)
}

/// 保存リクエストのボディ（領域のJSON配列）をデコード
pub fn decode_areas(text: &str) -> Result<Vec<AnnotationArea>> {
    let value: Value = serde_json::from_str(text)?;
    areas_from_value(&value).map_err(Error::Malformed)
}

fn areas_to_value(areas: &[AnnotationArea]) -> Value {
    Value::Array(
        areas
            .iter()
            .map(|area| {
                json!({
                    "x": area.x,
                    "y": area.y,
                    "width": area.width,
                    "height": area.height,
                    "original": area.original,
                    "translation": area.translation,
                })
            })
            .collect(),
    )
}

fn areas_from_value(value: &Value) -> std::result::Result<Vec<AnnotationArea>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("配列ではありません: {}", type_name(value)))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| area_from_value(item).map_err(|e| format!("領域{}: {}", i + 1, e)))
        .collect()
}

fn area_from_value(value: &Value) -> std::result::Result<AnnotationArea, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("オブジェクトではありません: {}", type_name(value)))?;

    let (x, width) = normalize_span(coordinate(obj, "x")?, coordinate(obj, "width")?);
    let (y, height) = normalize_span(coordinate(obj, "y")?, coordinate(obj, "height")?);

    Ok(AnnotationArea {
        x,
        y,
        width,
        height,
        original: text_field(obj, "original")?,
        translation: text_field(obj, "translation")?,
    })
}

/// 座標値を取り出す
///
/// 欠落/nullは0。キャンバス由来の小数は四捨五入する。
fn coordinate(obj: &Map<String, Value>, key: &str) -> std::result::Result<i64, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                return Ok(v);
            }
            match n.as_f64() {
                // i64の範囲外は飽和する
                Some(f) if f.is_finite() => Ok(f.round() as i64),
                _ => Err(format!("{}が不正な値です: {}", key, n)),
            }
        }
        Some(other) => Err(format!("{}が数値ではありません: {}", key, type_name(other))),
    }
}

/// 始点と長さを正規化する
///
/// 上・左方向へドラッグした矩形は長さが負で保存されているので、
/// 始点をずらして長さを正にする。画像の外（負の座標）にはみ出た分は切り詰める。
fn normalize_span(start: i64, len: i64) -> (u32, u32) {
    let (mut start, mut len) = if len < 0 {
        (start.saturating_add(len), len.saturating_neg())
    } else {
        (start, len)
    };

    if start < 0 {
        len = len.saturating_add(start).max(0);
        start = 0;
    }

    (clamp_u32(start), clamp_u32(len))
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

fn text_field(obj: &Map<String, Value>, key: &str) -> std::result::Result<String, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("{}が文字列ではありません: {}", key, type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
