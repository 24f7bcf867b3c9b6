//! 更新履歴の読み込み

use std::path::Path;

/// 更新履歴が読めない場合の表示
pub const CHANGELOG_FALLBACK: &str = "暂无更新日志";

/// 更新履歴ファイルを読み込む（読めなければ既定の文言）
pub fn load_changelog(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("更新履歴の読み込みに失敗: {} ({})", path.display(), e);
            CHANGELOG_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_changelog() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("changelog.txt");
        std::fs::write(&path, "v1.1 分组重命名\nv1.0 初版\n").unwrap();

        assert_eq!(load_changelog(&path), "v1.1 分组重命名\nv1.0 初版\n");
    }

    #[test]
    fn test_missing_changelog_fallback() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert_eq!(load_changelog(&dir.path().join("none.txt")), CHANGELOG_FALLBACK);
    }
}
