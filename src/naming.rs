//! グループ名・ファイル名の検証
//!
//! ストレージ上のパスはすべてここを通った名前から組み立てる。
//! パストラバーサル対策はこの検証のみに依存する。

use crate::error::{Result, TranslatorError};
use regex::Regex;

/// グループごとのサイドカーファイル名
pub const SIDECAR_FILE_NAME: &str = "translations.json";

/// アトミック保存用の一時ファイル名
pub const SIDECAR_TEMP_NAME: &str = "translations.json.tmp";

const MAX_NAME_BYTES: usize = 255;

lazy_static::lazy_static! {
    // パス区切り・予約文字・制御文字
    static ref FORBIDDEN_RE: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).unwrap();
}

/// パスの1要素として使える名前か検証する
pub fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(TranslatorError::InvalidName("名前が空です".into()));
    }
    if name == "." || name == ".." {
        return Err(TranslatorError::InvalidName(name.to_string()));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(TranslatorError::InvalidName(format!(
            "名前が長すぎます（{} bytes）",
            name.len()
        )));
    }
    if FORBIDDEN_RE.is_match(name) {
        return Err(TranslatorError::InvalidName(format!(
            "使用できない文字が含まれています: {}",
            name.escape_debug()
        )));
    }
    if name == SIDECAR_FILE_NAME || name == SIDECAR_TEMP_NAME {
        return Err(TranslatorError::InvalidName(format!("予約済みの名前です: {}", name)));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_name(name: &str) -> bool {
        validate_name(name).is_ok()
    }

    #[test]
    fn test_valid_names() {
        for name in ["ch1", "第1话", "chapter 1", "p1.png", "a-b_c", ".hidden"] {
            assert!(is_valid_name(name), "有効なはず: {}", name);
        }
    }

    #[test]
    fn test_empty_and_dot_names() {
        for name in ["", "   ", ".", ".."] {
            let err = validate_name(name).unwrap_err();
            assert!(matches!(err, TranslatorError::InvalidName(_)), "{:?}", name);
        }
    }

    #[test]
    fn test_path_separators_rejected() {
        for name in ["a/b", "..\\x", "../etc", "c:", "what?", "a*b", "x<y>", "p|q", "say\"hi\""] {
            assert!(!is_valid_name(name), "無効なはず: {}", name);
        }
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(!is_valid_name("a\nb"));
        assert!(!is_valid_name("a\0b"));
    }

    #[test]
    fn test_reserved_sidecar_name() {
        assert!(!is_valid_name(SIDECAR_FILE_NAME));
        assert!(!is_valid_name(SIDECAR_TEMP_NAME));
    }

    #[test]
    fn test_too_long_name() {
        let name = "a".repeat(MAX_NAME_BYTES + 1);
        assert!(!is_valid_name(&name));
        assert!(is_valid_name(&"a".repeat(MAX_NAME_BYTES)));
    }
}
