use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("不正な名前です: {0}")]
    InvalidName(String),

    #[error("既に存在します: {0}")]
    AlreadyExists(String),

    #[error("グループが見つかりません: {0}")]
    NotFound(String),

    #[error("ファイルサイズが上限を超えています: {name} ({size} bytes > {limit} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] comic_translator_common::Error),
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
