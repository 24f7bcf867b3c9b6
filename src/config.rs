use crate::error::{Result, TranslatorError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 保存先ルートを上書きする環境変数
pub const ROOT_ENV_VAR: &str = "COMIC_TRANSLATOR_ROOT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// グループディレクトリを置くルート
    pub storage_root: PathBuf,
    /// アップロード1ファイルあたりの上限
    pub max_upload_bytes: u64,
    /// 更新履歴ファイル
    pub changelog_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("uploads"),
            max_upload_bytes: 100 * 1024 * 1024,
            changelog_file: PathBuf::from("changelog.txt"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
            if !root.trim().is_empty() {
                config.storage_root = PathBuf::from(root);
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TranslatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("comic-translator").join("config.json"))
    }

    pub fn set_storage_root(&mut self, root: PathBuf) -> Result<()> {
        if root.as_os_str().is_empty() {
            return Err(TranslatorError::Config("保存先が空です".into()));
        }
        self.storage_root = root;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_root, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
        assert_eq!(config.changelog_file, PathBuf::from("changelog.txt"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"storage_root":"/srv/comics"}"#).unwrap();
        assert_eq!(config.storage_root, PathBuf::from("/srv/comics"));
        assert_eq!(config.max_upload_bytes, Config::default().max_upload_bytes);
    }
}
