//! グループディレクトリへの画像ファイル配置
//!
//! アップロードされたファイルの保存と一覧。パスはレジストリの
//! 名前検証を通してのみ組み立て、グループ構造の変更とは
//! レジストリのロックで排他する。サイドカーには触れない。

use crate::error::{Result, TranslatorError};
use crate::naming::{validate_name, SIDECAR_FILE_NAME, SIDECAR_TEMP_NAME};
use crate::registry::GroupRegistry;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// 送信されたファイル名から最後の要素だけを取り出す
///
/// ブラウザによってはクライアント側のフルパスが送られてくる。
pub fn submitted_file_name(submitted: &str) -> &str {
    submitted
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(submitted)
}

impl GroupRegistry {
    /// ファイルをグループに保存（同名は上書き）
    pub async fn store_file(
        &self,
        group: &str,
        submitted_name: &str,
        bytes: &[u8],
        max_bytes: u64,
    ) -> Result<PathBuf> {
        let file_name = validate_name(submitted_file_name(submitted_name))?.to_string();
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(TranslatorError::FileTooLarge {
                name: file_name,
                size,
                limit: max_bytes,
            });
        }

        let dir = self.group_dir(group)?;
        let groups = self.groups.read().await;
        if !groups.contains_key(group) {
            return Err(TranslatorError::NotFound(group.to_string()));
        }

        let path = dir.join(&file_name);
        fs::write(&path, bytes).await?;
        log::info!("ファイル保存: {}/{} ({} bytes)", group, file_name, size);
        Ok(path)
    }

    /// ローカルファイルをグループに取り込む
    pub async fn import_file(&self, group: &str, source: &Path, max_bytes: u64) -> Result<PathBuf> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TranslatorError::InvalidName(source.display().to_string()))?;

        let meta = fs::metadata(source).await?;
        if meta.len() > max_bytes {
            return Err(TranslatorError::FileTooLarge {
                name: name.to_string(),
                size: meta.len(),
                limit: max_bytes,
            });
        }

        let bytes = fs::read(source).await?;
        self.store_file(group, name, &bytes, max_bytes).await
    }

    /// グループ内の画像ファイル一覧（名前順、サイドカーを除く）
    pub async fn list_files(&self, group: &str) -> Result<Vec<String>> {
        let dir = self.group_dir(group)?;
        let groups = self.groups.read().await;
        if !groups.contains_key(group) {
            return Err(TranslatorError::NotFound(group.to_string()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)  // 直下のみ
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name == SIDECAR_FILE_NAME || name == SIDECAR_TEMP_NAME {
                continue;
            }
            files.push(name);
        }

        files.sort();
        Ok(files)
    }
}
