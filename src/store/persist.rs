//! サイドカーファイルの読み書き
//!
//! 書き込みは一時ファイル → rename で置き換え、最後にディレクトリをsyncする。
//! 途中で失敗しても既存のサイドカーは壊れない。

use crate::error::Result;
use crate::naming::{SIDECAR_FILE_NAME, SIDECAR_TEMP_NAME};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// サイドカーを読み込む（存在しなければNone）
pub(crate) async fn read_sidecar(dir: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(dir.join(SIDECAR_FILE_NAME)).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// サイドカーをアトミックに書き込む
pub(crate) async fn write_sidecar(dir: &Path, contents: &str) -> Result<()> {
    let temp_path = dir.join(SIDECAR_TEMP_NAME);
    let target_path = dir.join(SIDECAR_FILE_NAME);

    let written: std::io::Result<()> = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, &target_path).await?;
        sync_dir(dir).await
    }
    .await;

    if let Err(e) = written {
        // 一時ファイルだけ片付ける（本体には触れない）
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    Ok(())
}

/// renameによるエントリ置換をディレクトリごと永続化する
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

// ディレクトリをファイルとして開けないプラットフォームでは省略
#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
