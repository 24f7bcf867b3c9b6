//! グループ単位のアノテーションストア
//!
//! ファイル名 → 領域リストをメモリに保持し、変更のたびに
//! グループディレクトリのサイドカーJSONへ保存する。
//!
//! - 書き込み（set/save/load）は1グループにつき同時に1つだけ
//! - 読み込み（get/snapshot）はロック中の途中状態を見ない
//! - 保存に失敗してもメモリ上の変更は巻き戻さない

mod persist;

use crate::error::Result;
use crate::naming::SIDECAR_FILE_NAME;
use comic_translator_common::{decode_set, encode_set, AnnotationArea, AnnotationSet};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// load()の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// 読み込み成功（ファイル数）
    Loaded(usize),
    /// サイドカーが存在しない
    Missing,
    /// JSONが壊れている
    Malformed(String),
    /// 読み込み自体に失敗
    Unreadable(String),
}

pub struct GroupStore {
    dir: PathBuf,
    data: RwLock<AnnotationSet>,
    /// set/save/loadを直列化する
    writer: Mutex<()>,
}

impl GroupStore {
    /// 空のストアを作成（ディスクには触れない）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_data(dir, AnnotationSet::new())
    }

    fn with_data(dir: impl Into<PathBuf>, data: AnnotationSet) -> Self {
        Self {
            dir: dir.into(),
            data: RwLock::new(data),
            writer: Mutex::new(()),
        }
    }

    /// ストアを作成してサイドカーを読み込む
    pub async fn open(dir: impl Into<PathBuf>) -> Self {
        let store = Self::new(dir);
        store.load().await;
        store
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sidecar_path(&self) -> PathBuf {
        self.dir.join(SIDECAR_FILE_NAME)
    }

    /// ファイルの領域リスト（未登録なら空）
    pub async fn get(&self, file_name: &str) -> Vec<AnnotationArea> {
        let data = self.data.read().await;
        data.get(file_name).map(<[_]>::to_vec).unwrap_or_default()
    }

    /// 全データのコピー
    pub async fn snapshot(&self) -> AnnotationSet {
        self.data.read().await.clone()
    }

    /// ファイルの領域リストを丸ごと置き換えて保存する
    ///
    /// 保存に失敗した場合もメモリ上の更新は残る。
    pub async fn set(&self, file_name: &str, areas: Vec<AnnotationArea>) -> Result<()> {
        let _guard = self.writer.lock().await;
        {
            let mut data = self.data.write().await;
            data.insert(file_name, areas);
        }
        self.persist().await
    }

    /// サイドカーを読み込み、メモリ上のデータを置き換える
    ///
    /// ファイルが無い/壊れている場合は空のデータで開始する（エラーにしない）。
    pub async fn load(&self) -> LoadStatus {
        let _guard = self.writer.lock().await;

        let (set, status) = match persist::read_sidecar(&self.dir).await {
            Ok(None) => (AnnotationSet::new(), LoadStatus::Missing),
            Ok(Some(text)) => match decode_set(&text) {
                Ok(set) => {
                    let count = set.len();
                    (set, LoadStatus::Loaded(count))
                }
                Err(e) => {
                    log::warn!(
                        "サイドカーが不正なため空で開始します: {} ({})",
                        self.sidecar_path().display(),
                        e
                    );
                    (AnnotationSet::new(), LoadStatus::Malformed(e.to_string()))
                }
            },
            Err(e) => {
                log::warn!(
                    "サイドカーを読み込めないため空で開始します: {} ({})",
                    self.sidecar_path().display(),
                    e
                );
                (AnnotationSet::new(), LoadStatus::Unreadable(e.to_string()))
            }
        };

        *self.data.write().await = set;
        status
    }

    /// 現在のデータをサイドカーへ保存
    pub async fn save(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.persist().await
    }

    /// 別ディレクトリに付け替える（データはそのまま）
    pub fn relocate(self, dir: impl Into<PathBuf>) -> Self {
        Self::with_data(dir, self.data.into_inner())
    }

    // writerロックを保持した状態で呼ぶこと
    async fn persist(&self) -> Result<()> {
        let json = {
            let data = self.data.read().await;
            encode_set(&data)?
        };

        if let Err(e) = persist::write_sidecar(&self.dir, &json).await {
            log::error!("保存に失敗: {} ({})", self.sidecar_path().display(), e);
            return Err(e);
        }

        log::debug!("保存完了: {} ({} bytes)", self.sidecar_path().display(), json.len());
        Ok(())
    }
}
