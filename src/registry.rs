//! グループレジストリ
//!
//! グループ名 → GroupStore の対応を保持し、作成・名前変更・削除で
//! メモリとディスク（グループディレクトリ）を一致させる。
//!
//! ## ロック方針
//!
//! レジストリ全体で1つの RwLock を使う。
//! - 作成/名前変更/削除: 書き込みロックを保持したまま
//!   存在確認 → ディレクトリ操作 → マップ更新 を行う
//! - 領域の取得/保存: 読み込みロックを保持したまま GroupStore を操作する
//!   （保存中のグループが途中で消えたり改名されたりしない）
//!
//! 呼び出し側は GroupStore への参照を保持せず、毎回グループ名で操作する。

use crate::error::{Result, TranslatorError};
use crate::naming::validate_name;
use crate::store::{GroupStore, LoadStatus};
use comic_translator_common::{format_all, format_group, AnnotationArea, AnnotationSet};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use walkdir::WalkDir;

pub struct GroupRegistry {
    root: PathBuf,
    pub(crate) groups: RwLock<HashMap<String, GroupStore>>,
}

impl GroupRegistry {
    /// ストレージルートを走査して全グループを読み込む
    ///
    /// 個別グループの読み込み失敗はログに残して空で開始する。
    pub async fn load_all(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        let mut groups = HashMap::new();
        let scan_root = root.clone();
        for name in run_blocking(move || scan_group_dirs(&scan_root)).await? {
            let store = GroupStore::new(root.join(&name));
            match store.load().await {
                LoadStatus::Loaded(count) => {
                    log::info!("グループ読み込み: {} ({}ファイル)", name, count)
                }
                LoadStatus::Missing => log::info!("グループ読み込み: {} (サイドカーなし)", name),
                LoadStatus::Malformed(_) | LoadStatus::Unreadable(_) => {}
            }
            groups.insert(name, store);
        }

        log::info!("{}グループを検出: {}", groups.len(), root.display());

        Ok(Self {
            root,
            groups: RwLock::new(groups),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 検証済みのグループディレクトリパス
    pub fn group_dir(&self, group: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_name(group)?))
    }

    /// 現在のグループ一覧（ディレクトリの内容）
    pub async fn list_groups(&self) -> Result<BTreeSet<String>> {
        let _groups = self.groups.read().await;
        let root = self.root.clone();
        let names = run_blocking(move || scan_group_dirs(&root)).await?;
        Ok(names.into_iter().collect())
    }

    pub async fn contains(&self, group: &str) -> bool {
        self.groups.read().await.contains_key(group)
    }

    /// グループを新規作成
    pub async fn create_group(&self, name: &str) -> Result<()> {
        let dir = self.group_dir(name)?;
        let mut groups = self.groups.write().await;

        if groups.contains_key(name) || path_exists(&dir).await? {
            return Err(TranslatorError::AlreadyExists(name.to_string()));
        }

        fs::create_dir(&dir).await?;

        let store = GroupStore::new(&dir);
        if let Err(e) = store.save().await {
            // ディレクトリだけ残らないように戻す
            let _ = fs::remove_dir_all(&dir).await;
            return Err(e);
        }

        groups.insert(name.to_string(), store);
        log::info!("グループ作成: {}", name);
        Ok(())
    }

    /// グループを削除（ディレクトリごと）
    ///
    /// ディレクトリの削除が完了してからレジストリから外す。
    pub async fn delete_group(&self, name: &str) -> Result<()> {
        self.delete_group_with(name, remove_entry).await
    }

    async fn delete_group_with(&self, name: &str, remove: RemoveEntry) -> Result<()> {
        let dir = self.group_dir(name)?;
        let mut groups = self.groups.write().await;

        let on_disk = path_exists(&dir).await?;
        if !on_disk && !groups.contains_key(name) {
            return Err(TranslatorError::NotFound(name.to_string()));
        }

        if on_disk {
            let target = dir.clone();
            if let Err(e) = run_blocking(move || remove_tree(&target, remove)).await {
                log::error!("グループ削除に失敗: {} ({})", name, e);
                return Err(e);
            }
        }

        groups.remove(name);
        log::info!("グループ削除: {}", name);
        Ok(())
    }

    /// グループ名を変更
    ///
    /// ディレクトリを移動し、メモリ上のデータを新しい名前で保存し直す。
    pub async fn rename_group(&self, old_name: &str, new_name: &str) -> Result<()> {
        let new_dir = self.group_dir(new_name)?;
        let mut groups = self.groups.write().await;

        let old_dir = self.root.join(old_name);
        let old_registered = groups.contains_key(old_name);
        if validate_name(old_name).is_err()
            || (!old_registered && !path_exists(&old_dir).await?)
        {
            return Err(TranslatorError::NotFound(old_name.to_string()));
        }

        if groups.contains_key(new_name) || path_exists(&new_dir).await? {
            return Err(TranslatorError::AlreadyExists(new_name.to_string()));
        }

        fs::rename(&old_dir, &new_dir).await?;

        let store = match groups.remove(old_name) {
            Some(store) => store.relocate(&new_dir),
            None => GroupStore::open(&new_dir).await,
        };

        // 移動後のディレクトリのサイドカーを現在のデータに揃える
        let saved = store.save().await;
        groups.insert(new_name.to_string(), store);
        saved?;

        log::info!("グループ名変更: {} -> {}", old_name, new_name);
        Ok(())
    }

    /// ファイルの領域リスト（未知のグループ/ファイルなら空）
    pub async fn get_areas(&self, group: &str, file_name: &str) -> Vec<AnnotationArea> {
        let groups = self.groups.read().await;
        match groups.get(group) {
            Some(store) => store.get(file_name).await,
            None => Vec::new(),
        }
    }

    /// ファイルの領域リストを置き換えて保存
    ///
    /// 未登録のグループなら、その場でディレクトリとストアを作成する。
    pub async fn set_areas(
        &self,
        group: &str,
        file_name: &str,
        areas: Vec<AnnotationArea>,
    ) -> Result<()> {
        let dir = self.group_dir(group)?;
        validate_name(file_name)?;

        {
            let groups = self.groups.read().await;
            if let Some(store) = groups.get(group) {
                return store.set(file_name, areas).await;
            }
        }

        let mut groups = self.groups.write().await;
        if !groups.contains_key(group) {
            fs::create_dir_all(&dir).await?;
            let store = GroupStore::open(&dir).await;
            groups.insert(group.to_string(), store);
            log::info!("グループを自動作成: {}", group);
        }

        let groups = groups.downgrade();
        match groups.get(group) {
            Some(store) => store.set(file_name, areas).await,
            None => Err(TranslatorError::NotFound(group.to_string())),
        }
    }

    /// グループ全体のコピー（エクスポート用）
    pub async fn snapshot(&self, group: &str) -> Option<AnnotationSet> {
        let groups = self.groups.read().await;
        match groups.get(group) {
            Some(store) => Some(store.snapshot().await),
            None => None,
        }
    }

    /// 1グループ分の翻訳レポート
    pub async fn export_group(&self, group: &str) -> Result<String> {
        let set = self
            .snapshot(group)
            .await
            .ok_or_else(|| TranslatorError::NotFound(group.to_string()))?;
        Ok(format_group(group, &set))
    }

    /// 全グループの翻訳レポート（グループ名順）
    pub async fn export_all(&self) -> String {
        let groups = self.groups.read().await;

        let mut names: Vec<&String> = groups.keys().collect();
        names.sort();

        let mut sets = Vec::with_capacity(names.len());
        for name in names {
            sets.push((name.as_str(), groups[name].snapshot().await));
        }

        format_all(sets.iter().map(|(name, set)| (*name, set)))
    }
}

/// ルート直下のディレクトリ名（名前順）
///
/// パスとして使えない名前のディレクトリは対象外。
fn scan_group_dirs(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("ディレクトリを読み取れません: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) if validate_name(name).is_ok() => names.push(name.to_string()),
            _ => log::warn!("グループ名として使えないディレクトリを無視: {}", entry.path().display()),
        }
    }

    names.sort();
    Ok(names)
}

/// 1エントリを削除する関数（ディレクトリならtrue）
type RemoveEntry = fn(&Path, bool) -> std::io::Result<()>;

fn remove_entry(path: &Path, is_dir: bool) -> std::io::Result<()> {
    if is_dir {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// ディレクトリを中身から順に削除する
///
/// 途中で失敗したらその時点のエラーを返す（握りつぶさない）。
fn remove_tree(dir: &Path, remove: RemoveEntry) -> Result<()> {
    for entry in WalkDir::new(dir).contents_first(true) {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("ディレクトリ走査に失敗"))
        })?;

        remove(entry.path(), entry.file_type().is_dir())?;
    }
    Ok(())
}

/// ブロッキングなファイル操作を専用スレッドで実行する
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::other(e).into()),
    }
}

async fn path_exists(path: &Path) -> Result<bool> {
    Ok(fs::try_exists(path).await?)
}
