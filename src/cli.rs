use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comic-translator")]
#[command(about = "漫画翻訳アノテーション管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 保存先ルート（設定ファイルより優先）
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// グループ一覧を表示
    List,

    /// グループを作成
    Create {
        /// グループ名
        #[arg(required = true)]
        name: String,
    },

    /// グループを削除（画像・翻訳データごと）
    Delete {
        /// グループ名
        #[arg(required = true)]
        name: String,
    },

    /// グループ名を変更
    Rename {
        /// 現在の名前
        #[arg(required = true)]
        old_name: String,

        /// 新しい名前
        #[arg(required = true)]
        new_name: String,
    },

    /// グループ内のファイル一覧
    Files {
        /// グループ名
        #[arg(required = true)]
        group: String,
    },

    /// 画像ファイルをグループに追加
    Upload {
        /// グループ名
        #[arg(required = true)]
        group: String,

        /// 追加するファイル
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// ファイルの翻訳領域をJSONで表示
    Show {
        /// グループ名
        #[arg(required = true)]
        group: String,

        /// 画像ファイル名
        #[arg(required = true)]
        file: String,
    },

    /// ファイルの翻訳領域を置き換え（JSON配列）
    Set {
        /// グループ名
        #[arg(required = true)]
        group: String,

        /// 画像ファイル名
        #[arg(required = true)]
        file: String,

        /// 領域JSONファイル（`-` で標準入力）
        #[arg(required = true)]
        input: String,
    },

    /// 翻訳テキストを出力
    Export {
        /// グループ名（省略時は全グループ）
        group: Option<String>,

        /// 出力ファイル/ディレクトリ（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 更新履歴を表示
    Changelog,

    /// 設定を表示/編集
    Config {
        /// 保存先ルートを設定
        #[arg(long)]
        set_root: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
