use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "product-ocr")]
#[command(about = "商品写真OCR・商品インポート表マージツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/product-ocr/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真フォルダをOCRして結果表を出力
    Extract {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力ファイル .xlsx/.csv/.json（デフォルト: 写真フォルダ/ocr_results.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        ocr: OcrArgs,
    },

    /// OCR結果表を商品テンプレートにマージ
    Merge {
        /// OCR結果表 (.xlsx/.csv/.json)
        #[arg(long, required = true)]
        ocr: PathBuf,

        /// 商品インポートテンプレート (.csv)
        #[arg(short, long, required = true)]
        template: PathBuf,

        #[command(flatten)]
        outputs: MergeOutputArgs,
    },

    /// OCR抽出からマージまで一括実行
    Run {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 商品インポートテンプレート (.csv)
        #[arg(short, long, required = true)]
        template: PathBuf,

        /// OCR結果表の出力先（デフォルト: 写真フォルダ/ocr_results.xlsx）
        #[arg(long)]
        ocr_output: Option<PathBuf>,

        #[command(flatten)]
        outputs: MergeOutputArgs,

        #[command(flatten)]
        ocr: OcrArgs,
    },

    /// 設定を表示/編集
    Config {
        /// tesseract 実行ファイルを設定
        #[arg(long)]
        set_tesseract_cmd: Option<String>,

        /// OCR言語を設定 (例: eng, eng+fra)
        #[arg(long)]
        set_lang: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// OCRエンジンの一時的な上書き
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OcrArgs {
    /// tesseract 実行ファイル（設定ファイルより優先）
    #[arg(long)]
    pub tesseract: Option<String>,

    /// OCR言語（設定ファイルより優先）
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// マージ結果の出力先
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MergeOutputArgs {
    /// マージ結果CSV（デフォルト: テンプレートと同じフォルダ/product-import-merged.csv）
    #[arg(long)]
    pub out_csv: Option<PathBuf>,

    /// マージ結果Excel（デフォルト: テンプレートと同じフォルダ/product-import-merged.xlsx）
    #[arg(long)]
    pub out_xlsx: Option<PathBuf>,
}
