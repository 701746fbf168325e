use crate::ocr::OcrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrMergeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("必須列がありません: OCR結果表には '{0}' 列が必要です")]
    MissingColumn(String),

    #[error("結合キー列がありません (no join key available): SKU系 (sku/product_code/code/id) またはファイル名系 (file/image を含む) の列が必要です")]
    NoJoinKey,

    #[error("未対応の表形式: {0}")]
    UnsupportedFormat(String),

    #[error("表の読み込みエラー: {0}")]
    TableRead(String),

    #[error("OCRエラー: {0}")]
    Ocr(#[from] OcrError),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OcrMergeError>;
