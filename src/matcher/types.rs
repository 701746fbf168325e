use crate::table::Cell;
use std::fmt;

/// OCR結果表の1行（結合キーと解析値を付与済み）
#[derive(Debug, Clone, PartialEq)]
pub struct OcrRow {
    pub file_name: String,
    pub extracted_text: Cell,
    pub parsed_price: Option<i64>,
    pub parsed_size: Option<String>,
    pub stem: String,
    pub stem_trimmed: String,
}

/// テンプレート側の結合キー列
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKey {
    /// SKU系列（値を小文字化してそのままstemにする）
    Sku { column: String },
    /// ファイル名系列（ファイル名を正規化してstemにする）
    FileName { column: String },
}

impl JoinKey {
    pub fn column(&self) -> &str {
        match self {
            JoinKey::Sku { column } | JoinKey::FileName { column } => column,
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKey::Sku { column } => write!(f, "SKU列 '{}'", column),
            JoinKey::FileName { column } => write!(f, "ファイル名列 '{}'", column),
        }
    }
}

/// マージ結果の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub join_key: JoinKey,
    pub template_rows: usize,
    pub ocr_rows: usize,
    pub matched_rows: usize,
}

impl MergeSummary {
    pub fn unmatched_rows(&self) -> usize {
        self.template_rows - self.matched_rows
    }
}
