//! OCR結果の型定義
//!
//! 抽出(Extractor)とマージ(Matcher)で共有される型:
//! - ImageRecord: 1画像分のOCR結果
//! - ParsedFields: OCRテキストから解析した価格・サイズ

use serde::{Deserialize, Serialize};

/// 1画像分のOCR結果
///
/// 出力表の列名 (`FileName`, `ExtractedText`) に合わせてシリアライズする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRecord {
    pub file_name: String,

    #[serde(default)]
    pub extracted_text: String,
}

impl ImageRecord {
    /// OCRの生テキストから作成（前後の空白は除去）
    pub fn new(file_name: impl Into<String>, raw_text: &str) -> Self {
        Self {
            file_name: file_name.into(),
            extracted_text: raw_text.trim().to_string(),
        }
    }
}

/// OCRテキストから解析した値
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedFields {
    /// 価格（通貨記号付きを優先）
    pub parsed_price: Option<i64>,
    /// サイズ（"S, M, L" / "Free Size"）
    pub parsed_size: Option<String>,
}

impl ParsedFields {
    pub fn from_text(text: &str) -> Self {
        Self {
            parsed_price: crate::parser::parse_price(text),
            parsed_size: crate::parser::parse_size(text),
        }
    }
}
