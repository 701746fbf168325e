//! 商品写真OCR・商品インポート表マージ
//!
//! - `extractor`: 写真フォルダをOCRして `FileName` / `ExtractedText` 表を作る
//! - `matcher`: OCR結果を商品テンプレートに正規化ファイル名で結合する

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod ocr;
pub mod scanner;
pub mod table;
