//! Product OCR Common Library
//!
//! 抽出(Extractor)とマージ(Matcher)で共有される型と純粋関数（I/Oなし）

pub mod types;
pub mod normalize;
pub mod parser;

pub use types::{ImageRecord, ParsedFields};
pub use normalize::{normalize_filename, trim_variant, join_keys_for_filename};
pub use parser::{parse_price, parse_size};
