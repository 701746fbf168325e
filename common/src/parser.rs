//! OCRテキストパーサー
//!
//! 値札・タグのOCRテキストから価格とサイズを抽出する。
//! OCRテキストはノイズが多いため、候補が複数あっても最初の1件のみ返す。

use regex::Regex;

lazy_static::lazy_static! {
    // 通貨付き: "rs 1500", "mur-2300", "rs: 999"
    static ref CURRENCY_PRICE_RE: Regex =
        Regex::new(r"(?:rs|mur)\s*[:\-]?\s*([0-9]{3,6})").unwrap();
    // 通貨なしの3〜6桁
    static ref BARE_PRICE_RE: Regex = Regex::new(r"\b([0-9]{3,6})\b").unwrap();
    // 長いトークンを先に並べる（xxxl が xl / l に分割されないように）
    static ref SIZE_TOKEN_RE: Regex =
        Regex::new(r"\b(?:xxxl|xxl|xl|xs|3xl|4xl|5xl|6xl|l|m|s)\b").unwrap();
}

const FREE_SIZE: &str = "Free Size";

/// 価格を抽出
///
/// 抽出優先順位:
/// 1. 通貨表記（rs / mur）に続く3〜6桁
/// 2. 単独の3〜6桁の数値（最初の1件）
/// 3. なし
///
/// # Examples
/// ```
/// use product_ocr_common::parse_price;
///
/// assert_eq!(parse_price("Rs: 1500 only"), Some(1500));
/// assert_eq!(parse_price("MUR-2,300"), Some(2300));
/// assert_eq!(parse_price("no numbers here"), None);
/// ```
pub fn parse_price(text: &str) -> Option<i64> {
    let t = text.to_lowercase().replace(',', "");

    if let Some(cap) = CURRENCY_PRICE_RE.captures(&t) {
        return cap[1].parse().ok();
    }

    BARE_PRICE_RE
        .captures(&t)
        .and_then(|cap| cap[1].parse().ok())
}

/// サイズを抽出
///
/// "free size" を含む場合は他のトークンより優先して `"Free Size"` を返す。
/// それ以外はサイズトークンを大文字化し、出現順を保って重複除去、`", "` で連結する。
pub fn parse_size(text: &str) -> Option<String> {
    let t = text.to_lowercase();
    if t.contains("free size") {
        return Some(FREE_SIZE.to_string());
    }

    let mut tokens: Vec<String> = Vec::new();
    for m in SIZE_TOKEN_RE.find_iter(&t) {
        let token = m.as_str().to_uppercase();
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(", "))
    }
}
