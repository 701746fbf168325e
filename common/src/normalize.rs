//! ファイル名の正規化
//!
//! OCR結果表と商品テンプレートを結合するためのキーを作る。
//! - パス・拡張子を除去して小文字化（stem）
//! - 連番サフィックス（`-01`, ` (2)`）を除去（stem_trimmed）

use regex::Regex;

lazy_static::lazy_static! {
    // -01, -1（3桁以上は品番の一部とみなして残す）
    static ref HYPHEN_VARIANT_RE: Regex = Regex::new(r"-(\d{1,2})$").unwrap();
    // " (1)" のようなコピー連番
    static ref PAREN_VARIANT_RE: Regex = Regex::new(r"\s*\(\d+\)$").unwrap();
}

/// ファイル名を正規化して `(stem, base_name)` を返す
///
/// - 空文字・空白のみは `("", "")`
/// - `/` と `\` の両方をパス区切りとして最終要素を取る
/// - base_name は小文字化・前後空白除去済み
/// - stem は最後の `.` より前（先頭のドットは拡張子の開始とみなさない）
///
/// # Examples
/// ```
/// use product_ocr_common::normalize_filename;
///
/// let (stem, base) = normalize_filename(r"C:\photos\Dress-01.JPG");
/// assert_eq!(stem, "dress-01");
/// assert_eq!(base, "dress-01.jpg");
/// ```
pub fn normalize_filename(path: &str) -> (String, String) {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return (String::new(), String::new());
    }

    let segment = trimmed.rsplit(['/', '\\']).next().unwrap_or_default();
    let base_name = segment.trim().to_lowercase();
    let stem = split_stem(&base_name).to_string();

    (stem, base_name)
}

/// 拡張子を除いた部分を返す
fn split_stem(base_name: &str) -> &str {
    match base_name.rfind('.') {
        Some(idx) if base_name[..idx].chars().any(|c| c != '.') => &base_name[..idx],
        _ => base_name,
    }
}

/// 連番サフィックスを除去する
///
/// ハイフン連番 → 括弧連番の順にそれぞれ1回だけ置換する。
pub fn trim_variant(stem: &str) -> String {
    let without_hyphen = HYPHEN_VARIANT_RE.replace(stem, "");
    PAREN_VARIANT_RE.replace(&without_hyphen, "").into_owned()
}

/// ファイル名から (stem, stem_trimmed) を求める
///
/// stem_trimmed がOCR結果とテンプレートの結合キーになる。
pub fn join_keys_for_filename(path: &str) -> (String, String) {
    let (stem, _) = normalize_filename(path);
    let trimmed = trim_variant(&stem);
    (stem, trimmed)
}
