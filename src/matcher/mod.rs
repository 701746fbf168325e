//! OCR結果と商品テンプレートの照合・マージ
//!
//! 共通キーがない2つの表を、正規化したファイル名（連番除去済み）で結合する。
//!
//! ## 処理フロー
//! 1. OCR結果表の各行に stem / stem_trimmed / 価格 / サイズ を付与
//! 2. テンプレートに ExtractedText / ParsedPrice / ParsedSize 列を用意
//! 3. テンプレートの結合キー列を決定（SKU系 → ファイル名系の順）
//! 4. stem_trimmed が一致する最初のOCR行の値を書き込む

mod types;

pub use types::{JoinKey, MergeSummary, OcrRow};

use crate::config::MergeConfig;
use crate::error::{OcrMergeError, Result};
use crate::extractor::{EXTRACTED_TEXT_COLUMN, FILE_NAME_COLUMN};
use crate::table::{Cell, Table, TableFormat};
use product_ocr_common::{join_keys_for_filename, trim_variant, ImageRecord, ParsedFields};
use std::collections::HashMap;
use std::path::Path;

pub const PARSED_PRICE_COLUMN: &str = "ParsedPrice";
pub const PARSED_SIZE_COLUMN: &str = "ParsedSize";

/// テンプレートに追加する列（この順で末尾に追加）
pub const OCR_COLUMNS: [&str; 3] = [EXTRACTED_TEXT_COLUMN, PARSED_PRICE_COLUMN, PARSED_SIZE_COLUMN];

/// SKU系とみなす列名（小文字で完全一致）
const SKU_COLUMN_NAMES: &[&str] = &["sku", "product_code", "code", "id"];

/// ファイル名系とみなす列名の部分文字列（小文字）
const FILE_COLUMN_HINTS: &[&str] = &["file", "image"];

/// 読み込み → マージ → CSV/Excel 書き出し
///
/// 必須列の欠落などの構造エラーは書き出し前に返す。
pub fn run_merge(config: &MergeConfig) -> Result<MergeSummary> {
    let mut template = Table::read(&config.template)?;
    tracing::debug!(rows = template.len(), path = %config.template.display(), "テンプレート読み込み");

    let ocr_table = load_ocr_table(&config.ocr_table)?;
    let ocr_rows = prepare_ocr_rows(&ocr_table)?;
    tracing::debug!(rows = ocr_rows.len(), path = %config.ocr_table.display(), "OCR結果読み込み");

    let summary = merge_into_template(&mut template, &ocr_rows)?;

    // 両方の生成に成功してから書き出す（片方だけ更新されないように）
    let mut outputs = Vec::new();
    for path in [&config.merged_csv, &config.merged_xlsx] {
        let bytes = template.encode(TableFormat::from_path(path)?)?;
        outputs.push((path, bytes));
    }

    for (path, bytes) in outputs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
    }

    tracing::info!(
        join_key = %summary.join_key,
        matched = summary.matched_rows,
        unmatched = summary.unmatched_rows(),
        "マージ完了"
    );

    Ok(summary)
}

/// OCR結果表を読み込む（抽出の .json 出力にも対応）
pub fn load_ocr_table(path: &Path) -> Result<Table> {
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if !is_json {
        return Table::read(path);
    }

    if !path.exists() {
        return Err(OcrMergeError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let records: Vec<ImageRecord> = serde_json::from_str(&content)?;
    Ok(crate::extractor::records_to_table(&records))
}

/// OCR結果表の各行に結合キーと解析値を付与
///
/// `FileName` 列がなければエラー。`ExtractedText` 列がない場合はテキストなしとして扱う。
pub fn prepare_ocr_rows(table: &Table) -> Result<Vec<OcrRow>> {
    let file_col = table
        .column_index(FILE_NAME_COLUMN)
        .ok_or_else(|| OcrMergeError::MissingColumn(FILE_NAME_COLUMN.to_string()))?;
    let text_col = table.column_index(EXTRACTED_TEXT_COLUMN);

    let rows = (0..table.len())
        .map(|row| {
            let file_name = table.cell(row, file_col).as_text().unwrap_or_default();
            let extracted_text = text_col
                .map(|col| table.cell(row, col).clone())
                .unwrap_or_default();
            let parsed = extracted_text
                .as_text()
                .map(ParsedFields::from_text)
                .unwrap_or_default();

            let (stem, stem_trimmed) = join_keys_for_filename(file_name);

            OcrRow {
                file_name: file_name.to_string(),
                parsed_price: parsed.parsed_price,
                parsed_size: parsed.parsed_size,
                extracted_text,
                stem,
                stem_trimmed,
            }
        })
        .collect();

    Ok(rows)
}

/// テンプレートの結合キー列を決定
///
/// 1. 列名（小文字）が sku / product_code / code / id のいずれか → 最初の列
/// 2. 列名（小文字）に file / image を含む → 最初の列
/// 3. どちらもなければエラー
pub fn select_join_key(columns: &[String]) -> Result<JoinKey> {
    if let Some(column) = columns
        .iter()
        .find(|c| SKU_COLUMN_NAMES.contains(&c.to_lowercase().as_str()))
    {
        return Ok(JoinKey::Sku {
            column: column.clone(),
        });
    }

    if let Some(column) = columns.iter().find(|c| {
        let lower = c.to_lowercase();
        FILE_COLUMN_HINTS.iter().any(|hint| lower.contains(hint))
    }) {
        return Ok(JoinKey::FileName {
            column: column.clone(),
        });
    }

    Err(OcrMergeError::NoJoinKey)
}

/// テンプレート1行分の結合キー（連番除去済み）を求める
///
/// SKU系は値を小文字化したものを stem とし、ファイル名系はOCR側と同じ正規化を通す。
pub fn template_join_key(join_key: &JoinKey, cell: &Cell) -> String {
    match join_key {
        JoinKey::Sku { .. } => trim_variant(&cell.to_string().to_lowercase()),
        JoinKey::FileName { .. } => join_keys_for_filename(cell.as_text().unwrap_or_default()).1,
    }
}

/// OCR行をテンプレートへマージ
///
/// - 出力列は既存列の順序を維持し、足りない列のみ末尾に追加
/// - stem_trimmed が一致するOCR行が複数あれば、OCR表で先に出現した行を使う
/// - 一致した行は3列とも上書き（値がなければ空）、一致しない行はそのまま
/// - 結合キーが空の行は照合しない
pub fn merge_into_template(template: &mut Table, ocr_rows: &[OcrRow]) -> Result<MergeSummary> {
    let [text_col, price_col, size_col] = OCR_COLUMNS.map(|name| template.ensure_column(name));

    let join_key = select_join_key(template.columns())?;
    let key_col = template
        .column_index(join_key.column())
        .ok_or(OcrMergeError::NoJoinKey)?;

    // stem_trimmed → 最初に出現したOCR行
    let mut first_by_key: HashMap<&str, &OcrRow> = HashMap::new();
    for row in ocr_rows.iter().filter(|r| !r.stem_trimmed.is_empty()) {
        first_by_key.entry(row.stem_trimmed.as_str()).or_insert(row);
    }

    let mut matched_rows = 0;
    for row in 0..template.len() {
        let key = template_join_key(&join_key, template.cell(row, key_col));
        if key.is_empty() {
            continue;
        }

        if let Some(ocr) = first_by_key.get(key.as_str()) {
            template.set_cell(row, text_col, ocr.extracted_text.clone());
            template.set_cell(row, price_col, Cell::from(ocr.parsed_price));
            template.set_cell(row, size_col, Cell::from(ocr.parsed_size.clone()));
            matched_rows += 1;
        }
    }

    Ok(MergeSummary {
        join_key,
        template_rows: template.len(),
        ocr_rows: ocr_rows.len(),
        matched_rows,
    })
}
