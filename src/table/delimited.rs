//! CSV/TSV 読み書き
//!
//! - 読み込み: UTF-8 BOM を除去し、列ごとに数値型を推定する
//! - 書き出し: UTF-8 BOM付き（Excelで文字化けしないように）

use super::{Cell, Table};
use crate::error::{OcrMergeError, Result};
use std::io::Write;
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    parse_delimited(&content, delimiter)
}

/// 区切りテキストをパース（先頭行はヘッダー）
pub fn parse_delimited(content: &str, delimiter: u8) -> Result<Table> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let width = columns.len();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(OcrMergeError::TableRead(format!(
                "{}行目の列数がヘッダーより多い ({} > {})",
                line,
                record.len(),
                width
            )));
        }

        let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        row.resize(width, String::new());
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| ColumnKind::infer(raw_rows.iter().map(|r| r[col].as_str())))
        .collect();

    let mut table = Table::new(columns);
    for raw in raw_rows {
        let row = raw
            .into_iter()
            .zip(&kinds)
            .map(|(value, kind)| kind.to_cell(value))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// BOM付きの区切りテキストのバイト列を作る
pub fn delimited_bytes(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.write_all(UTF8_BOM.as_bytes())?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(buf);

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| OcrMergeError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
}

/// 列の型（空セルは推定に使わない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Int;
        let mut seen = false;

        for value in values.filter(|v| !v.is_empty()) {
            seen = true;
            if kind == ColumnKind::Int && value.parse::<i64>().is_err() {
                kind = ColumnKind::Float;
            }
            if kind == ColumnKind::Float && !is_finite_number(value) {
                return ColumnKind::Text;
            }
        }

        if seen {
            kind
        } else {
            ColumnKind::Text
        }
    }

    fn to_cell(self, value: String) -> Cell {
        if value.is_empty() {
            return Cell::Empty;
        }
        match self {
            ColumnKind::Int => value.parse().map(Cell::Int).unwrap_or(Cell::Text(value)),
            ColumnKind::Float => value.parse().map(Cell::Float).unwrap_or(Cell::Text(value)),
            ColumnKind::Text => Cell::Text(value),
        }
    }
}

fn is_finite_number(value: &str) -> bool {
    value.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false)
}
