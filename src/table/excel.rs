//! Excel 読み書き
//!
//! 読み込みは calamine（先頭シート、1行目をヘッダー）、
//! 書き出しは rust_xlsxwriter（1シート、ヘッダー + 値のみ）。

use super::{Cell, Table};
use crate::error::{OcrMergeError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Excelの数値精度で整数として扱える上限
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn read_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OcrMergeError::TableRead(format!("シートがありません: {}", path.display())))??;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|h| to_cell(h).to_string()).collect(),
        None => return Ok(Table::default()),
    };

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(to_cell).collect());
    }

    Ok(table)
}

/// xlsx のバイト列を作る（ファイルには書かない）
pub fn sheet_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Int(v) => {
                    worksheet.write_number(row_num, col, *v as f64)?;
                }
                Cell::Float(v) => {
                    worksheet.write_number(row_num, col, *v)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => {
            if v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER {
                Cell::Int(*v as i64)
            } else {
                Cell::Float(*v)
            }
        }
        Data::String(s) => Cell::text(s.clone()),
        Data::Bool(b) => Cell::Text(if *b { "True" } else { "False" }.to_string()),
        other => Cell::text(other.to_string()),
    }
}
