//! 表データ（CSV / Excel 共通のメモリ表現）
//!
//! 列名付きの行集合。列順は読み込み時の順序を保持する。

pub mod delimited;
pub mod excel;

use crate::error::{OcrMergeError, Result};
use std::fmt;
use std::path::Path;

/// セル値
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// 文字列セル（空文字は Empty）
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 文字列セルのみ中身を返す（数値・空は None）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map(Cell::Int).unwrap_or_default()
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::text).unwrap_or_default()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 表の保存形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Excel,
}

impl TableFormat {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" => Ok(TableFormat::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(TableFormat::Excel),
            _ => Err(OcrMergeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// ファイルから読み込み（拡張子で形式判定）
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OcrMergeError::FileNotFound(path.display().to_string()));
        }

        match TableFormat::from_path(path)? {
            TableFormat::Csv => delimited::read_delimited(path, b','),
            TableFormat::Tsv => delimited::read_delimited(path, b'\t'),
            TableFormat::Excel => excel::read_first_sheet(path),
        }
    }

    /// ファイルへ書き出し（拡張子で形式判定、既存ファイルは上書き）
    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.encode(TableFormat::from_path(path)?)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// 指定形式のバイト列にする
    pub fn encode(&self, format: TableFormat) -> Result<Vec<u8>> {
        match format {
            TableFormat::Csv => delimited::delimited_bytes(self, b','),
            TableFormat::Tsv => delimited::delimited_bytes(self, b'\t'),
            TableFormat::Excel => excel::sheet_bytes(self),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名の位置（完全一致、重複時は先頭）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 列がなければ末尾に空の列として追加し、位置を返す
    ///
    /// 既存の列は値が欠けていてもそのまま使う。
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }

        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Cell::Empty);
        }
        self.columns.len() - 1
    }

    /// 行を追加（列数に合わせて切り詰め・補完）
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }
}
