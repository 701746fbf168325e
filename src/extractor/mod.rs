//! OCR抽出モジュール
//!
//! 画像フォルダを走査し、1枚ずつOCRしてファイル名とテキストの表を出力する。
//! 1枚の失敗でバッチ全体を止めない（エンジン自体が使えない場合のみ中断）。

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::ocr::OcrEngine;
use crate::scanner::{self, ImageInfo};
use crate::table::{Cell, Table};
use indicatif::ProgressBar;
use product_ocr_common::ImageRecord;
use std::path::{Path, PathBuf};

pub const FILE_NAME_COLUMN: &str = "FileName";
pub const EXTRACTED_TEXT_COLUMN: &str = "ExtractedText";

/// スキップした画像
#[derive(Debug, Clone)]
pub struct SkippedImage {
    pub file_name: String,
    pub reason: String,
}

/// 抽出結果
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// 成功した画像（処理順）
    pub records: Vec<ImageRecord>,
    pub skipped: Vec<SkippedImage>,
    pub output: PathBuf,
}

/// フォルダ走査 → OCR → 結果表の書き出し
pub fn run_extract<E: OcrEngine + ?Sized>(
    config: &ExtractConfig,
    engine: &E,
    progress: &ProgressBar,
) -> Result<ExtractReport> {
    let images = scanner::scan_folder(&config.image_dir)?;
    if images.is_empty() {
        tracing::warn!(folder = %config.image_dir.display(), "画像が見つかりません");
    }

    let (records, skipped) = extract_texts(&images, engine, progress)?;
    write_records(&records, &config.output)?;

    Ok(ExtractReport {
        records,
        skipped,
        output: config.output.clone(),
    })
}

/// 画像ごとにOCRを1回ずつ実行
///
/// 読み込み・デコード・認識の失敗はスキップして続行する。
/// 回復不能なエラー（エンジン未インストール等）はそのまま返す。
pub fn extract_texts<E: OcrEngine + ?Sized>(
    images: &[ImageInfo],
    engine: &E,
    progress: &ProgressBar,
) -> Result<(Vec<ImageRecord>, Vec<SkippedImage>)> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    progress.set_length(images.len() as u64);

    for image in images {
        progress.set_message(image.file_name.clone());

        match engine.recognize(&image.path) {
            Ok(text) => {
                let record = ImageRecord::new(image.file_name.as_str(), &text);
                progress.suspend(|| {
                    tracing::info!(
                        file = %image.file_name,
                        chars = record.extracted_text.chars().count(),
                        "processed"
                    )
                });
                records.push(record);
            }
            Err(e) if e.is_recoverable() => {
                progress.suspend(|| tracing::warn!(file = %image.file_name, error = %e, "skipped"));
                skipped.push(SkippedImage {
                    file_name: image.file_name.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok((records, skipped))
}

/// OCR結果を `FileName`, `ExtractedText` の表にする
pub fn records_to_table(records: &[ImageRecord]) -> Table {
    let mut table = Table::new(vec![
        FILE_NAME_COLUMN.to_string(),
        EXTRACTED_TEXT_COLUMN.to_string(),
    ]);

    for record in records {
        table.push_row(vec![
            Cell::text(record.file_name.as_str()),
            Cell::text(record.extracted_text.as_str()),
        ]);
    }

    table
}

/// 出力先の拡張子に応じて書き出し（.json は ImageRecord 配列、それ以外は表）
pub fn write_records(records: &[ImageRecord], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let is_json = output
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(output, json)?;
    } else {
        records_to_table(records).write(output)?;
    }

    Ok(())
}
