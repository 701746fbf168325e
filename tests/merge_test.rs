//! テンプレートマージの統合テスト
//!
//! CSVテンプレート + OCR結果表 → マージ結果CSV/Excel

use product_ocr_rust::config::{Config, MergeConfig};
use product_ocr_rust::error::OcrMergeError;
use product_ocr_rust::matcher::{self, JoinKey};
use product_ocr_rust::table::{Cell, Table};
use std::path::Path;
use tempfile::tempdir;

fn write_ocr_table(path: &Path, rows: &[(&str, &str)]) {
    let mut table = Table::new(vec!["FileName".into(), "ExtractedText".into()]);
    for (name, text) in rows {
        table.push_row(vec![Cell::text(*name), Cell::text(*text)]);
    }
    table.write(path).expect("OCR結果表の書き出し失敗");
}

fn merge_config(dir: &Path, ocr: &Path, template: &Path) -> MergeConfig {
    Config::default().merge_config(
        ocr,
        template,
        Some(dir.join("out").join("merged.csv")),
        Some(dir.join("out").join("merged.xlsx")),
    )
}

/// 3行のテンプレートのうち1行目と3行目だけ画像がある
#[test]
fn test_end_to_end_sku_merge() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("product-import-template.csv");
    std::fs::write(
        &template_path,
        "\u{feff}sku,name,selling_price\nBNS-001,Banarasi Silk Saree,5999\nANK-002,Anarkali Suit,3299\nKRT-003,Cotton Kurti,899\n",
    )
    .unwrap();

    let ocr_path = dir.path().join("ocr_results.xlsx");
    write_ocr_table(
        &ocr_path,
        &[
            ("BNS-001-01.jpg", "Banarasi\nRs: 5,999\nFree Size"),
            ("krt-003 (1).PNG", "Kurti MUR 899 S M L XL"),
        ],
    );

    let config = merge_config(dir.path(), &ocr_path, &template_path);
    let summary = matcher::run_merge(&config).expect("マージ失敗");

    assert_eq!(summary.join_key, JoinKey::Sku { column: "sku".into() });
    assert_eq!(summary.template_rows, 3);
    assert_eq!(summary.matched_rows, 2);
    assert_eq!(summary.unmatched_rows(), 1);

    for output in [&config.merged_csv, &config.merged_xlsx] {
        let merged = Table::read(output).expect("マージ結果の読み込み失敗");
        assert_eq!(
            merged.columns(),
            &["sku", "name", "selling_price", "ExtractedText", "ParsedPrice", "ParsedSize"],
            "{}",
            output.display()
        );
        assert_eq!(merged.len(), 3);

        // 1行目
        assert_eq!(merged.cell(0, 0), &Cell::text("BNS-001"));
        assert_eq!(merged.cell(0, 3), &Cell::text("Banarasi\nRs: 5,999\nFree Size"));
        assert_eq!(merged.cell(0, 4), &Cell::Int(5999));
        assert_eq!(merged.cell(0, 5), &Cell::text("Free Size"));

        // 2行目は一致なし
        assert_eq!(merged.cell(1, 0), &Cell::text("ANK-002"));
        assert_eq!(merged.cell(1, 3), &Cell::Empty);
        assert_eq!(merged.cell(1, 4), &Cell::Empty);
        assert_eq!(merged.cell(1, 5), &Cell::Empty);

        // 3行目
        assert_eq!(merged.cell(2, 2), &Cell::Int(899));
        assert_eq!(merged.cell(2, 4), &Cell::Int(899));
        assert_eq!(merged.cell(2, 5), &Cell::text("S, M, L, XL"));
    }
}

/// ファイル名列で結合、同じstemのOCR行が複数あれば先頭を使う
#[test]
fn test_filename_join_first_match() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("template.csv");
    std::fs::write(&template_path, "name,image_file\nShirt,images/shirt.png\nDress,dress.jpg\n").unwrap();

    let ocr_path = dir.path().join("ocr.csv");
    write_ocr_table(
        &ocr_path,
        &[("shirt-01.jpg", "Rs 1200 M"), ("shirt-02.jpg", "Rs 1500 XL")],
    );

    let config = merge_config(dir.path(), &ocr_path, &template_path);
    let summary = matcher::run_merge(&config).expect("マージ失敗");

    assert_eq!(summary.join_key, JoinKey::FileName { column: "image_file".into() });
    assert_eq!(summary.matched_rows, 1);

    let merged = Table::read(&config.merged_csv).unwrap();
    assert_eq!(merged.cell(0, 3), &Cell::Int(1200));
    assert_eq!(merged.cell(0, 4), &Cell::text("M"));
    assert_eq!(merged.cell(1, 2), &Cell::Empty);
}

/// FileName列がなければ何も書き出さない
#[test]
fn test_missing_file_name_column_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("template.csv");
    std::fs::write(&template_path, "sku\nA-1\n").unwrap();

    let ocr_path = dir.path().join("ocr.csv");
    std::fs::write(&ocr_path, "Name,ExtractedText\na.jpg,Rs 100\n").unwrap();

    let config = merge_config(dir.path(), &ocr_path, &template_path);
    let result = matcher::run_merge(&config);

    assert!(matches!(result, Err(OcrMergeError::MissingColumn(_))));
    assert!(!config.merged_csv.exists());
    assert!(!config.merged_xlsx.exists());
}

/// 結合キー列がなければ何も書き出さない
#[test]
fn test_no_join_key_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("template.csv");
    std::fs::write(&template_path, "name,price\nSaree,100\n").unwrap();

    let ocr_path = dir.path().join("ocr.csv");
    write_ocr_table(&ocr_path, &[("saree.jpg", "Rs 100")]);

    let config = merge_config(dir.path(), &ocr_path, &template_path);
    let result = matcher::run_merge(&config);

    let err = result.unwrap_err();
    assert!(matches!(err, OcrMergeError::NoJoinKey));
    assert!(err.to_string().contains("no join key available"));
    assert!(!config.merged_csv.exists());
    assert!(!config.merged_xlsx.exists());
}

/// テンプレートが存在しない
#[test]
fn test_missing_template() {
    let dir = tempdir().expect("Failed to create temp dir");
    let ocr_path = dir.path().join("ocr.csv");
    write_ocr_table(&ocr_path, &[]);

    let config = merge_config(dir.path(), &ocr_path, &dir.path().join("none.csv"));
    let result = matcher::run_merge(&config);

    assert!(matches!(result, Err(OcrMergeError::FileNotFound(_))));
}

/// 再実行で出力は上書きされる
#[test]
fn test_rerun_overwrites_outputs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("template.csv");
    std::fs::write(&template_path, "code\nplz-005\n").unwrap();

    let ocr_path = dir.path().join("ocr.csv");
    let config = merge_config(dir.path(), &ocr_path, &template_path);

    write_ocr_table(&ocr_path, &[("plz-005.jpg", "Rs 700")]);
    matcher::run_merge(&config).unwrap();

    write_ocr_table(&ocr_path, &[("plz-005.jpg", "Rs 750")]);
    matcher::run_merge(&config).unwrap();

    let merged = Table::read(&config.merged_xlsx).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.cell(0, 2), &Cell::Int(750));
}

/// Excelの生成に失敗した場合はCSVも更新しない
#[test]
fn test_xlsx_failure_keeps_previous_outputs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let template_path = dir.path().join("template.csv");
    std::fs::write(&template_path, "sku\nLHG-004\n").unwrap();

    // Excelのセル上限（32767文字）を超えるテキスト
    let long_text = format!("Rs 1200 {}", "x".repeat(40_000));
    let ocr_path = dir.path().join("ocr.csv");
    write_ocr_table(&ocr_path, &[("LHG-004.jpg", long_text.as_str())]);

    let config = merge_config(dir.path(), &ocr_path, &template_path);
    std::fs::create_dir_all(config.merged_csv.parent().unwrap()).unwrap();
    std::fs::write(&config.merged_csv, "previous").unwrap();
    std::fs::write(&config.merged_xlsx, "previous").unwrap();

    let result = matcher::run_merge(&config);

    assert!(matches!(result, Err(OcrMergeError::ExcelGeneration(_))));
    assert_eq!(std::fs::read_to_string(&config.merged_csv).unwrap(), "previous");
    assert_eq!(std::fs::read_to_string(&config.merged_xlsx).unwrap(), "previous");
}
