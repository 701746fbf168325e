use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use product_ocr_rust::{cli, config, extractor, matcher};
use cli::{Cli, Commands, OcrArgs};
use config::{Config, ExtractConfig, MergeConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)
        .with_context(|| format!("設定ファイルの読み込みに失敗: {}", config_path.display()))?;

    match cli.command {
        Commands::Extract { folder, output, ocr } => {
            println!("📸 product-ocr - OCR抽出\n");

            let config = with_ocr_overrides(config, &ocr);
            let extract = config.extract_config(&folder, output);

            println!("[1/1] OCR実行中...");
            extract_step(&config, &extract)?;

            println!("\n✅ 抽出完了");
        }

        Commands::Merge { ocr, template, outputs } => {
            println!("🔗 product-ocr - テンプレートマージ\n");

            let merge = config.merge_config(&ocr, &template, outputs.out_csv, outputs.out_xlsx);

            println!("[1/1] マージ中...");
            merge_step(&merge)?;

            println!("\n✅ マージ完了");
        }

        Commands::Run { folder, template, ocr_output, outputs, ocr } => {
            println!("🚀 product-ocr - 一括処理\n");

            let config = with_ocr_overrides(config, &ocr);
            let extract = config.extract_config(&folder, ocr_output);
            let merge = config.merge_config(&extract.output, &template, outputs.out_csv, outputs.out_xlsx);

            println!("[1/2] OCR実行中...");
            extract_step(&config, &extract)?;

            println!("\n[2/2] マージ中...");
            merge_step(&merge)?;

            println!("\n✅ 完了");
        }

        Commands::Config { set_tesseract_cmd, set_lang, show } => {
            let mut config = config;
            let changed = set_tesseract_cmd.is_some() || set_lang.is_some();

            if let Some(cmd) = set_tesseract_cmd {
                config.tesseract_command = cmd;
            }
            if let Some(lang) = set_lang {
                config.language = lang;
            }

            if changed {
                config.save_to(&config_path)?;
                println!("✔ 設定を保存しました: {}", config_path.display());
            }

            if show || !changed {
                println!("設定 ({}):", config_path.display());
                println!("  tesseract: {}", config.tesseract_command);
                println!("  言語: {}", config.language);
                println!("  OCR結果ファイル名: {}", config.ocr_results_name);
                println!("  マージ結果ファイル名: {}.csv / .xlsx", config.merged_stem);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn with_ocr_overrides(mut config: Config, ocr: &OcrArgs) -> Config {
    if let Some(cmd) = &ocr.tesseract {
        config.tesseract_command = cmd.clone();
    }
    if let Some(lang) = &ocr.lang {
        config.language = lang.clone();
    }
    config
}

fn extract_step(config: &Config, extract: &ExtractConfig) -> Result<()> {
    let engine = config.ocr_engine();
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .context("プログレスバーの設定に失敗")?,
    );

    let report = extractor::run_extract(extract, &engine, &progress)
        .with_context(|| format!("OCR抽出に失敗: {}", extract.image_dir.display()))?;

    println!("✔ {}枚を処理", report.records.len());
    if !report.skipped.is_empty() {
        println!("⚠ {}枚をスキップ:", report.skipped.len());
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.file_name, skipped.reason);
        }
    }
    println!("✔ 結果を保存: {}", display(&report.output));
    Ok(())
}

fn merge_step(merge: &MergeConfig) -> Result<()> {
    let summary = matcher::run_merge(merge)
        .with_context(|| format!("マージに失敗: {}", merge.template.display()))?;

    println!("✔ 結合キー: {}", summary.join_key);
    println!(
        "✔ {}行中 {}行が一致（未一致 {}行）",
        summary.template_rows,
        summary.matched_rows,
        summary.unmatched_rows()
    );
    println!("✔ マージ結果を保存: {}", display(&merge.merged_csv));
    println!("✔ マージ結果を保存: {}", display(&merge.merged_xlsx));
    Ok(())
}

fn display(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
