use crate::error::{OcrMergeError, Result};
use crate::ocr::TesseractCli;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_OCR_RESULTS_NAME: &str = "ocr_results.xlsx";
const DEFAULT_MERGED_STEM: &str = "product-import-merged";

/// ユーザー設定（~/.config/product-ocr/config.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tesseract 実行ファイル
    pub tesseract_command: String,
    /// tesseract の言語 (-l)
    pub language: String,
    /// OCR結果表のファイル名（画像フォルダ内に作成）
    pub ocr_results_name: String,
    /// マージ結果のファイル名（拡張子なし、テンプレートと同じフォルダに作成）
    pub merged_stem: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tesseract_command: crate::ocr::DEFAULT_COMMAND.into(),
            language: crate::ocr::DEFAULT_LANGUAGE.into(),
            ocr_results_name: DEFAULT_OCR_RESULTS_NAME.into(),
            merged_stem: DEFAULT_MERGED_STEM.into(),
        }
    }
}

impl Config {
    /// 既定の場所から読み込み（なければデフォルト）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OcrMergeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("product-ocr").join("config.json"))
    }

    pub fn ocr_engine(&self) -> TesseractCli {
        TesseractCli::new(&self.tesseract_command, &self.language)
    }

    /// 画像フォルダに対する抽出設定
    pub fn extract_config(&self, image_dir: &Path, output: Option<PathBuf>) -> ExtractConfig {
        ExtractConfig {
            image_dir: image_dir.to_path_buf(),
            output: output.unwrap_or_else(|| image_dir.join(&self.ocr_results_name)),
        }
    }

    /// テンプレートに対するマージ設定（出力先の省略時はテンプレートと同じフォルダ）
    pub fn merge_config(
        &self,
        ocr_table: &Path,
        template: &Path,
        merged_csv: Option<PathBuf>,
        merged_xlsx: Option<PathBuf>,
    ) -> MergeConfig {
        let base_dir = template.parent().unwrap_or_else(|| Path::new("."));
        MergeConfig {
            ocr_table: ocr_table.to_path_buf(),
            template: template.to_path_buf(),
            merged_csv: merged_csv
                .unwrap_or_else(|| base_dir.join(format!("{}.csv", self.merged_stem))),
            merged_xlsx: merged_xlsx
                .unwrap_or_else(|| base_dir.join(format!("{}.xlsx", self.merged_stem))),
        }
    }
}

/// 抽出(Extractor)の入出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub image_dir: PathBuf,
    /// .xlsx / .csv / .json
    pub output: PathBuf,
}

/// マージ(Matcher)の入出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    pub ocr_table: PathBuf,
    pub template: PathBuf,
    pub merged_csv: PathBuf,
    pub merged_xlsx: PathBuf,
}
