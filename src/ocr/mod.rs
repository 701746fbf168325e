//! OCRエンジン連携モジュール
//!
//! エンジン本体（Tesseract等）は外部プロセス。ここでは
//! - 画像パス → テキスト のインターフェース（`OcrEngine`）
//! - 画像単位でスキップしてよいエラーか、バッチを中断すべきエラーかの分類
//! を定義する。

mod tesseract;

pub use tesseract::{TesseractCli, DEFAULT_COMMAND, DEFAULT_LANGUAGE};

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("画像を開けません: {0}")]
    Io(#[from] std::io::Error),

    #[error("画像のデコードに失敗: {0}")]
    Decode(#[from] image::ImageError),

    #[error("文字認識に失敗: {0}")]
    Recognition(String),

    #[error("OCRエンジンが利用できません: {0}")]
    EngineUnavailable(String),
}

impl OcrError {
    /// 画像単位でスキップして処理を続行してよいエラーか
    ///
    /// 画像の読み込み・デコード・認識の失敗はデータ側の問題として扱う。
    /// エンジン自体が起動できない場合は全画像で失敗するため中断する。
    pub fn is_recoverable(&self) -> bool {
        match self {
            OcrError::Io(_) | OcrError::Decode(_) | OcrError::Recognition(_) => true,
            OcrError::EngineUnavailable(_) => false,
        }
    }
}

/// OCRエンジン
///
/// 画像ファイルを1回だけ認識し、認識テキストを返す（リトライなし）。
pub trait OcrEngine {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;
}

impl<E: OcrEngine + ?Sized> OcrEngine for &E {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        (**self).recognize(image_path)
    }
}
