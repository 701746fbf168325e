//! Tesseract CLI連携
//!
//! `tesseract <image> stdout -l <lang>` を実行して認識テキストを取得する。

use super::{OcrEngine, OcrError};
use image::ImageReader;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_COMMAND: &str = "tesseract";
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Recognition(format!(
                    "{} failed (code {:?}): {}",
                    self.command,
                    output.status.code(),
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::EngineUnavailable(
                format!("{} が見つかりません（tesseract-ocr をインストールしてください）", self.command),
            )),
            Err(e) => Err(OcrError::EngineUnavailable(format!("{} 起動エラー: {}", self.command, e))),
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND, DEFAULT_LANGUAGE)
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        // 壊れた画像はエンジンに渡す前に弾く（形式は拡張子ではなく中身で判定）
        ImageReader::open(image_path)?.with_guessed_format()?.decode()?;
        self.run_tesseract(image_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

    /// 拡張子の形式で小さな画像を保存
    fn write_tiny_image(path: &Path) {
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |_, _| Luma([200u8]));
        DynamicImage::ImageLuma8(img).save(path).unwrap();
    }

    #[test]
    fn test_default_settings() {
        let engine = TesseractCli::default();
        assert_eq!(engine.command(), "tesseract");
        assert_eq!(engine.language(), "eng");
    }

    #[test]
    fn test_corrupt_image_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let engine = TesseractCli::new("product-ocr-no-such-binary", "eng");
        let err = engine.recognize(&path).unwrap_err();
        assert!(err.is_recoverable(), "{:?}", err);
    }

    #[test]
    fn test_mislabeled_jpeg_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let jpeg_path = dir.path().join("dress-01.jpg");
        write_tiny_image(&jpeg_path);
        let path = dir.path().join("dress-01.png");
        std::fs::rename(&jpeg_path, &path).unwrap();

        // JPEGの中身でも .png 名のまま読めるので、エンジン起動まで進む
        let engine = TesseractCli::new("product-ocr-no-such-binary", "eng");
        let err = engine.recognize(&path).unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)), "{:?}", err);
    }

    #[test]
    fn test_missing_binary_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.png");
        write_tiny_image(&path);

        let engine = TesseractCli::new("product-ocr-no-such-binary", "eng");
        let err = engine.recognize(&path).unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)));
        assert!(!err.is_recoverable());
    }
}
