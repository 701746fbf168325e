use crate::error::{OcrMergeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// フォルダ直下の画像ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(OcrMergeError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_image_file_name(&file_name) {
            images.push(ImageInfo {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 画像ファイル名か判定（拡張子の大文字小文字は区別しない）
pub fn is_image_file_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_is_image_file_name() {
        assert!(is_image_file_name("a.jpg"));
        assert!(is_image_file_name("A.JPG"));
        assert!(is_image_file_name("b.Jpeg"));
        assert!(is_image_file_name("c.png"));
        assert!(!is_image_file_name("notes.txt"));
        assert!(!is_image_file_name("scan.pdf"));
        assert!(!is_image_file_name("anim.gif"));
        assert!(!is_image_file_name("jpg"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_with_images() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();

        File::create(dir.join("test1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.join("test2.JPG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.join("test3.png")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.join("readme.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(dir.join("folder.jpg")).unwrap();

        let result = scan_folder(dir).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name, "test1.jpg");
        assert_eq!(result[1].file_name, "test2.JPG");
        assert_eq!(result[2].file_name, "test3.png");
    }

    #[test]
    fn test_images_sorted_by_filename() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();

        File::create(dir.join("c.jpg")).unwrap();
        File::create(dir.join("a.jpeg")).unwrap();
        File::create(dir.join("b.png")).unwrap();

        let result = scan_folder(dir).unwrap();
        let names: Vec<&str> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpeg", "b.png", "c.jpg"]);
    }

    #[test]
    fn test_scan_folder_skips_subfolders() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();

        fs::create_dir(dir.join("nested")).unwrap();
        File::create(dir.join("nested").join("inner.jpg")).unwrap();
        File::create(dir.join("top.jpg")).unwrap();

        let result = scan_folder(dir).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name, "top.jpg");
    }
}
