use crate::config::is_video_file;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 遞迴掃描資料夾中的影片檔，依檔案大小排序（由小到大）
///
/// `ignore_extension` 為真時不檢查副檔名，所有檔案都列入。
pub fn scan_video_files(directory: &Path, ignore_extension: bool) -> Result<Vec<VideoFileInfo>> {
    if !directory.is_dir() {
        bail!("路徑不是資料夾: {}", directory.display());
    }

    let mut video_files: Vec<VideoFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| ignore_extension || is_video_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(VideoFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    video_files.sort_by_key(|file| file.size);
    Ok(video_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_video_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("big.mp4"), vec![0u8; 300]).unwrap();
        fs::write(dir.path().join("small.mkv"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("notes.txt"), vec![0u8; 5]).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("mid.webm"), vec![0u8; 100]).unwrap();

        let files = scan_video_files(dir.path(), false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["small.mkv", "mid.webm", "big.mp4"]);
    }

    #[test]
    fn test_scan_video_files_ignore_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp4"), vec![0u8; 2]).unwrap();
        fs::write(dir.path().join("b.bin"), vec![0u8; 1]).unwrap();

        let files = scan_video_files(dir.path(), true).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].size, 1);
    }

    #[test]
    fn test_scan_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mp4");
        fs::write(&file, b"x").unwrap();
        assert!(scan_video_files(&file, false).is_err());
    }
}
