use crate::error::{ContactSheetError, Result};
use crate::tools::{MediaInfo, MediaProcessor, get_media_info};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::path::Path;
use std::process::Command;

/// 透過外部 ffmpeg / ffprobe 執行檔實作的影片處理器
#[derive(Debug, Clone)]
pub struct FfmpegProcessor {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl FfmpegProcessor {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }
}

impl Default for FfmpegProcessor {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl MediaProcessor for FfmpegProcessor {
    fn probe(&self, path: &Path) -> Result<MediaInfo> {
        get_media_info(&self.ffprobe, path)
    }

    fn extract_frame(
        &self,
        path: &Path,
        timestamp: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        let args = build_extract_args(path, timestamp, width, height);
        debug!("擷取縮圖: {} {}", self.ffmpeg, args.join(" "));

        let extraction_error = |reason: String| ContactSheetError::FrameExtraction {
            index: 0,
            timestamp,
            reason,
        };

        // 畫面以 PNG 寫到 stdout，不落地暫存檔
        let output = Command::new(&self.ffmpeg)
            .args(&args)
            .output()
            .map_err(|e| extraction_error(format!("無法執行 ffmpeg ({}): {e}", self.ffmpeg)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(extraction_error(format!(
                "ffmpeg 擷取失敗: {}",
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(extraction_error("ffmpeg 沒有輸出任何畫面".to_string()));
        }

        let frame = image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .map_err(|e| extraction_error(format!("無法解碼縮圖: {e}")))?;

        Ok(frame.to_rgba8())
    }
}

fn build_extract_args(path: &Path, timestamp: f64, width: u32, height: u32) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-ss".to_string(),
        format!("{timestamp:.2}"),
        "-i".to_string(),
        path.to_string_lossy().to_string(),
        "-s".to_string(),
        format!("{width}x{height}"),
        "-frames:v".to_string(),
        "1".to_string(),
        "-an".to_string(),
        "-sn".to_string(),
        "-f".to_string(),
        "image2pipe".to_string(),
        "-vcodec".to_string(),
        "png".to_string(),
        "-".to_string(),
    ]
}
