use crate::error::Result;
use image::RgbaImage;
use std::path::Path;

/// 影片基本資訊，每次處理只探測一次
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub filename: String,
    /// 長度（秒）
    pub duration: f64,
    /// 幀率標籤，例如 "30" 或 "30000/1001"
    pub framerate: String,
    pub width: u32,
    pub height: u32,
    /// 編碼格式名稱
    pub format: String,
    /// 檔案大小（位元組）
    pub filesize: u64,
}

/// 影片處理能力
///
/// 預覽圖流程只透過這個介面讀取影片；正式環境使用
/// [`FfmpegProcessor`](super::FfmpegProcessor)，測試可換成固定輸出的假實作。
/// 取樣時會被多個執行緒同時呼叫。
pub trait MediaProcessor: Send + Sync {
    fn probe(&self, path: &Path) -> Result<MediaInfo>;

    /// 擷取 `timestamp` 秒處的畫面，縮放為 `width` x `height`
    fn extract_frame(
        &self,
        path: &Path,
        timestamp: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage>;
}
