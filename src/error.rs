//! 預覽圖核心流程的錯誤類型
//!
//! 核心流程（探測、取樣、版面、繪製、編碼）一律回傳 [`ContactSheetError`]，
//! 外層元件再以 `anyhow` 補上檔案層級的上下文。

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContactSheetError>;

#[derive(Debug, Error)]
pub enum ContactSheetError {
    /// 無法取得影片資訊
    #[error("無法讀取影片資訊: {0}")]
    Probe(String),

    /// 特定時間點擷取縮圖失敗
    #[error("縮圖擷取失敗 [{index}] ({timestamp:.2}s): {reason}")]
    FrameExtraction {
        index: usize,
        timestamp: f64,
        reason: String,
    },

    /// 版面尺寸無效（例如影片高度為 0）
    #[error("版面計算失敗: {0}")]
    Layout(String),

    /// 字型載入或繪圖失敗
    #[error("繪製預覽圖失敗: {0}")]
    Render(String),

    /// 輸出編碼失敗
    #[error("預覽圖編碼失敗: {0}")]
    Encoding(String),

    #[error("設定值無效: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ContactSheetError {
    /// 將擷取錯誤標上所屬的取樣索引與時間點
    ///
    /// 處理器回傳的錯誤可能不知道自己屬於哪一格，
    /// 取樣器會在收集結果前統一補上。
    #[must_use]
    pub fn at_frame(self, index: usize, timestamp: f64) -> Self {
        match self {
            Self::FrameExtraction { reason, .. } => Self::FrameExtraction {
                index,
                timestamp,
                reason,
            },
            other => Self::FrameExtraction {
                index,
                timestamp,
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_frame_rewrites_index() {
        let error = ContactSheetError::FrameExtraction {
            index: 0,
            timestamp: 0.0,
            reason: "ffmpeg exited".to_string(),
        }
        .at_frame(3, 12.5);

        match error {
            ContactSheetError::FrameExtraction {
                index,
                timestamp,
                reason,
            } => {
                assert_eq!(index, 3);
                assert!((timestamp - 12.5).abs() < f64::EPSILON);
                assert_eq!(reason, "ffmpeg exited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_at_frame_wraps_other_errors() {
        let error = ContactSheetError::Probe("boom".to_string()).at_frame(1, 2.0);
        assert!(matches!(
            error,
            ContactSheetError::FrameExtraction { index: 1, .. }
        ));
        assert!(error.to_string().contains("boom"));
    }
}
