use crate::error::{ContactSheetError, Result};
use crate::tools::{MediaInfo, MediaProcessor, format_seconds};
use image::RgbaImage;
use log::{debug, error};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::io;
use std::path::Path;
use std::thread;

/// 單張取樣結果
#[derive(Debug, Clone)]
pub struct FrameSample {
    /// 在網格中的位置，從 0 開始
    pub index: usize,
    pub timestamp_seconds: f64,
    /// 顯示在縮圖上的時間標籤
    pub timestamp_label: String,
    pub image: RgbaImage,
}

/// 計算取樣時間點
///
/// 將影片切成 `pics + 2` 等份，取中間 `pics` 個分割點，
/// 避開片頭與片尾常見的黑畫面。
#[must_use]
pub fn sample_timestamps(duration: f64, pics: u32) -> Vec<f64> {
    let step = duration / f64::from(pics + 2);
    (0..pics).map(|i| step * f64::from(i + 1)).collect()
}

/// 平行擷取縮圖
///
/// 每個取樣索引對應一個預先配置的結果槽，由單一任務寫入，不需要鎖。
/// 所有任務結束後才依索引順序檢查結果：任何一張失敗，整批作廢。
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSampler {
    max_parallel: usize,
}

impl FrameSampler {
    /// `max_parallel` 為同時擷取的上限，0 表示依 CPU 核心數
    #[must_use]
    pub const fn new(max_parallel: usize) -> Self {
        Self { max_parallel }
    }

    #[must_use]
    pub fn worker_count(&self, pics: usize) -> usize {
        let cap = if self.max_parallel == 0 {
            thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            self.max_parallel
        };
        cap.min(pics).max(1)
    }

    pub fn sample<P>(
        &self,
        video: &Path,
        info: &MediaInfo,
        processor: &P,
        pics: u32,
        thumb_width: u32,
        thumb_height: u32,
    ) -> Result<Vec<FrameSample>>
    where
        P: MediaProcessor + ?Sized,
    {
        if pics == 0 {
            return Err(ContactSheetError::InvalidConfig(
                "pics 必須大於 0".to_string(),
            ));
        }
        if !info.duration.is_finite() || info.duration <= 0.0 {
            return Err(ContactSheetError::Probe(format!(
                "影片長度無效 ({}): {}",
                info.duration, info.filename
            )));
        }

        let total = pics as usize;
        let timestamps = sample_timestamps(info.duration, pics);
        let workers = self.worker_count(total);

        debug!(
            "取樣 {total} 張縮圖 ({thumb_width}x{thumb_height})，並行上限 {workers}: {}",
            info.filename
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("frame-sampler-{i}"))
            .build()
            .map_err(|e| ContactSheetError::Io(io::Error::other(e.to_string())))?;

        let mut slots: Vec<Option<Result<RgbaImage>>> = (0..total).map(|_| None).collect();

        // install 會等待所有任務完成才返回
        pool.install(|| {
            slots
                .par_iter_mut()
                .zip(timestamps.par_iter())
                .enumerate()
                .for_each(|(index, (slot, &timestamp))| {
                    debug!(
                        "擷取縮圖 {}/{} ({})",
                        index + 1,
                        total,
                        format_seconds(timestamp)
                    );

                    let result = processor
                        .extract_frame(video, timestamp, thumb_width, thumb_height)
                        .map_err(|e| e.at_frame(index, timestamp));

                    if let Err(e) = &result {
                        error!("{e}");
                    }

                    *slot = Some(result);
                });
        });

        let mut frames = Vec::with_capacity(total);
        for (index, (slot, timestamp)) in slots.into_iter().zip(timestamps).enumerate() {
            let image = slot.unwrap_or_else(|| {
                Err(ContactSheetError::FrameExtraction {
                    index,
                    timestamp,
                    reason: "沒有任何擷取結果".to_string(),
                })
            })?;

            frames.push(FrameSample {
                index,
                timestamp_seconds: timestamp,
                timestamp_label: format_seconds(timestamp),
                image,
            });
        }

        Ok(frames)
    }
}
