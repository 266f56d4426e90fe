use super::frame_sampler::FrameSampler;
use super::layout_planner::plan;
use super::sheet_composer::SheetComposer;
use super::sheet_encoder::{output_path_for, write_sheet};
use crate::config::{Settings, SheetConfig, is_video_file};
use crate::error::Result as SheetResult;
use crate::tools::{MediaProcessor, TextRenderer, format_seconds, scan_video_files};
use anyhow::{Context, Result};
use console::style;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 為單一影片產生預覽圖，回傳輸出檔案路徑
///
/// 依序執行探測、版面計算、平行取樣、繪製、編碼；
/// 任何一步失敗都不會寫出檔案。
pub fn create_contact_sheet<P, R>(
    video: &Path,
    config: &SheetConfig,
    processor: &P,
    renderer: &R,
) -> SheetResult<PathBuf>
where
    P: MediaProcessor + ?Sized,
    R: TextRenderer + ?Sized,
{
    config.validate()?;

    let info = processor.probe(video)?;
    debug!(
        "影片資訊: {}x{}, {}, {}",
        info.width,
        info.height,
        format_seconds(info.duration),
        info.format
    );

    let geometry = plan(config, &info)?;
    debug!(
        "版面: {}x{}，縮圖 {}x{}，{} 列 {} 欄",
        geometry.canvas_width,
        geometry.canvas_height,
        geometry.thumb_width,
        geometry.thumb_height,
        geometry.rows,
        geometry.columns
    );

    let frames = FrameSampler::new(config.max_parallel_extractions).sample(
        video,
        &info,
        processor,
        config.pics,
        geometry.thumb_width,
        geometry.thumb_height,
    )?;

    let canvas = SheetComposer::new(config, renderer).compose(&info, &geometry, &frames)?;

    let output_path = output_path_for(video, config.format);
    write_sheet(&canvas, &output_path, config.format, config.jpeg_quality)?;

    info!("預覽圖已建立: {}", output_path.display());
    Ok(output_path)
}

/// 預覽圖生成結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub total_videos: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    /// 收到中斷訊號而提前結束
    pub interrupted: bool,
}

impl GenerationResult {
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// 批次處理輸入路徑
///
/// 資料夾會遞迴掃描影片檔；單一影片失敗只會記錄並計數，繼續處理下一個。
pub struct ContactSheetGenerator<P, R> {
    settings: Settings,
    processor: P,
    renderer: R,
    shutdown_signal: Arc<AtomicBool>,
}

impl<P: MediaProcessor, R: TextRenderer> ContactSheetGenerator<P, R> {
    pub const fn new(
        settings: Settings,
        processor: P,
        renderer: R,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            settings,
            processor,
            renderer,
            shutdown_signal,
        }
    }

    pub fn run(&self, inputs: &[PathBuf]) -> Result<GenerationResult> {
        self.settings.validate().context("設定檔內容無效")?;

        println!("{}", style("=== 影片預覽圖生成 ===").cyan().bold());

        let mut result = GenerationResult::default();
        let videos = self.collect_videos(inputs, &mut result);

        if videos.is_empty() && result.total_videos == 0 {
            println!("{}", style("找不到任何影片檔案").yellow());
            return Ok(result);
        }

        let total = videos.len();
        for (index, video) in videos.iter().enumerate() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止處理");
                result.interrupted = true;
                break;
            }

            result.total_videos += 1;
            println!(
                "\n{} [{}/{}] {}",
                style("處理中").cyan(),
                index + 1,
                total,
                style(video.display()).bold()
            );

            let output_path = output_path_for(video, self.settings.sheet.format);
            if output_path.exists() && !self.settings.overwrite {
                println!("  {} 預覽圖已存在，跳過", style("⤳").dim());
                result.skipped += 1;
                continue;
            }

            match create_contact_sheet(
                video,
                &self.settings.sheet,
                &self.processor,
                &self.renderer,
            ) {
                Ok(path) => {
                    println!("  {} {}", style("✓").green(), path.display());
                    result.successful += 1;
                }
                Err(e) => {
                    error!("處理影片失敗 {}: {e}", video.display());
                    println!("  {} 處理失敗: {}", style("✗").red(), e);
                    result.failed += 1;
                }
            }
        }

        self.print_summary(&result);
        Ok(result)
    }

    /// 展開輸入路徑為影片清單
    ///
    /// 不存在的路徑計為失敗；直接指定但副檔名不符的檔案計為跳過。
    fn collect_videos(&self, inputs: &[PathBuf], result: &mut GenerationResult) -> Vec<PathBuf> {
        let ignore_extension = self.settings.ignore_extension;
        let mut videos = Vec::new();

        for input in inputs {
            if input.is_dir() {
                match scan_video_files(input, ignore_extension) {
                    Ok(files) => {
                        debug!("{} 內找到 {} 個影片檔", input.display(), files.len());
                        videos.extend(files.into_iter().map(|file| file.path));
                    }
                    Err(e) => {
                        error!("掃描資料夾失敗 {}: {e}", input.display());
                        result.total_videos += 1;
                        result.failed += 1;
                    }
                }
            } else if input.is_file() {
                if ignore_extension || is_video_file(input) {
                    videos.push(input.clone());
                } else {
                    println!(
                        "  {} 不是影片檔，跳過: {}",
                        style("⤳").dim(),
                        input.display()
                    );
                    result.total_videos += 1;
                    result.skipped += 1;
                }
            } else {
                error!("找不到檔案: {}", input.display());
                println!("  {} 找不到檔案: {}", style("✗").red(), input.display());
                result.total_videos += 1;
                result.failed += 1;
            }
        }

        videos
    }

    fn print_summary(&self, result: &GenerationResult) {
        println!();
        println!("{}", style("=== 預覽圖生成摘要 ===").cyan().bold());
        println!("  總計: {} 個影片", result.total_videos);
        println!("  成功: {} 個", style(result.successful).green());

        if result.skipped > 0 {
            println!("  跳過: {} 個", style(result.skipped).yellow());
        }

        if result.failed > 0 {
            println!("  失敗: {} 個", style(result.failed).red());
        }

        if result.interrupted {
            println!("  {}", style("已中斷，其餘影片未處理").yellow());
        }

        info!(
            "預覽圖生成完成 - 成功: {}, 跳過: {}, 失敗: {}",
            result.successful, result.skipped, result.failed
        );
    }
}
