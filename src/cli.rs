use crate::config::{OutputFormat, Settings};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 命令列參數
///
/// 只有明確指定的旗標會覆寫設定檔中的值。
#[derive(Parser, Debug)]
#[command(
    name = "video-contact-sheet",
    version,
    about = "為影片產生預覽圖（標頭資訊加上等距縮圖網格）"
)]
pub struct Cli {
    /// 影片檔案或資料夾，資料夾會遞迴掃描
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// 設定檔路徑（JSON），未指定時讀取目前目錄的 settings.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 縮圖張數
    #[arg(short = 'n', long = "number", value_parser = clap::value_parser!(u32).range(1..))]
    pub pics: Option<u32>,

    /// 每列的縮圖數
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// 縮圖之間與外框的間距
    #[arg(long)]
    pub padding: Option<u32>,

    /// 縮圖高度
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub thumb_height: Option<u32>,

    /// 標頭字型大小
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub font_size: Option<u32>,

    /// 時間標籤字型大小
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub timestamp_font_size: Option<u32>,

    /// 字型家族名稱
    #[arg(long)]
    pub font_family: Option<String>,

    /// 輸出格式
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// 背景色（十六進位）
    #[arg(long, value_name = "HEX")]
    pub bg_color: Option<String>,

    /// 標頭文字顏色（十六進位）
    #[arg(long, value_name = "HEX")]
    pub font_color: Option<String>,

    /// JPEG 品質
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub jpg_quality: Option<u8>,

    /// 同時擷取的縮圖上限，0 表示依 CPU 核心數
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// ffmpeg 執行檔路徑
    #[arg(long)]
    pub ffmpeg_path: Option<String>,

    /// ffprobe 執行檔路徑
    #[arg(long)]
    pub ffprobe_path: Option<String>,

    /// 覆寫已存在的預覽圖
    #[arg(short, long)]
    pub overwrite: bool,

    /// 不檢查副檔名
    #[arg(long)]
    pub ignore_extension: bool,

    /// 顯示更多日誌，可重複（-vv）
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// 只顯示錯誤
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 以命令列參數覆寫設定
    pub fn apply_to(&self, settings: &mut Settings) {
        let sheet = &mut settings.sheet;

        if let Some(pics) = self.pics {
            sheet.pics = pics;
        }
        if let Some(columns) = self.columns {
            sheet.columns = columns;
        }
        if let Some(padding) = self.padding {
            sheet.image_padding = padding;
        }
        if let Some(thumb_height) = self.thumb_height {
            sheet.thumb_height = thumb_height;
        }
        if let Some(font_size) = self.font_size {
            sheet.font_size = font_size;
        }
        if let Some(size) = self.timestamp_font_size {
            sheet.timestamp_font_size = size;
        }
        if let Some(family) = &self.font_family {
            sheet.font_family.clone_from(family);
        }
        if let Some(format) = self.format {
            sheet.format = format;
        }
        if let Some(color) = &self.bg_color {
            sheet.bg_color.clone_from(color);
        }
        if let Some(color) = &self.font_color {
            sheet.font_color.clone_from(color);
        }
        if let Some(quality) = self.jpg_quality {
            sheet.jpeg_quality = quality;
        }
        if let Some(jobs) = self.jobs {
            sheet.max_parallel_extractions = jobs;
        }

        if let Some(path) = &self.ffmpeg_path {
            settings.ffmpeg_path.clone_from(path);
        }
        if let Some(path) = &self.ffprobe_path {
            settings.ffprobe_path.clone_from(path);
        }
        if self.overwrite {
            settings.overwrite = true;
        }
        if self.ignore_extension {
            settings.ignore_extension = true;
        }
    }
}
