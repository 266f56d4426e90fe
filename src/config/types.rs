use crate::error::{ContactSheetError, Result};
use crate::tools::parse_hex_color;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 預覽圖輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpg,
    Png,
}

impl OutputFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 字型大小上限（像素）
pub const MAX_FONT_SIZE: u32 = 1000;

/// 預覽圖版面與繪製設定
///
/// 列數與縮圖寬度由影片資訊推導，不在此設定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// 截圖張數
    pub pics: u32,
    /// 每列欄數
    pub columns: u32,
    /// 外框與縮圖間距（像素）
    pub image_padding: u32,
    /// 縮圖高度（像素）
    pub thumb_height: u32,
    /// 標頭字型大小
    pub font_size: u32,
    /// 縮圖時間標籤字型大小
    pub timestamp_font_size: u32,
    pub font_family: String,
    pub format: OutputFormat,
    /// 背景色（十六進位）
    pub bg_color: String,
    /// 標頭文字顏色（十六進位）
    pub font_color: String,
    /// JPEG 品質 (0-100)
    pub jpeg_quality: u8,
    /// 同時擷取縮圖的上限，0 表示依 CPU 核心數
    pub max_parallel_extractions: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            pics: 6,
            columns: 6,
            image_padding: 8,
            thumb_height: 200,
            font_size: 16,
            timestamp_font_size: 10,
            font_family: "DejaVu Sans".to_string(),
            format: OutputFormat::Jpg,
            bg_color: "333333".to_string(),
            font_color: "DDDDDD".to_string(),
            jpeg_quality: 85,
            max_parallel_extractions: 0,
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pics < 1 {
            return Err(invalid("pics 必須大於 0"));
        }
        if self.columns < 1 {
            return Err(invalid("columns 必須大於 0"));
        }
        if self.thumb_height < 1 {
            return Err(invalid("thumb_height 必須大於 0"));
        }
        if !(1..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(invalid("font_size 必須介於 1 到 1000"));
        }
        if !(1..=MAX_FONT_SIZE).contains(&self.timestamp_font_size) {
            return Err(invalid("timestamp_font_size 必須介於 1 到 1000"));
        }
        if self.font_family.trim().is_empty() {
            return Err(invalid("未設定 font_family"));
        }
        if self.jpeg_quality > 100 {
            return Err(invalid("jpeg_quality 必須介於 0 到 100"));
        }
        parse_hex_color(&self.bg_color)?;
        parse_hex_color(&self.font_color)?;
        Ok(())
    }
}

/// 完整執行設定：版面設定加上外部工具與檔案處理選項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub sheet: SheetConfig,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// 覆寫既有的預覽圖
    pub overwrite: bool,
    /// 不檢查副檔名，所有輸入檔案都嘗試處理
    pub ignore_extension: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet: SheetConfig::default(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            overwrite: false,
            ignore_extension: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.sheet.validate()?;
        if self.ffmpeg_path.trim().is_empty() {
            return Err(invalid("未設定 ffmpeg 路徑"));
        }
        if self.ffprobe_path.trim().is_empty() {
            return Err(invalid("未設定 ffprobe 路徑"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ContactSheetError {
    ContactSheetError::InvalidConfig(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SheetConfig::default().validate().is_ok());
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let config = SheetConfig {
            pics: 0,
            ..SheetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ContactSheetError::InvalidConfig(_))
        ));

        let config = SheetConfig {
            columns: 0,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SheetConfig {
            thumb_height: 0,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_strings() {
        let config = SheetConfig {
            font_family: "  ".to_string(),
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SheetConfig {
            bg_color: "zzz999".to_string(),
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());

        let settings = Settings {
            ffprobe_path: String::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_fonts() {
        let config = SheetConfig {
            font_size: MAX_FONT_SIZE,
            timestamp_font_size: MAX_FONT_SIZE,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = SheetConfig {
            font_size: u32::MAX,
            ..SheetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ContactSheetError::InvalidConfig(_))
        ));

        let config = SheetConfig {
            timestamp_font_size: MAX_FONT_SIZE + 1,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_quality_over_100() {
        let config = SheetConfig {
            jpeg_quality: 101,
            ..SheetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{"pics": 12, "format": "png", "overwrite": true}"#).unwrap();

        assert_eq!(settings.sheet.pics, 12);
        assert_eq!(settings.sheet.format, OutputFormat::Png);
        assert!(settings.overwrite);
        assert_eq!(settings.sheet.columns, 6);
        assert_eq!(settings.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }
}
