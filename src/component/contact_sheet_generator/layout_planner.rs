use crate::config::SheetConfig;
use crate::error::{ContactSheetError, Result};
use crate::tools::MediaInfo;

/// 標頭固定三行
const HEADER_LINES: u32 = 3;

/// 預覽圖版面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub thumb_width: u32,
    pub thumb_height: u32,
    pub rows: u32,
    pub columns: u32,
    pub padding: u32,
    /// 標頭每行高度（字型大小 + 4）
    pub line_height: u32,
}

impl Geometry {
    #[must_use]
    pub const fn header_height(&self) -> u32 {
        HEADER_LINES * self.line_height
    }

    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// 第 `index` 格縮圖左上角在畫布上的座標
    #[must_use]
    pub const fn cell_origin(&self, index: u32) -> (u32, u32) {
        let column = index % self.columns;
        let row = index / self.columns;
        (
            self.padding + column * (self.thumb_width + self.padding),
            self.padding + self.header_height() + row * (self.thumb_height + self.padding),
        )
    }
}

/// 依設定與影片尺寸計算版面
///
/// 縮圖寬度依影片長寬比由縮圖高度推得；尺寸為 0 或溢位時回傳版面錯誤。
pub fn plan(config: &SheetConfig, info: &MediaInfo) -> Result<Geometry> {
    if info.height == 0 {
        return Err(layout_error(format!("影片高度為 0: {}", info.filename)));
    }
    if info.width == 0 {
        return Err(layout_error(format!("影片寬度為 0: {}", info.filename)));
    }
    if config.pics == 0 || config.columns == 0 || config.thumb_height == 0 {
        return Err(layout_error(format!(
            "張數、欄數與縮圖高度必須大於 0 (pics={}, columns={}, thumb_height={})",
            config.pics, config.columns, config.thumb_height
        )));
    }

    let thumb_height = config.thumb_height;
    let thumb_width =
        (f64::from(thumb_height) * f64::from(info.width) / f64::from(info.height)).round();
    if thumb_width < 1.0 || thumb_width > f64::from(u32::MAX) {
        return Err(layout_error(format!(
            "縮圖寬度無效: {thumb_width} ({}x{})",
            info.width, info.height
        )));
    }
    let thumb_width = thumb_width as u32;

    let columns = config.columns;
    let rows = config.pics.div_ceil(columns);
    let padding = config.image_padding;
    let line_height = config.line_height_checked()?;

    let overflow = || layout_error("預覽圖尺寸過大".to_string());

    // padding + 標頭三行 + 每列 (縮圖高度 + padding)
    let canvas_height = HEADER_LINES
        .checked_mul(line_height)
        .and_then(|header| header.checked_add(padding))
        .and_then(|top| {
            thumb_height
                .checked_add(padding)
                .and_then(|row| row.checked_mul(rows))
                .and_then(|grid| grid.checked_add(top))
        })
        .ok_or_else(overflow)?;

    // 左右 padding + 所有縮圖 + 縮圖間 padding
    let canvas_width = columns
        .checked_mul(thumb_width)
        .and_then(|thumbs| {
            padding
                .checked_mul(columns - 1)
                .and_then(|gaps| gaps.checked_add(thumbs))
        })
        .and_then(|inner| padding.checked_mul(2).and_then(|border| border.checked_add(inner)))
        .ok_or_else(overflow)?;

    Ok(Geometry {
        canvas_width,
        canvas_height,
        thumb_width,
        thumb_height,
        rows,
        columns,
        padding,
        line_height,
    })
}

impl SheetConfig {
    fn line_height_checked(&self) -> Result<u32> {
        self.font_size
            .checked_add(4)
            .ok_or_else(|| layout_error(format!("字型大小過大: {}", self.font_size)))
    }
}

fn layout_error(message: String) -> ContactSheetError {
    ContactSheetError::Layout(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_info(width: u32, height: u32) -> MediaInfo {
        MediaInfo {
            filename: "movie.mp4".to_string(),
            duration: 120.0,
            framerate: "24".to_string(),
            width,
            height,
            format: "h264".to_string(),
            filesize: 0,
        }
    }

    #[test]
    fn test_thumb_width_preserves_aspect_ratio() {
        let geometry = plan(&SheetConfig::default(), &media_info(1920, 1080)).unwrap();
        assert_eq!(geometry.thumb_width, 356);
        assert_eq!(geometry.thumb_height, 200);

        let geometry = plan(&SheetConfig::default(), &media_info(640, 480)).unwrap();
        assert_eq!(geometry.thumb_width, 267);
    }

    #[test]
    fn test_rows_round_up() {
        let config = |pics| SheetConfig {
            pics,
            columns: 6,
            ..SheetConfig::default()
        };
        let info = media_info(1920, 1080);

        assert_eq!(plan(&config(6), &info).unwrap().rows, 1);
        assert_eq!(plan(&config(7), &info).unwrap().rows, 2);
        assert_eq!(plan(&config(12), &info).unwrap().rows, 2);
        assert_eq!(plan(&config(1), &info).unwrap().rows, 1);

        for pics in 1..=30 {
            for columns in 1..=8 {
                let config = SheetConfig {
                    pics,
                    columns,
                    ..SheetConfig::default()
                };
                let rows = plan(&config, &info).unwrap().rows;
                assert_eq!(rows, pics.div_ceil(columns));
                assert!(rows * columns >= pics);
                assert!((rows - 1) * columns < pics);
            }
        }
    }

    #[test]
    fn test_canvas_dimensions() {
        let config = SheetConfig {
            pics: 7,
            columns: 3,
            image_padding: 8,
            thumb_height: 100,
            font_size: 16,
            ..SheetConfig::default()
        };
        let geometry = plan(&config, &media_info(1600, 900)).unwrap();

        // 100 * 1600 / 900 = 177.78
        assert_eq!(geometry.thumb_width, 178);
        assert_eq!(geometry.rows, 3);
        assert_eq!(geometry.canvas_height, 8 + 3 * 20 + 3 * (100 + 8));
        assert_eq!(geometry.canvas_width, 2 * 8 + 3 * 178 + 2 * 8);
    }

    #[test]
    fn test_zero_padding() {
        let config = SheetConfig {
            pics: 2,
            columns: 2,
            image_padding: 0,
            thumb_height: 10,
            font_size: 6,
            ..SheetConfig::default()
        };
        let geometry = plan(&config, &media_info(20, 10)).unwrap();

        assert_eq!(geometry.canvas_width, 40);
        assert_eq!(geometry.canvas_height, 30 + 10);
    }

    #[test]
    fn test_cell_origin() {
        let config = SheetConfig {
            pics: 5,
            columns: 2,
            image_padding: 4,
            thumb_height: 10,
            font_size: 6,
            ..SheetConfig::default()
        };
        let geometry = plan(&config, &media_info(20, 10)).unwrap();
        let top = 4 + 3 * 10;

        assert_eq!(geometry.cell_origin(0), (4, top));
        assert_eq!(geometry.cell_origin(1), (4 + 24, top));
        assert_eq!(geometry.cell_origin(2), (4, top + 14));
        assert_eq!(geometry.cell_origin(4), (4, top + 28));
    }

    #[test]
    fn test_zero_height_is_layout_error() {
        let result = plan(&SheetConfig::default(), &media_info(1920, 0));
        assert!(matches!(result, Err(ContactSheetError::Layout(_))));
    }

    #[test]
    fn test_degenerate_dimensions_are_layout_errors() {
        assert!(plan(&SheetConfig::default(), &media_info(0, 1080)).is_err());

        // 極窄影片讓縮圖寬度四捨五入為 0
        let config = SheetConfig {
            thumb_height: 1,
            ..SheetConfig::default()
        };
        assert!(plan(&config, &media_info(1, 1000)).is_err());

        let config = SheetConfig {
            columns: 0,
            ..SheetConfig::default()
        };
        assert!(plan(&config, &media_info(1920, 1080)).is_err());
    }

    #[test]
    fn test_overflow_is_layout_error() {
        let config = SheetConfig {
            pics: u32::MAX,
            columns: 1,
            thumb_height: 1_000_000,
            ..SheetConfig::default()
        };
        assert!(matches!(
            plan(&config, &media_info(1920, 1080)),
            Err(ContactSheetError::Layout(_))
        ));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let info = media_info(1280, 720);
        let config = SheetConfig::default();
        assert_eq!(plan(&config, &info).unwrap(), plan(&config, &info).unwrap());
    }
}
