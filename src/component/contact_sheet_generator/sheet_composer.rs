use super::frame_sampler::FrameSample;
use super::layout_planner::Geometry;
use crate::config::SheetConfig;
use crate::error::{ContactSheetError, Result};
use crate::tools::{MediaInfo, TextRenderer, format_seconds, human_size, parse_hex_color};
use image::{Rgba, RgbaImage, imageops};
use log::debug;

/// 時間標籤底色：黑色，不透明度 0.7
const BADGE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 179]);
const BADGE_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 底色相對文字方塊向左上延伸的像素
const BADGE_MARGIN_LEADING: u32 = 2;
/// 底色相對文字方塊向右下延伸的像素
const BADGE_MARGIN_TRAILING: u32 = 4;

/// 將標頭與縮圖網格繪製到單一畫布
///
/// 字型查詢由注入的 [`TextRenderer`] 負責；繪製在單一執行緒進行，
/// 相同輸入一定得到相同的像素。
pub struct SheetComposer<'a, R: TextRenderer + ?Sized> {
    config: &'a SheetConfig,
    renderer: &'a R,
}

impl<'a, R: TextRenderer + ?Sized> SheetComposer<'a, R> {
    pub const fn new(config: &'a SheetConfig, renderer: &'a R) -> Self {
        Self { config, renderer }
    }

    pub fn compose(
        &self,
        info: &MediaInfo,
        geometry: &Geometry,
        frames: &[FrameSample],
    ) -> Result<RgbaImage> {
        let background = parse_hex_color(&self.config.bg_color)?;
        let foreground = parse_hex_color(&self.config.font_color)?;

        debug!(
            "繪製預覽圖 {}x{} ({} 張縮圖)",
            geometry.canvas_width,
            geometry.canvas_height,
            frames.len()
        );

        let mut canvas =
            RgbaImage::from_pixel(geometry.canvas_width, geometry.canvas_height, background);

        self.draw_header(&mut canvas, info, geometry, foreground)?;

        for frame in frames {
            self.draw_cell(&mut canvas, geometry, frame)?;
        }

        Ok(canvas)
    }

    fn draw_header(
        &self,
        canvas: &mut RgbaImage,
        info: &MediaInfo,
        geometry: &Geometry,
        color: Rgba<u8>,
    ) -> Result<()> {
        let lines = header_lines(info);
        let right_edge = i64::from(geometry.canvas_width) - i64::from(geometry.padding);

        for (line, (left, right)) in (0u32..).zip(lines.iter()) {
            let y = i64::from(geometry.padding + line * geometry.line_height);

            let left_text = self
                .renderer
                .render_text(left, self.config.font_size, color)?;
            imageops::overlay(canvas, &left_text, i64::from(geometry.padding), y);

            let right_text = self
                .renderer
                .render_text(right, self.config.font_size, color)?;
            let x = right_edge - i64::from(right_text.width());
            imageops::overlay(canvas, &right_text, x, y);
        }

        Ok(())
    }

    fn draw_cell(
        &self,
        canvas: &mut RgbaImage,
        geometry: &Geometry,
        frame: &FrameSample,
    ) -> Result<()> {
        let index = u32::try_from(frame.index)
            .ok()
            .filter(|index| *index < geometry.cell_count())
            .ok_or_else(|| {
                ContactSheetError::Layout(format!(
                    "縮圖索引 {} 超出網格 {}x{}",
                    frame.index, geometry.columns, geometry.rows
                ))
            })?;

        let (x, y) = geometry.cell_origin(index);
        let (x, y) = (i64::from(x), i64::from(y));
        imageops::overlay(canvas, &frame.image, x, y);

        let label = self.renderer.render_text(
            &frame.timestamp_label,
            self.config.timestamp_font_size,
            BADGE_TEXT_COLOR,
        )?;

        // 文字右下角距離縮圖右下角 padding 像素
        let padding = i64::from(geometry.padding);
        let text_x = x + i64::from(geometry.thumb_width) - padding - i64::from(label.width());
        let text_y = y + i64::from(geometry.thumb_height) - padding - i64::from(label.height());

        let margin = BADGE_MARGIN_LEADING + BADGE_MARGIN_TRAILING;
        let badge = RgbaImage::from_pixel(
            label.width() + margin,
            label.height() + margin,
            BADGE_COLOR,
        );
        let leading = i64::from(BADGE_MARGIN_LEADING);
        imageops::overlay(canvas, &badge, text_x - leading, text_y - leading);
        imageops::overlay(canvas, &label, text_x, text_y);

        Ok(())
    }
}

/// 標頭三行，每行為（靠左文字, 靠右文字）
#[must_use]
fn header_lines(info: &MediaInfo) -> [(String, String); 3] {
    [
        (
            format!("Filename: {}", info.filename),
            format!("Dimensions: {}x{}", info.width, info.height),
        ),
        (
            format!("Duration: {}", format_seconds(info.duration)),
            format!("Format: {}", info.format),
        ),
        (
            format!("File size: {}", human_size(info.filesize)),
            format!("Fps: {}", info.framerate),
        ),
    ]
}
