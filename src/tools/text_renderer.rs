use crate::config::MAX_FONT_SIZE;
use crate::error::{ContactSheetError, Result};
use image::{Rgba, RgbaImage};
use log::debug;
use resvg::tiny_skia::{Pixmap, Transform};
use std::sync::Arc;
use usvg::fontdb;

/// 文字方塊的行高（字型大小的 1.3 倍，無條件進位）
#[must_use]
pub const fn line_box_height(font_size: u32) -> u32 {
    font_size.saturating_mul(13).div_ceil(10)
}

/// 文字光柵化能力
///
/// 回傳的圖片即為文字方塊：寬度為字形實際寬度，高度為一行的行高，
/// 基線固定在 `font_size` 處，因此同一字型大小的文字可以直接對齊。
pub trait TextRenderer {
    fn render_text(&self, text: &str, font_size: u32, color: Rgba<u8>) -> Result<RgbaImage>;
}

/// 以 usvg / resvg 繪製文字，字型由 fontdb 依家族名稱查詢
pub struct SvgTextRenderer {
    fontdb: Arc<fontdb::Database>,
    family: String,
}

impl SvgTextRenderer {
    /// 從系統字型中尋找指定家族
    pub fn from_system_fonts(family: &str) -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!("已載入 {} 個系統字型", db.len());
        Self::with_database(db, family)
    }

    pub fn with_database(db: fontdb::Database, family: &str) -> Result<Self> {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        if db.query(&query).is_none() {
            return Err(ContactSheetError::Render(format!("找不到字型: {family}")));
        }

        Ok(Self {
            fontdb: Arc::new(db),
            family: family.to_string(),
        })
    }

    fn build_svg(&self, text: &str, font_size: u32, color: Rgba<u8>) -> String {
        let Rgba([r, g, b, a]) = color;
        // 預留足夠寬度；量測以實際字形範圍為準
        let width = (text.chars().count() + 1) as f32 * font_size as f32 * 2.0;
        let height = line_box_height(font_size);

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{font_size}" font-family="{}" font-size="{font_size}" fill="rgb({r},{g},{b})" fill-opacity="{:.4}">{}</text></svg>"#,
            escape_xml(&self.family),
            f32::from(a) / 255.0,
            escape_xml(text)
        )
    }
}

impl TextRenderer for SvgTextRenderer {
    fn render_text(&self, text: &str, font_size: u32, color: Rgba<u8>) -> Result<RgbaImage> {
        if !(1..=MAX_FONT_SIZE).contains(&font_size) {
            return Err(ContactSheetError::Render(format!(
                "字型大小必須介於 1 到 {MAX_FONT_SIZE}: {font_size}"
            )));
        }
        let svg = self.build_svg(text, font_size, color);

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };

        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| ContactSheetError::Render(format!("無法建立文字圖層: {e}")))?;

        // 字型無法繪製任何字形時，usvg 會直接略過整個文字節點
        if tree.root().children().is_empty() {
            return Err(ContactSheetError::Render(format!(
                "字型 {} 無法繪製文字: {text}",
                self.family
            )));
        }

        let bounds = tree.root().abs_bounding_box();
        let width = (bounds.right().ceil().max(1.0)) as u32;
        let height = line_box_height(font_size);

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ContactSheetError::Render(format!("無法配置文字畫布 {width}x{height}"))
        })?;
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        let data = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| ContactSheetError::Render("文字畫布尺寸不符".to_string()))
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
