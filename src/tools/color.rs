use crate::error::{ContactSheetError, Result};
use image::Rgba;

/// 解析十六進位顏色字串
///
/// 接受可選的 `#` 前綴，以及 `rgb`、`rrggbb`、`rrggbbaa` 三種長度。
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    let invalid = || ContactSheetError::InvalidConfig(format!("無效的顏色值: {value}"));

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                *slot = v * 17;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 => Ok(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ])),
        _ => Err(invalid()),
    }
}
