use crate::config::OutputFormat;
use crate::error::{ContactSheetError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use log::debug;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 預覽圖檔名：在原始檔名後加上輸出副檔名（`movie.mp4` → `movie.mp4.jpg`）
#[must_use]
pub fn output_path_for(video: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(video.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// 在記憶體中編碼預覽圖
///
/// JPEG 不支援透明度，先轉為 RGB；品質限制在 1 到 100。
pub fn encode_sheet(canvas: &RgbaImage, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    match format {
        OutputFormat::Jpg => {
            let rgb = DynamicImage::ImageRgba8(canvas.clone()).into_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
                .map_err(|e| ContactSheetError::Encoding(e.to_string()))?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            canvas
                .write_with_encoder(encoder)
                .map_err(|e| ContactSheetError::Encoding(e.to_string()))?;
        }
    }

    Ok(buffer)
}

/// 編碼完成後才寫入目標檔案
///
/// 先寫到同目錄的暫存檔，成功後才改名覆蓋目標；任何一步失敗，
/// 目標路徑維持原狀（不存在或保留舊的預覽圖）。
pub fn write_sheet(
    canvas: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let bytes = encode_sheet(canvas, format, jpeg_quality)?;
    debug!("寫入預覽圖 {} ({} bytes)", path.display(), bytes.len());
    replace_file(path, |file| file.write_all(&bytes))
}

/// 以暫存檔加改名的方式寫入，暫存檔在失敗時隨 drop 刪除
fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(parent)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    // 暫存檔預設只有擁有者可讀
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        temp.as_file().set_permissions(Permissions::from_mode(0o644))?;
    }

    temp.persist(path).map_err(|e| ContactSheetError::Io(e.error))?;
    Ok(())
}
