//! E2E 測試
//!
//! 使用真實的 ffmpeg / ffprobe 與系統字型；缺少任何一項時跳過。

use std::path::{Path, PathBuf};
use std::process::Command;

use image::GenericImageView;
use video_contact_sheet::component::contact_sheet_generator::{create_contact_sheet, plan};
use video_contact_sheet::config::{OutputFormat, SheetConfig};
use video_contact_sheet::tools::{FfmpegProcessor, MediaProcessor, SvgTextRenderer};

fn tool_available(name: &str) -> bool {
    Command::new(name)
        .arg("-version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// 以 ffmpeg 內建的測試畫面產生一段 320x180、10 秒的影片
fn generate_test_video(dir: &Path) -> Option<PathBuf> {
    let path = dir.join("testsrc.mp4");
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=10:size=320x180:rate=25",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(&path)
        .status()
        .ok()?;

    status.success().then_some(path)
}

#[test]
fn test_contact_sheet_with_ffmpeg_e2e() {
    if !tool_available("ffmpeg") || !tool_available("ffprobe") {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }

    let config = SheetConfig {
        pics: 4,
        columns: 2,
        thumb_height: 90,
        format: OutputFormat::Png,
        ..SheetConfig::default()
    };

    let Ok(renderer) = SvgTextRenderer::from_system_fonts(&config.font_family) else {
        println!("跳過測試：系統沒有 {} 字型", config.font_family);
        return;
    };

    let dir = tempfile::tempdir().unwrap();
    let Some(video) = generate_test_video(dir.path()) else {
        println!("跳過測試：無法產生測試影片");
        return;
    };

    let processor = FfmpegProcessor::default();
    let info = processor.probe(&video).unwrap();
    assert_eq!((info.width, info.height), (320, 180));
    assert!((info.duration - 10.0).abs() < 0.5);
    assert_eq!(info.framerate, "25");

    let output = create_contact_sheet(&video, &config, &processor, &renderer).unwrap();
    assert_eq!(output, dir.path().join("testsrc.mp4.png"));

    // 縮圖 160x90，2 列 2 欄
    let sheet = image::open(&output).unwrap();
    let line_height = plan(&config, &info).unwrap().line_height;
    assert_eq!(sheet.width(), 8 + 2 * (160 + 8));
    assert_eq!(sheet.height(), 8 + 3 * line_height + 2 * (90 + 8));
    assert_eq!(sheet.get_pixel(0, 0).0, [0x33, 0x33, 0x33, 255]);

    println!("✓ 預覽圖已建立: {}", output.display());
}

#[test]
fn test_missing_video_fails_e2e() {
    if !tool_available("ffprobe") {
        println!("跳過測試：找不到 ffprobe");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let processor = FfmpegProcessor::default();
    assert!(processor.probe(&dir.path().join("nothing.mp4")).is_err());
}
