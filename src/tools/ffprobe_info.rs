use crate::error::{ContactSheetError, Result};
use crate::tools::MediaInfo;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    codec_name: Option<String>,
    codec_long_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊（只看第一條視訊串流）
pub fn get_media_info(ffprobe: &str, path: &Path) -> Result<MediaInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "-select_streams",
            "v:0",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            ContactSheetError::Probe(format!("無法執行 ffprobe ({ffprobe}): {e}"))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ContactSheetError::Probe(format!(
            "ffprobe 執行失敗 {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let info = parse_ffprobe_output(&path.to_string_lossy(), &stdout)?;

    debug!(
        "影片資訊 {}: {:.2}s, {}x{}, {} fps",
        path.display(),
        info.duration,
        info.width,
        info.height,
        info.framerate
    );

    Ok(info)
}

/// 解析 ffprobe 的 JSON 輸出
pub fn parse_ffprobe_output(filename: &str, json: &str) -> Result<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| ContactSheetError::Probe(format!("無法解析 ffprobe 輸出: {e}")))?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref().is_none_or(|t| t == "video"))
        })
        .ok_or_else(|| ContactSheetError::Probe(format!("找不到視訊串流: {filename}")))?;

    let width = video_stream
        .width
        .ok_or_else(|| ContactSheetError::Probe("無法取得影片寬度".to_string()))?;
    let height = video_stream
        .height
        .ok_or_else(|| ContactSheetError::Probe("無法取得影片高度".to_string()))?;

    // 優先從 format 取得長度，其次從串流；"N/A" 視為沒有
    let duration = probe
        .format
        .as_ref()
        .and_then(|f| parse_number(f.duration.as_deref()))
        .or_else(|| parse_number(video_stream.duration.as_deref()))
        .ok_or_else(|| ContactSheetError::Probe("無法取得影片長度".to_string()))?;

    let filesize = probe
        .format
        .as_ref()
        .and_then(|f| f.size.as_deref())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_default();

    let format = video_stream
        .codec_long_name
        .clone()
        .or_else(|| video_stream.codec_name.clone())
        .unwrap_or_default();

    let framerate = video_stream
        .avg_frame_rate
        .as_deref()
        .map(format_frame_rate)
        .unwrap_or_default();

    Ok(MediaInfo {
        filename: filename.to_string(),
        duration,
        framerate,
        width,
        height,
        format,
        filesize,
    })
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .filter(|v| *v != "N/A")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// 幀率標籤：去掉 "60/1" 這類整數幀率的 "/1"
fn format_frame_rate(rate: &str) -> String {
    rate.strip_suffix("/1").unwrap_or(rate).to_string()
}
