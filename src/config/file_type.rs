use std::path::Path;

/// 視為影片檔的副檔名（小寫，不含點）
pub const VIDEO_EXTENSIONS: [&str; 22] = [
    "3gp", "amv", "asf", "avi", "flv", "gif", "gifv", "m4v", "mkv", "mp4", "mpg", "mpeg", "mts",
    "ts", "ogv", "ogg", "rm", "rmvb", "vob", "webm", "wmv", "yuv",
];

#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
}
