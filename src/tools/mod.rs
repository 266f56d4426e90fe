mod color;
mod ffmpeg_processor;
mod ffprobe_info;
mod formatting;
mod media_processor;
mod text_renderer;
mod video_scanner;

pub use color::parse_hex_color;
pub use ffmpeg_processor::FfmpegProcessor;
pub use ffprobe_info::{get_media_info, parse_ffprobe_output};
pub use formatting::{format_seconds, format_timestamp, human_size};
pub use media_processor::{MediaInfo, MediaProcessor};
pub use text_renderer::{SvgTextRenderer, TextRenderer, line_box_height};
pub use video_scanner::{VideoFileInfo, scan_video_files};
