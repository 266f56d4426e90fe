pub mod file_type;
pub mod load;
pub mod types;

pub use file_type::{VIDEO_EXTENSIONS, is_video_file};
pub use load::DEFAULT_SETTINGS_FILE;
pub use types::{MAX_FONT_SIZE, OutputFormat, Settings, SheetConfig};
