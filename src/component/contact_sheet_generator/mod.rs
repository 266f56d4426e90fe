//! 影片預覽圖生成元件
//!
//! 流程：
//! A. 取得影片資訊（ffprobe）
//! B. 計算版面
//! C. 平行擷取等距縮圖
//! D. 繪製標頭與縮圖網格
//! E. 編碼並寫出預覽圖

mod frame_sampler;
mod layout_planner;
mod main;
mod sheet_composer;
mod sheet_encoder;

pub use frame_sampler::{FrameSample, FrameSampler, sample_timestamps};
pub use layout_planner::{Geometry, plan};
pub use main::{ContactSheetGenerator, GenerationResult, create_contact_sheet};
pub use sheet_composer::SheetComposer;
pub use sheet_encoder::{encode_sheet, output_path_for, write_sheet};
