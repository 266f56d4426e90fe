use crate::config::types::Settings;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// 未指定設定檔時，於工作目錄尋找的預設設定檔
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl Settings {
    /// 載入設定
    ///
    /// 明確指定的設定檔必須存在；未指定時才退回工作目錄的
    /// `settings.json`，兩者都沒有則使用預設值。
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    debug!("找不到 {DEFAULT_SETTINGS_FILE}，使用預設設定");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取設定檔: {}", path.display()))?;

        let settings = serde_json::from_str(&content)
            .with_context(|| format!("無法解析設定檔: {}", path.display()))?;

        debug!("已載入設定檔: {}", path.display());
        Ok(settings)
    }
}
