use env_logger::{Builder, Env};
use log::{LevelFilter, debug};

/// 依命令列旗標決定預設日誌等級
///
/// 進度已經直接輸出到終端機，預設只顯示警告；`RUST_LOG` 優先於旗標。
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .init();

    debug!("日誌等級: {level}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
