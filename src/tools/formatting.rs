/// 將秒數格式化為 `m:ss`，超過 60 分鐘時為 `h:mm:ss`
///
/// 門檻是 `minutes > 60`：剛好 60 分鐘仍顯示為 `60:00`，
/// 61 分鐘起才進位到小時。
#[must_use]
pub fn format_timestamp(total_seconds: u64) -> String {
    let mut minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    if minutes > 60 {
        let hours = minutes / 60;
        minutes %= 60;
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// 秒數（浮點）截斷為整秒後格式化
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format_timestamp(whole)
}

const SIZE_UNITS: [(&str, u64); 6] = [
    ("EB", 1 << 60),
    ("PB", 1 << 50),
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
];

/// 以 1024 為基底的人類可讀檔案大小，例如 `1.5 MB`
#[must_use]
pub fn human_size(bytes: u64) -> String {
    SIZE_UNITS
        .iter()
        .find(|(_, unit)| bytes > *unit)
        .map_or_else(
            || format!("{bytes} B"),
            |(label, unit)| format!("{:.1} {label}", bytes as f64 / *unit as f64),
        )
}
