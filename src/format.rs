use chrono::{DateTime, Local, TimeZone};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a byte count as mebibytes with exactly two decimals, e.g. `"13.52"`.
pub fn format_mebibytes(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    format!("{:.2}", bytes as f64 / MIB)
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Local-time rendering of seconds since the Unix epoch.
pub fn format_unix_secs(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(format_timestamp(&utc.with_timezone(&Local)))
}

pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}
