use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn since_epoch(time: SystemTime) -> Duration {
    // clocks set before 1970 collapse to the epoch
    time.duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// Seconds since the Unix epoch, with sub-second precision.
pub fn unix_seconds(time: SystemTime) -> f64 {
    since_epoch(time).as_secs_f64()
}

/// Format a wall-clock time as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_datetime(time: SystemTime) -> String {
    let (date, (hours, minutes, seconds)) = split(time);
    format!("{} {:02}:{:02}:{:02}", date, hours, minutes, seconds)
}

/// Format current time as `YYYY-MM-DDTHH:MM:SS` (UTC).
pub fn format_timestamp() -> String {
    let (date, (hours, minutes, seconds)) = split(SystemTime::now());
    format!("{}T{:02}:{:02}:{:02}", date, hours, minutes, seconds)
}

/// Format current date as `YYYY-MM-DD` (UTC).
pub fn format_today() -> String {
    split(SystemTime::now()).0
}

fn split(time: SystemTime) -> (String, (u64, u64, u64)) {
    let secs = since_epoch(time).as_secs();
    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let (year, month, day) = civil_from_days(days as i64);
    (
        format!("{:04}-{:02}-{:02}", year, month, day),
        (time_of_day / 3600, (time_of_day % 3600) / 60, time_of_day % 60),
    )
}

/// Convert days since Unix epoch to civil date (year, month, day)
/// Uses Howard Hinnant's algorithm (public domain)
/// http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
