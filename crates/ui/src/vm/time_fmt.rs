use chrono::{DateTime, Duration, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `1h 02m 03s`, `4m 05s` or `6s`.
#[must_use]
pub fn format_duration(value: Duration) -> String {
    let total = value.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::seconds(6)), "6s");
        assert_eq!(format_duration(Duration::seconds(245)), "4m 05s");
        assert_eq!(format_duration(Duration::seconds(3723)), "1h 02m 03s");
        assert_eq!(format_duration(Duration::seconds(-3)), "0s");
    }
}
