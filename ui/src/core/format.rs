//! Formatting helpers for presenting report and dashboard values.

use time::{macros::format_description, OffsetDateTime};

/// Wall-clock stamp for status lines, local time when the platform knows it.
pub fn clock_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_clock(now)
}

pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(&format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "—".to_string())
}

/// Compact UTC stamp for export filenames.
pub fn file_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Integer-looking values drop the fraction; everything else keeps one digit.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub fn format_share(share: f64) -> String {
    if !share.is_finite() {
        return "—".to_string();
    }
    format!("{:.0}%", share * 100.0)
}
