use chrono::{DateTime, Utc};

/// `mm:ss` display for a countdown.
#[must_use]
pub fn format_countdown(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}
