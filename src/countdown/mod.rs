// Human countdown text
use chrono::Duration;

/// Added before decomposing so a few leftover seconds never read "0 minutes"
pub const ROUNDING_BIAS_SECS: i64 = 60;

pub const TIME_PASSED: &str = "Time passed";

/// Format a remaining duration as "1 day, 1 hour, 1 minute".
///
/// Days are dropped when zero. Hours are dropped when zero unless a day
/// segment is shown. Minutes are always present.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds() + ROUNDING_BIAS_SECS;
    if total <= 0 {
        return TIME_PASSED.to_string();
    }

    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(segment(days, "day"));
    }
    if hours > 0 || days > 0 {
        parts.push(segment(hours, "hour"));
    }
    parts.push(segment(minutes, "minute"));

    parts.join(", ")
}

fn segment(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
