//! Human-readable durations.

use chrono::Duration;

/// Formats the time left before a link expires.
///
/// Whole hours and minutes only, rounded down: `"2h 5m remaining"`,
/// `"12m remaining"`, and `"Expired"` once nothing is left.
pub fn format_time_remaining(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "Expired".to_string();
    }

    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m remaining")
    } else {
        format!("{minutes}m remaining")
    }
}
