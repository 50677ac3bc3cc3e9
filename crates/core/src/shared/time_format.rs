use std::time::Duration;

/// Formats a duration as `HH:MM:SS`, rounding to the nearest second.
///
/// Hours are not wrapped, so runs longer than a day print e.g. `26:00:00`.
pub fn humanize_duration(duration: Duration) -> String {
    let total = duration.as_secs_f64().round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
