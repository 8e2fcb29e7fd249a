use chrono::{DateTime, Datelike, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s ago")
    } else {
        format!("{count} {unit} ago")
    }
}

/// Relative label for a post or comment timestamp, e.g. "3 hours ago".
///
/// Anything older than a year is shown as a date; the year is omitted when
/// it matches `now`.
pub fn format_relative(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - time).num_seconds();

    if diff < MINUTE {
        return "Just now".to_string();
    }
    if diff < HOUR {
        return plural(diff / MINUTE, "minute");
    }
    if diff < DAY {
        return plural(diff / HOUR, "hour");
    }
    if diff < 2 * DAY {
        return "Yesterday".to_string();
    }
    if diff < WEEK {
        return plural(diff / DAY, "day");
    }
    if diff < MONTH {
        return plural(diff / WEEK, "week");
    }
    if diff < YEAR {
        return plural(diff / MONTH, "month");
    }

    if time.year() == now.year() {
        time.format("%B %-d").to_string()
    } else {
        time.format("%B %-d, %Y").to_string()
    }
}
