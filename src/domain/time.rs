//! Human-readable timestamps

use chrono::{DateTime, TimeDelta, Utc};

/// "just now", "5 minutes ago", "3 hours ago", "2 days ago", then the date.
/// Timestamps in the future read as "just now".
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        format_date(timestamp)
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// "2d 4h left", "3h 15m left", "12m left" or "expired"
pub fn format_time_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = deadline.signed_duration_since(now);
    if remaining.num_seconds() <= 0 {
        return "expired".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h left", days, hours)
    } else if hours > 0 {
        format!("{}h {}m left", hours, minutes)
    } else {
        format!("{}m left", minutes)
    }
}

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

pub fn format_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Parse a deadline given as an RFC 3339 timestamp or an offset from `now`
/// such as `90m`, `36h` or `7d`
pub fn parse_deadline(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }

    let unit_start = input.char_indices().last().map(|(i, _)| i).unwrap_or(0);
    let (number, unit) = input.split_at(unit_start);
    let amount: i64 = number
        .parse()
        .map_err(|_| format!("expected an RFC 3339 timestamp or a duration like 36h or 7d, got '{}'", input))?;
    let offset = match unit {
        "m" => TimeDelta::try_minutes(amount),
        "h" => TimeDelta::try_hours(amount),
        "d" => TimeDelta::try_days(amount),
        _ => return Err(format!("unknown duration unit in '{}', use m, h or d", input)),
    };
    offset
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| format!("duration '{}' is out of range", input))
}
