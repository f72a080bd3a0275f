//! Relative and absolute time formatting for log entries
//!
//! Pure functions over a UTC timestamp and a timezone identifier. Unknown or
//! empty identifiers fall back to UTC instead of failing.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// RFC 822 style layout used whenever an absolute timestamp is rendered
pub const EXACT_TIME_FORMAT: &str = "%d %b %y %H:%M %Z";

/// Timezone used when none is given or the given one can't be resolved
pub const DEFAULT_TIMEZONE: Tz = Tz::UTC;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Resolve a timezone identifier (e.g. "UTC", "EST", "Europe/Berlin")
///
/// Never fails: anything the tz database doesn't know maps to UTC.
pub fn resolve_timezone(name: &str) -> Tz {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_TIMEZONE;
    }
    name.parse::<Tz>().unwrap_or(DEFAULT_TIMEZONE)
}

/// Format a timestamp as an absolute calendar string in the given timezone
pub fn exact_time(timestamp: DateTime<Utc>, tz: Tz) -> String {
    timestamp
        .with_timezone(&tz)
        .format(EXACT_TIME_FORMAT)
        .to_string()
}

/// Format the time elapsed since `timestamp`, measured against the current time
pub fn time_ago(timestamp: DateTime<Utc>, tz: Tz) -> String {
    time_ago_at(timestamp, Utc::now(), tz)
}

/// Format the time elapsed between `timestamp` and `now`
///
/// Under a minute: "Ns ago". Under an hour: "Nm Ns ago". Under a day:
/// "Nh ago" or "Nh Nm ago". Anything older is rendered as an absolute
/// timestamp in `tz`.
pub fn time_ago_at(timestamp: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    // Clock skew can put the entry in the future; treat that as "just now"
    let secs = (now - timestamp).num_seconds().max(0);

    if secs < MINUTE {
        format!("{}s ago", secs)
    } else if secs < HOUR {
        format!("{}m {}s ago", secs / MINUTE, secs % MINUTE)
    } else if secs < DAY {
        let hours = secs / HOUR;
        let minutes = (secs / MINUTE) % 60;
        if minutes == 0 {
            format!("{}h ago", hours)
        } else {
            format!("{}h {}m ago", hours, minutes)
        }
    } else {
        exact_time(timestamp, tz)
    }
}
