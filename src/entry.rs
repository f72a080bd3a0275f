//! Log entries and their severity
//!
//! A [`LogEntry`] is read-only outside the crate. The store bumps its repeat
//! count and last-seen time when the same message recurs in a group.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ParseLevelError;
use crate::time_format;

/// Maximum message length in characters; longer messages are cut at insertion
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
}

impl Level {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
        }
    }

    /// Map a tracing level onto the two severities kept here
    ///
    /// ERROR folds into WARN; TRACE and DEBUG are not kept.
    pub fn from_tracing(level: &tracing::Level) -> Option<Self> {
        match *level {
            tracing::Level::INFO => Some(Level::Info),
            tracing::Level::WARN | tracing::Level::ERROR => Some(Level::Warn),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A single deduplicated log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    group: String,
    message: String,
    level: Level,
    last_seen: DateTime<Utc>,
    count: u32,
}

impl LogEntry {
    /// Create a fresh entry seen once at `now`
    ///
    /// The message is truncated to [`MAX_MESSAGE_CHARS`].
    pub(crate) fn new(
        level: Level,
        group: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            group: group.into(),
            message: truncate_message(message.into()),
            level,
            last_seen: now,
            count: 1,
        }
    }

    /// Record another occurrence of the same message
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.last_seen = now;
    }

    /// Whether this entry holds the given message at the given level
    pub(crate) fn matches(&self, level: Level, message: &str) -> bool {
        self.level == level && self.message == message
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// When this message was last recorded (UTC)
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// How many times this message has been recorded
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Relative time since last seen, e.g. "2m 5s ago"
    ///
    /// Pass `None` for UTC. Invalid timezone names also fall back to UTC.
    pub fn time_ago(&self, timezone: Option<&str>) -> String {
        self.time_ago_at(timezone, Utc::now())
    }

    /// Same as [`LogEntry::time_ago`], measured against a given `now`
    pub fn time_ago_at(&self, timezone: Option<&str>, now: DateTime<Utc>) -> String {
        let tz = time_format::resolve_timezone(timezone.unwrap_or_default());
        time_format::time_ago_at(self.last_seen, now, tz)
    }

    /// Display line: "{time} - [{LEVEL}] {message}", plus " [xN]" when repeated
    pub fn formatted_message(&self, timezone: &str, with_exact_time: bool) -> String {
        self.formatted_message_at(timezone, with_exact_time, Utc::now())
    }

    /// Same as [`LogEntry::formatted_message`], measured against a given `now`
    pub fn formatted_message_at(
        &self,
        timezone: &str,
        with_exact_time: bool,
        now: DateTime<Utc>,
    ) -> String {
        let tz = time_format::resolve_timezone(timezone);
        let time = if with_exact_time {
            time_format::exact_time(self.last_seen, tz)
        } else {
            time_format::time_ago_at(self.last_seen, now, tz)
        };

        let line = format!("{} - [{}] {}", time, self.level, self.message);
        if self.count > 1 {
            format!("{} [x{}]", line, self.count)
        } else {
            line
        }
    }
}

/// Cut a message down to [`MAX_MESSAGE_CHARS`] characters without splitting one
pub(crate) fn truncate_message(mut message: String) -> String {
    if let Some((idx, _)) = message.char_indices().nth(MAX_MESSAGE_CHARS) {
        message.truncate(idx);
    }
    message
}
