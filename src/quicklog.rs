//! Public facade over [`GroupStore`]
//!
//! Callers depend on the [`Quicklog`] trait and hold an `Arc<dyn Quicklog>`.
//! [`MemoryQuicklog`] keeps entries; [`NoopQuicklog`] discards everything so
//! logging can be turned off without callers branching.

use std::collections::BTreeMap;
use std::fmt;

use crate::entry::{Level, LogEntry};
use crate::store::{GroupStore, DEFAULT_CAPACITY};

/// In-memory "what just happened" log, grouped by name
pub trait Quicklog: Send + Sync {
    /// Record a message at the given severity
    fn record(&self, level: Level, group: &str, args: fmt::Arguments<'_>);

    /// Names of all groups with recorded entries
    fn groups(&self) -> Vec<String>;

    /// A group's entries, newest first
    fn entries(&self, group: &str) -> Vec<LogEntry>;

    /// Display lines per group, optionally limited to groups with a name prefix
    fn export_snapshot(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: Option<&str>,
    ) -> BTreeMap<String, Vec<String>>;

    /// Clear one group, or all of them
    fn reset(&self, group: Option<&str>);

    /// Record at INFO. Use with `format_args!` or [`quicklog_info!`](crate::quicklog_info)
    fn info(&self, group: &str, args: fmt::Arguments<'_>) {
        self.record(Level::Info, group, args);
    }

    /// Record at WARN. Use with `format_args!` or [`quicklog_warn!`](crate::quicklog_warn)
    fn warn(&self, group: &str, args: fmt::Arguments<'_>) {
        self.record(Level::Warn, group, args);
    }

    /// Record plain text at INFO
    fn info_str(&self, group: &str, message: &str) {
        self.record(Level::Info, group, format_args!("{}", message));
    }

    /// Record plain text at WARN
    fn warn_str(&self, group: &str, message: &str) {
        self.record(Level::Warn, group, format_args!("{}", message));
    }
}

/// Record a formatted INFO message: `quicklog_info!(log, "group", "x = {}", x)`
#[macro_export]
macro_rules! quicklog_info {
    ($log:expr, $group:expr, $($arg:tt)+) => {
        {
            use $crate::Quicklog as _;
            $log.info($group, format_args!($($arg)+))
        }
    };
}

/// Record a formatted WARN message: `quicklog_warn!(log, "group", "x = {}", x)`
#[macro_export]
macro_rules! quicklog_warn {
    ($log:expr, $group:expr, $($arg:tt)+) => {
        {
            use $crate::Quicklog as _;
            $log.warn($group, format_args!($($arg)+))
        }
    };
}

/// Quicklog backed by a bounded in-memory [`GroupStore`]
#[derive(Debug, Default)]
pub struct MemoryQuicklog {
    store: GroupStore,
}

impl MemoryQuicklog {
    /// Create a quicklog with the default capacity of 40 entries per group
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a quicklog keeping up to `capacity` entries per group (1..=500)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: GroupStore::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Underlying store, for callers that need explicit timestamps
    pub fn store(&self) -> &GroupStore {
        &self.store
    }
}

impl Quicklog for MemoryQuicklog {
    fn record(&self, level: Level, group: &str, args: fmt::Arguments<'_>) {
        self.store.record(level, group, args);
    }

    fn groups(&self) -> Vec<String> {
        self.store.groups()
    }

    fn entries(&self, group: &str) -> Vec<LogEntry> {
        self.store.entries(group)
    }

    fn export_snapshot(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: Option<&str>,
    ) -> BTreeMap<String, Vec<String>> {
        self.store.export_snapshot(timezone, with_exact_time, group_prefix)
    }

    fn reset(&self, group: Option<&str>) {
        self.store.reset(group);
    }
}

/// Quicklog that accepts every write and remembers nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopQuicklog;

impl Quicklog for NoopQuicklog {
    fn record(&self, _level: Level, _group: &str, _args: fmt::Arguments<'_>) {}

    fn groups(&self) -> Vec<String> {
        Vec::new()
    }

    fn entries(&self, _group: &str) -> Vec<LogEntry> {
        Vec::new()
    }

    fn export_snapshot(
        &self,
        _timezone: &str,
        _with_exact_time: bool,
        _group_prefix: Option<&str>,
    ) -> BTreeMap<String, Vec<String>> {
        BTreeMap::new()
    }

    fn reset(&self, _group: Option<&str>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_quicklog_info_and_warn() {
        let log = MemoryQuicklog::new();
        log.info("g1", format_args!("hi"));
        log.info("g1", format_args!("test"));
        log.warn("g1", format_args!("test"));
        log.warn("g1", format_args!("test"));

        let entries = log.entries("g1");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level(), Level::Warn);
        assert_eq!(entries[0].count(), 2);
        assert_eq!(entries[1].level(), Level::Info);
        assert_eq!(entries[1].message(), "test");
        assert_eq!(entries[2].message(), "hi");
    }

    #[test]
    fn test_macros() {
        let log: Arc<dyn Quicklog> = Arc::new(MemoryQuicklog::with_capacity(5));
        let attempts = 3;
        crate::quicklog_info!(log, "auth", "retrying after {} attempts", attempts);
        crate::quicklog_warn!(log, "auth", "giving up");

        let entries = log.entries("auth");
        assert_eq!(entries[0].message(), "giving up");
        assert_eq!(entries[0].level(), Level::Warn);
        assert_eq!(entries[1].message(), "retrying after 3 attempts");
    }

    #[test]
    fn test_str_helpers() {
        let log = MemoryQuicklog::new();
        log.info_str("g", "100% done {not a placeholder}");
        log.warn_str("g", "");

        let entries = log.entries("g");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message(), "100% done {not a placeholder}");
    }

    #[test]
    fn test_capacity() {
        assert_eq!(MemoryQuicklog::new().capacity(), 40);
        assert_eq!(MemoryQuicklog::with_capacity(0).capacity(), 1);
        assert_eq!(MemoryQuicklog::with_capacity(501).capacity(), 500);
    }

    #[test]
    fn test_memory_quicklog_reset() {
        let log = MemoryQuicklog::new();
        log.info_str("a", "m");
        log.info_str("b", "m");

        log.reset(Some("a"));
        assert_eq!(log.groups(), vec!["b"]);
        log.reset(None);
        assert!(log.groups().is_empty());
    }

    #[test]
    fn test_noop_discards_everything() {
        let log: Arc<dyn Quicklog> = Arc::new(NoopQuicklog);
        log.info_str("g", "hello");
        log.warn("g", format_args!("{}", 1));
        log.reset(None);

        assert!(log.groups().is_empty());
        assert!(log.entries("g").is_empty());
        assert!(log.export_snapshot("UTC", false, None).is_empty());
    }
}
