//! Bounded, deduplicating, newest-first storage of log entries per group
//!
//! A single reader/writer lock guards the whole group map. Writes hold it for
//! the dedup scan and the insert so two concurrent records of the same
//! message can never both create an entry. Reads copy out and release.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::entry::{truncate_message, Level, LogEntry};

/// Entries kept per group when no capacity is given
pub const DEFAULT_CAPACITY: usize = 40;

/// Upper bound on entries per group; keeps every operation O(capacity)
pub const MAX_CAPACITY: usize = 500;

/// Clamp a requested capacity into `1..=MAX_CAPACITY`
pub fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(1, MAX_CAPACITY)
}

/// Thread-safe store of log entries keyed by group name
///
/// Groups are created on first write and live until [`GroupStore::reset`].
/// Memory grows with the number of distinct groups, so callers should keep
/// group names to a small fixed set.
#[derive(Debug)]
pub struct GroupStore {
    groups: RwLock<HashMap<String, Vec<LogEntry>>>,
    capacity: usize,
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl GroupStore {
    /// Create a store keeping at most `capacity` entries per group (clamped)
    pub fn new(capacity: usize) -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            capacity: clamp_capacity(capacity),
        }
    }

    /// Maximum number of entries kept per group
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a message, rendering `args` first
    ///
    /// Empty group names and empty messages are dropped without a trace in
    /// the store.
    pub fn record(&self, level: Level, group: &str, args: fmt::Arguments<'_>) {
        self.record_at(level, group, args, Utc::now());
    }

    /// Same as [`GroupStore::record`] with an explicit timestamp
    pub fn record_at(
        &self,
        level: Level,
        group: &str,
        args: fmt::Arguments<'_>,
        now: DateTime<Utc>,
    ) {
        if group.is_empty() {
            tracing::trace!("Dropping {} record with empty group", level);
            return;
        }

        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => args.to_string(),
        };
        if message.is_empty() {
            tracing::trace!(group, "Dropping {} record with empty message", level);
            return;
        }
        let message = truncate_message(message);

        let mut groups = self.write();
        let entries = groups.entry(group.to_string()).or_insert_with(|| {
            tracing::debug!(group, capacity = self.capacity, "Creating log group");
            Vec::with_capacity(self.capacity)
        });

        // A repeat keeps its position; only new messages go to the front
        if let Some(existing) = entries.iter_mut().find(|e| e.matches(level, &message)) {
            existing.touch(now);
            return;
        }

        if entries.len() >= self.capacity {
            entries.truncate(self.capacity - 1);
        }
        entries.insert(0, LogEntry::new(level, group, message, now));
    }

    /// Names of all groups that currently exist, in no particular order
    pub fn groups(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Copy of a group's entries, newest first; empty if the group is unknown
    pub fn entries(&self, group: &str) -> Vec<LogEntry> {
        self.read().get(group).cloned().unwrap_or_default()
    }

    /// Render every entry of every group as display lines
    ///
    /// With `group_prefix`, only groups whose name starts with it are
    /// included. Groups without entries are left out.
    pub fn export_snapshot(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: Option<&str>,
    ) -> BTreeMap<String, Vec<String>> {
        self.export_snapshot_at(timezone, with_exact_time, group_prefix, Utc::now())
    }

    /// Same as [`GroupStore::export_snapshot`], measured against a given `now`
    pub fn export_snapshot_at(
        &self,
        timezone: &str,
        with_exact_time: bool,
        group_prefix: Option<&str>,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, Vec<String>> {
        let groups = self.read();
        groups
            .iter()
            .filter(|(name, entries)| {
                !entries.is_empty() && group_prefix.map_or(true, |p| name.starts_with(p))
            })
            .map(|(name, entries)| {
                let lines = entries
                    .iter()
                    .map(|e| e.formatted_message_at(timezone, with_exact_time, now))
                    .collect();
                (name.clone(), lines)
            })
            .collect()
    }

    /// Drop one group, or every group when `group` is `None`
    pub fn reset(&self, group: Option<&str>) {
        let mut groups = self.write();
        match group {
            Some(name) => {
                if groups.remove(name).is_some() {
                    tracing::debug!(group = name, "Reset log group");
                }
            }
            None => {
                tracing::debug!(count = groups.len(), "Reset all log groups");
                groups.clear();
            }
        }
    }

    // Every mutation is a single push, truncate, or counter bump, so the map
    // is consistent even if a holder panicked.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<LogEntry>>> {
        self.groups.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<LogEntry>>> {
        self.groups.write().unwrap_or_else(PoisonError::into_inner)
    }
}
