//! Property-based tests for GroupStore
//!
//! Uses proptest to check the capacity, dedup and eviction invariants over
//! arbitrary sequences of records.

use std::collections::HashSet;

use proptest::prelude::*;
use quicklog::{GroupStore, Level};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Short messages drawn from a small alphabet so repeats are common
fn message_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").expect("valid regex")
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Info), Just(Level::Warn)]
}

/// A sequence of (group, level, message) records
fn records_strategy(max: usize) -> impl Strategy<Value = Vec<(String, Level, String)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["a".to_string(), "b".to_string()]),
            level_strategy(),
            message_strategy(),
        ),
        0..max,
    )
}

/// Replays records against a plain model of the expected behavior
fn model(records: &[(String, Level, String)], group: &str, capacity: usize) -> Vec<(Level, String, u32)> {
    let mut entries: Vec<(Level, String, u32)> = Vec::new();
    for (g, level, message) in records {
        if g != group {
            continue;
        }
        if let Some(existing) = entries
            .iter_mut()
            .find(|(l, m, _)| l == level && m == message)
        {
            existing.2 += 1;
            continue;
        }
        entries.insert(0, (*level, message.clone(), 1));
        entries.truncate(capacity);
    }
    entries
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// No group ever holds more entries than the capacity
    #[test]
    fn never_exceeds_capacity(capacity in 1usize..8, records in records_strategy(60)) {
        let store = GroupStore::new(capacity);
        for (group, level, message) in &records {
            store.record(*level, group, format_args!("{}", message));
            prop_assert!(store.entries(group).len() <= capacity);
        }
    }

    /// At most one entry per (message, level) within a group
    #[test]
    fn entries_are_unique(capacity in 1usize..8, records in records_strategy(60)) {
        let store = GroupStore::new(capacity);
        for (group, level, message) in &records {
            store.record(*level, group, format_args!("{}", message));
        }
        for group in store.groups() {
            let entries = store.entries(&group);
            let keys: HashSet<_> = entries
                .iter()
                .map(|e| (e.level(), e.message().to_string()))
                .collect();
            prop_assert_eq!(keys.len(), entries.len());
        }
    }

    /// Store contents match a straightforward model of insert-or-increment
    #[test]
    fn matches_model(capacity in 1usize..8, records in records_strategy(60)) {
        let store = GroupStore::new(capacity);
        for (group, level, message) in &records {
            store.record(*level, group, format_args!("{}", message));
        }
        for group in ["a", "b"] {
            let actual: Vec<_> = store
                .entries(group)
                .iter()
                .map(|e| (e.level(), e.message().to_string(), e.count()))
                .collect();
            prop_assert_eq!(actual, model(&records, group, capacity));
        }
    }

    /// Recording the same message N times yields one entry counted N times
    #[test]
    fn repeats_collapse(n in 1u32..50) {
        let store = GroupStore::new(4);
        for _ in 0..n {
            store.record(Level::Warn, "g", format_args!("same"));
        }
        let entries = store.entries("g");
        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(entries[0].count(), n);
    }

    /// K distinct messages keep exactly the newest `capacity` of them
    #[test]
    fn keeps_newest_distinct(capacity in 1usize..10, k in 1usize..30) {
        let store = GroupStore::new(capacity);
        for i in 0..k {
            store.record(Level::Info, "g", format_args!("msg {}", i));
        }
        let actual: Vec<String> = store
            .entries("g")
            .iter()
            .map(|e| e.message().to_string())
            .collect();
        let expected: Vec<String> = (0..k)
            .rev()
            .take(capacity)
            .map(|i| format!("msg {}", i))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
