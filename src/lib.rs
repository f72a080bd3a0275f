//! Quicklog - in-memory, at-a-glance logs grouped by name
//!
//! Keeps a small, bounded, newest-first list of deduplicated entries per
//! group, with repeat counts and "Nm Ns ago" style formatting. Meant for
//! debug pages and admin views, not durable storage.

pub mod config;
pub mod entry;
pub mod error;
pub mod layer;
pub mod quicklog;
pub mod store;
pub mod time_format;

pub use config::Config;
pub use entry::{Level, LogEntry, MAX_MESSAGE_CHARS};
pub use error::{ConfigError, ParseLevelError};
pub use layer::QuicklogLayer;
pub use quicklog::{MemoryQuicklog, NoopQuicklog, Quicklog};
pub use store::{GroupStore, DEFAULT_CAPACITY, MAX_CAPACITY};
