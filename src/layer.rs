//! Bridge from `tracing` events into a [`Quicklog`]
//!
//! INFO, WARN and ERROR events land in the group named after the event
//! target. DEBUG and TRACE are ignored.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::entry::Level;
use crate::quicklog::Quicklog;

/// Target prefix of this crate's own events, which are never forwarded
const OWN_TARGET: &str = "quicklog";

/// Layer that records tracing events into a shared quicklog
pub struct QuicklogLayer {
    log: Arc<dyn Quicklog>,
}

impl QuicklogLayer {
    pub fn new(log: Arc<dyn Quicklog>) -> Self {
        Self { log }
    }
}

impl<S: Subscriber> Layer<S> for QuicklogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(level) = Level::from_tracing(metadata.level()) else {
            return;
        };

        let target = metadata.target();
        if is_own_target(target) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.log.record(level, target, format_args!("{}", visitor.finish()));
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}
