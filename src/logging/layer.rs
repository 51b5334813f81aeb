//! Bridge from `tracing` events into the [`Emitter`].
//!
//! Lets the service's own operational logs (`tracing::info!` and friends)
//! come out in the same record schema as direct `emit` calls.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::logging::emitter::Emitter;
use crate::logging::fields::Fields;
use crate::logging::level::LogLevel;

const TARGET_KEY: &str = "target";

/// `tracing_subscriber` layer that forwards every event to an [`Emitter`].
#[derive(Debug, Clone)]
pub struct EmitterLayer {
    emitter: Emitter,
}

impl EmitterLayer {
    pub fn new(emitter: Emitter) -> Self {
        Self { emitter }
    }
}

impl<S: Subscriber> Layer<S> for EmitterLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = LogLevel::from(*metadata.level());
        if !self.emitter.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut fields = visitor.fields;
        if !fields.contains_key(TARGET_KEY) {
            fields.insert(TARGET_KEY, metadata.target());
        }

        self.emitter.emit(level, visitor.message.unwrap_or_default(), fields);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Fields,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.insert(field.name(), rendered);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name(), value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name(), value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name(), value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name(), value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields.insert(field.name(), value.to_string());
    }
}
