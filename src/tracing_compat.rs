//! Bridge from `tracing` events into a [`LoggerRegistry`].
//!
//! [`CaptureLayer`] is a `tracing_subscriber` layer that turns every event
//! into a [`FemtoLogRecord`]. The `message` field becomes the record message,
//! an `error` field recorded as a `dyn Error` becomes the throwable, and every
//! other field is kept as a key/value pair in the record metadata.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::level::FemtoLevel;
use crate::log_record::{FemtoLogRecord, RecordMetadata};
use crate::registry::LoggerRegistry;
use crate::throwable::ThrowableRepr;

/// Layer dispatching `tracing` events to a registry.
#[derive(Clone)]
pub struct CaptureLayer {
    registry: Arc<LoggerRegistry>,
}

impl CaptureLayer {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    throwable: Option<ThrowableRepr>,
    metadata: RecordMetadata,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.metadata
                .key_values
                .insert(field.name().to_owned(), value.to_owned());
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        if field.name() == "error" {
            self.throwable = Some(ThrowableRepr::from_error(value));
        } else {
            self.metadata
                .key_values
                .insert(field.name().to_owned(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.metadata
                .key_values
                .insert(field.name().to_owned(), format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut metadata = visitor.metadata;
        metadata.module_path = meta.module_path().unwrap_or_default().to_owned();
        metadata.filename = meta.file().unwrap_or_default().to_owned();
        metadata.line_number = meta.line().unwrap_or(0);

        let logger = meta.target().replace("::", ".");
        let mut record = FemtoLogRecord::with_metadata(
            &logger,
            FemtoLevel::from(*meta.level()),
            &visitor.message,
            metadata,
        );
        record.throwable = visitor.throwable;

        // Events have no error channel back to the emitting macro.
        if let Err(err) = self.registry.dispatch(&record) {
            panic!("failed to capture tracing event from {:?}: {err}", meta.target());
        }
    }
}
