//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides `FemtoLogAdapter`, an implementation of `log::Log`
//! that converts `log` records into [`FemtoLogRecord`]s and dispatches them
//! through the [default registry](crate::registry::default_registry). The
//! bridge is enabled explicitly via [`install_global_logger`], which installs
//! the adapter as the global Rust logger.

use std::borrow::Cow;
use std::sync::OnceLock;

use log::{Metadata, Record, warn};

use crate::level::FemtoLevel;
use crate::log_record::{FemtoLogRecord, RecordMetadata};
use crate::registry::{LoggerRegistry, RegistryError, default_registry};

/// Adapter implementing the Rust `log::Log` trait.
pub struct FemtoLogAdapter;

/// Convert Rust module separators into dotted logger names.
fn normalise_target(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}

/// Records emitted by this crate's own diagnostics stay out of captures.
fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn to_femto_record(record: &Record<'_>) -> FemtoLogRecord {
    let metadata = RecordMetadata {
        module_path: record.module_path().unwrap_or_default().to_string(),
        filename: record.file().unwrap_or_default().to_string(),
        line_number: record.line().unwrap_or(0),
        ..Default::default()
    };
    FemtoLogRecord::with_metadata(
        normalise_target(record.target()).as_ref(),
        FemtoLevel::from(record.level()),
        &record.args().to_string(),
        metadata,
    )
}

/// Dispatch a `log` record into `registry`.
///
/// A handler error cannot be returned through the `log` macros, so it is
/// raised as a panic at the emitting call site.
fn forward(registry: &LoggerRegistry, record: &Record<'_>) {
    if is_own_target(record.target()) {
        return;
    }
    if let Err(err) = registry.dispatch(&to_femto_record(record)) {
        panic!("failed to capture log record from {:?}: {err}", record.target());
    }
}

impl log::Log for FemtoLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_own_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        forward(default_registry(), record);
    }

    fn flush(&self) {}
}

static FEMTO_LOG_ADAPTER: FemtoLogAdapter = FemtoLogAdapter;
static INSTALL_RESULT: OnceLock<bool> = OnceLock::new();

/// Install the capture bridge as the global Rust logger.
///
/// Subsequent calls return the cached outcome. When a different global
/// logger is already set, installation fails with
/// [`RegistryError::GlobalLoggerAlreadySet`].
pub fn install_global_logger() -> Result<(), RegistryError> {
    let installed = *INSTALL_RESULT.get_or_init(|| {
        if log::set_logger(&FEMTO_LOG_ADAPTER).is_err() {
            warn!("a global logger is already installed; log records will not be captured");
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    });
    if installed {
        Ok(())
    } else {
        Err(RegistryError::GlobalLoggerAlreadySet)
    }
}
