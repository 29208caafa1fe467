//! Handler trait connecting the registry to its consumers.

use thiserror::Error;

use crate::formatter::FormatError;
use crate::log_record::FemtoLogRecord;

/// Errors surfaced while a handler processes a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The configured formatter failed to render the record.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Trait implemented by everything a [`LoggerRegistry`] dispatches to.
///
/// Handlers are invoked synchronously on the emitting thread, possibly from
/// several threads at once.
///
/// [`LoggerRegistry`]: crate::registry::LoggerRegistry
pub trait FemtoHandler: Send + Sync {
    /// Process a single record.
    fn handle(&self, record: &FemtoLogRecord) -> Result<(), HandlerError>;
}
