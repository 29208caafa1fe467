//! Formatter implementations used by capturing appenders.
//!
//! Provides the core [`FemtoFormatter`] trait alongside a shared trait object
//! wrapper and the built-in renderers. A formatter also declares whether it
//! leaves throwables to the appender: when [`FemtoFormatter::ignores_throwable`]
//! returns `false`, the appender appends the record's trace lines after the
//! formatted text.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::log_record::FemtoLogRecord;

mod pattern;

pub use pattern::PatternFormatter;

/// Failure raised by a formatter while rendering a record.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter rejected the record.
    #[error("formatter failed: {0}")]
    Rejected(String),
    /// Writing into the output buffer failed.
    #[error("formatter failed to write output")]
    Write(#[from] fmt::Error),
}

/// Errors that may occur while building a formatter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatterBuildError {
    /// Unknown conversion character in a pattern.
    #[error("unknown conversion '%{conversion}' at offset {offset}")]
    UnknownConversion { conversion: char, offset: usize },
    /// The pattern ends in the middle of a conversion.
    #[error("pattern ends with a dangling '%'")]
    DanglingPercent,
}

/// Trait for formatting log records into strings.
///
/// Implementors must be thread-safe (`Send + Sync`) so formatters can be
/// shared across threads in a logging system.
pub trait FemtoFormatter: Send + Sync {
    /// Format a log record into a string representation.
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError>;

    /// Return `true` when the appender should not append throwable traces.
    fn ignores_throwable(&self) -> bool {
        true
    }
}

/// Shared formatter trait object used across appenders.
#[derive(Clone)]
pub struct SharedFormatter {
    inner: Arc<dyn FemtoFormatter + Send + Sync>,
}

impl SharedFormatter {
    /// Create a shared formatter from an owned formatter implementation.
    pub fn new<F>(formatter: F) -> Self
    where
        F: FemtoFormatter + Send + Sync + 'static,
    {
        let inner: Arc<dyn FemtoFormatter + Send + Sync> = Arc::new(formatter);
        Self { inner }
    }

    /// Wrap an existing shared formatter trait object.
    pub fn from_arc(inner: Arc<dyn FemtoFormatter + Send + Sync>) -> Self {
        Self { inner }
    }

    /// Format a log record using the wrapped formatter instance.
    pub fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        self.inner.format(record)
    }

    pub fn ignores_throwable(&self) -> bool {
        self.inner.ignores_throwable()
    }
}

impl fmt::Debug for SharedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedFormatter(<dyn FemtoFormatter>)")
    }
}

/// Renders `"<LEVEL>: <message>"` and never includes throwables.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultFormatter;

impl FemtoFormatter for DefaultFormatter {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        Ok(format!("{}: {}", record.level, record.message))
    }
}

/// Renders `"<logger> [<LEVEL>] <message>"` followed by throwable traces.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoggerFormatter;

impl FemtoFormatter for LoggerFormatter {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        Ok(format!(
            "{} [{}] {}",
            record.logger, record.level, record.message
        ))
    }

    fn ignores_throwable(&self) -> bool {
        false
    }
}

impl FemtoFormatter for Arc<dyn FemtoFormatter + Send + Sync> {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        (**self).format(record)
    }

    fn ignores_throwable(&self) -> bool {
        (**self).ignores_throwable()
    }
}

impl FemtoFormatter for Box<dyn FemtoFormatter + Send + Sync> {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        (**self).format(record)
    }

    fn ignores_throwable(&self) -> bool {
        (**self).ignores_throwable()
    }
}

impl FemtoFormatter for SharedFormatter {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        SharedFormatter::format(self, record)
    }

    fn ignores_throwable(&self) -> bool {
        SharedFormatter::ignores_throwable(self)
    }
}
