//! In-memory log capture for tests.
//!
//! A [`ListAppender`] attached to a [`LoggerRegistry`] keeps every record it
//! accepts as a rendered line. Tests assert on those lines with the helpers in
//! [`query`] and detach the appender through a [`CaptureGuard`] so nothing
//! leaks into the next test.
//!
//! ```
//! use femtologging_capture::{FemtoLevel, ListAppender, LoggerRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(LoggerRegistry::new());
//! let capture = ListAppender::create_and_attach(&registry);
//! capture.set_only_levels(&[FemtoLevel::Error]);
//!
//! registry.log("app", FemtoLevel::Info, "started").unwrap();
//! registry.log("app", FemtoLevel::Error, "crashed").unwrap();
//!
//! assert_eq!(capture.to_string(), "ERROR: crashed");
//! capture.assert_has_no_log(|line: &str| line.contains("started"));
//! ```

pub mod appender;
pub mod capture;
pub mod filters;
pub mod formatter;
pub mod handler;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
pub mod query;
pub mod registry;
pub mod throwable;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;

/// Separator placed between captured lines and between a message and its
/// throwable trace lines.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

pub use appender::{ListAppender, ListAppenderBuilder};
pub use capture::CaptureGuard;
pub use filters::{FemtoFilter, LevelFilter, NameFilter, ThresholdFilter};
pub use formatter::{
    DefaultFormatter, FemtoFormatter, FormatError, FormatterBuildError, LoggerFormatter,
    PatternFormatter, SharedFormatter,
};
pub use handler::{FemtoHandler, HandlerError};
pub use level::{ALL_LEVELS, FemtoLevel, ParseLevelError};
#[cfg(feature = "log-compat")]
pub use log_compat::install_global_logger;
pub use log_record::{FemtoLogRecord, RecordMetadata};
pub use query::{AssertionFailure, Expectation, LogMatcher, LogTransformer};
pub use registry::{LoggerRegistry, RegistryError, default_registry};
pub use throwable::ThrowableRepr;
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::CaptureLayer;
