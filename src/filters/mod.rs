//! Filtering components for log records.
//!
//! Provides the [`FemtoFilter`] trait along with the concrete filters an
//! appender consults before rendering a record.

use crate::log_record::FemtoLogRecord;

/// Trait implemented by all log filters.
///
/// Filters are `Send + Sync` so they can be shared across threads.
pub trait FemtoFilter: Send + Sync {
    /// Return `true` if `record` should be processed.
    fn should_log(&self, record: &FemtoLogRecord) -> bool;
}

pub mod level_filter;
pub mod name_filter;
pub mod threshold_filter;

pub use level_filter::LevelFilter;
pub use name_filter::NameFilter;
pub use threshold_filter::ThresholdFilter;

impl<F> FemtoFilter for F
where
    F: Fn(&FemtoLogRecord) -> bool + Send + Sync,
{
    fn should_log(&self, record: &FemtoLogRecord) -> bool {
        self(record)
    }
}
