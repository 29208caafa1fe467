//! Builder for [`ListAppender`].
//!
//! Collects the appender configuration up front so a test can create,
//! configure and attach an appender in one expression.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{CaptureConfig, CaptureState, ListAppender};
use crate::capture::CaptureGuard;
use crate::filters::{FemtoFilter, LevelFilter};
use crate::formatter::{FemtoFormatter, SharedFormatter};
use crate::level::FemtoLevel;
use crate::registry::LoggerRegistry;

/// Builder for constructing [`ListAppender`] instances.
#[derive(Clone, Default)]
pub struct ListAppenderBuilder {
    name: Option<String>,
    formatter: Option<SharedFormatter>,
    threshold: Option<FemtoLevel>,
    filters: Vec<Arc<dyn FemtoFilter>>,
    only_levels: LevelFilter,
    dump_on_failure: bool,
}

impl ListAppenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name reported in diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Render records with `formatter` instead of `"<LEVEL>: <message>"`.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: FemtoFormatter + 'static,
    {
        self.formatter = Some(SharedFormatter::new(formatter));
        self
    }

    /// Keep only the listed levels; an empty slice keeps nothing.
    pub fn with_only_levels(mut self, levels: &[FemtoLevel]) -> Self {
        self.only_levels = LevelFilter::only(levels.iter().copied());
        self
    }

    /// Drop records less severe than `threshold`.
    pub fn with_threshold(mut self, threshold: FemtoLevel) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Add a filter every record must pass.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: FemtoFilter + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Print the transcript to stderr when the guard is dropped during a panic.
    pub fn dump_on_failure(mut self, enabled: bool) -> Self {
        self.dump_on_failure = enabled;
        self
    }

    pub fn build(self) -> ListAppender {
        ListAppender {
            name: self.name,
            dump_on_failure: self.dump_on_failure,
            state: Mutex::new(CaptureState {
                config: Arc::new(CaptureConfig {
                    formatter: self.formatter,
                    threshold: self.threshold,
                    filters: self.filters,
                    only_levels: self.only_levels,
                }),
                logs: Vec::new(),
            }),
        }
    }

    /// Build the appender and attach it to `registry` for the guard's lifetime.
    pub fn attach_to(self, registry: &Arc<LoggerRegistry>) -> CaptureGuard {
        CaptureGuard::attach(Arc::new(self.build()), Arc::clone(registry))
    }
}
