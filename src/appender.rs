//! In-memory appender that records rendered log lines for later inspection.
//!
//! [`ListAppender`] is attached to a [`LoggerRegistry`] for the duration of a
//! test. Every record it accepts is rendered exactly once and appended to an
//! ordered buffer that is never reordered, deduplicated, or cleared. Queries
//! live in [`crate::query`]; attach and detach helpers in [`crate::capture`].
//!
//! [`LoggerRegistry`]: crate::registry::LoggerRegistry

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

// parking_lot avoids poisoning so a panicking formatter cannot wedge the buffer
use parking_lot::Mutex;
use regex::Regex;

use crate::LINE_SEPARATOR;
use crate::filters::{FemtoFilter, LevelFilter};
use crate::formatter::{DefaultFormatter, FemtoFormatter, SharedFormatter};
use crate::handler::{FemtoHandler, HandlerError};
use crate::level::FemtoLevel;
use crate::log_record::FemtoLogRecord;

pub(crate) const DUMP_HEADER: &str = "--- Actual content of logs ---";
pub(crate) const DUMP_FOOTER: &str = "--- end of LogString content ---";

mod builder;

pub use builder::ListAppenderBuilder;

/// Settings consulted while a record is filtered and rendered.
///
/// Shared copy-on-write: `handle` clones the `Arc` and releases the lock
/// before calling into filters or the formatter, so those may log through
/// the same registry without re-entering the lock.
#[derive(Clone, Default)]
struct CaptureConfig {
    formatter: Option<SharedFormatter>,
    threshold: Option<FemtoLevel>,
    filters: Vec<Arc<dyn FemtoFilter>>,
    only_levels: LevelFilter,
}

impl CaptureConfig {
    fn accepts(&self, record: &FemtoLogRecord) -> bool {
        if let Some(threshold) = self.threshold
            && !record.level.is_as_severe_as(threshold)
        {
            return false;
        }
        self.filters.iter().all(|f| f.should_log(record)) && self.only_levels.retains(record.level)
    }

    fn render(&self, record: &FemtoLogRecord) -> Result<String, HandlerError> {
        let (mut line, ignores_throwable) = match &self.formatter {
            Some(formatter) => (formatter.format(record)?, formatter.ignores_throwable()),
            None => (DefaultFormatter.format(record)?, true),
        };
        if !ignores_throwable {
            for trace in record.throwable_lines() {
                line.push_str(LINE_SEPARATOR);
                line.push_str(trace);
            }
        }
        Ok(line)
    }
}

#[derive(Default)]
struct CaptureState {
    config: Arc<CaptureConfig>,
    logs: Vec<String>,
}

impl CaptureState {
    fn config_mut(&mut self) -> &mut CaptureConfig {
        Arc::make_mut(&mut self.config)
    }
}

/// Appender that keeps every accepted record as a rendered line.
pub struct ListAppender {
    name: Option<String>,
    dump_on_failure: bool,
    state: Mutex<CaptureState>,
}

impl ListAppender {
    /// Create an appender with no formatter, filters or level restriction.
    pub fn new() -> Self {
        Self {
            name: None,
            dump_on_failure: false,
            state: Mutex::new(CaptureState::default()),
        }
    }

    /// Start configuring an appender.
    pub fn builder() -> ListAppenderBuilder {
        ListAppenderBuilder::new()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn dumps_on_failure(&self) -> bool {
        self.dump_on_failure
    }

    /// Replace the formatter used for records captured from now on.
    pub fn set_formatter<F>(&self, formatter: F)
    where
        F: FemtoFormatter + 'static,
    {
        self.state.lock().config_mut().formatter = Some(SharedFormatter::new(formatter));
    }

    /// Return to the built-in `"<LEVEL>: <message>"` rendering.
    pub fn clear_formatter(&self) {
        self.state.lock().config_mut().formatter = None;
    }

    /// Keep only records at exactly these levels.
    ///
    /// An empty slice keeps nothing, which differs from never calling this
    /// method (every level is kept).
    pub fn set_only_levels(&self, levels: &[FemtoLevel]) {
        self.state.lock().config_mut().only_levels = LevelFilter::only(levels.iter().copied());
    }

    pub fn only_levels(&self) -> LevelFilter {
        self.state.lock().config.only_levels.clone()
    }

    /// Drop records less severe than `threshold`; `None` removes the limit.
    pub fn set_threshold(&self, threshold: Option<FemtoLevel>) {
        self.state.lock().config_mut().threshold = threshold;
    }

    /// Add a filter every record must pass before it is rendered.
    pub fn add_filter<F>(&self, filter: F)
    where
        F: FemtoFilter + 'static,
    {
        self.state.lock().config_mut().filters.push(Arc::new(filter));
    }

    /// Return `true` when no line has been captured.
    pub fn is_empty(&self) -> bool {
        self.state.lock().logs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.lock().logs.len()
    }

    /// Snapshot of the captured lines in capture order.
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().logs.clone()
    }

    /// Write a delimited transcript of the captured lines to `out`.
    pub fn print_to<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let lines = self.lines();
        write!(out, "{DUMP_HEADER}{LINE_SEPARATOR}")?;
        for line in &lines {
            write!(out, "{line}{LINE_SEPARATOR}")?;
        }
        write!(out, "{DUMP_FOOTER}{LINE_SEPARATOR}")?;
        out.flush()
    }

    /// Return `true` if any captured line matches `pattern` in full.
    ///
    /// The pattern must match the whole line and `.` does not cross line
    /// breaks, so a line carrying throwable traces only matches a pattern
    /// that spans its separators explicitly.
    pub fn matches_one_line(&self, pattern: &str) -> Result<bool, regex::Error> {
        // Compile unwrapped first: anchoring an unbalanced pattern such as
        // `x)|(y` would otherwise yield a valid regex with other semantics.
        Regex::new(pattern)?;
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        let lines = self.lines();
        Ok(lines.iter().any(|line| regex.is_match(line)))
    }
}

impl Default for ListAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl FemtoHandler for ListAppender {
    fn handle(&self, record: &FemtoLogRecord) -> Result<(), HandlerError> {
        let config = Arc::clone(&self.state.lock().config);
        if !config.accepts(record) {
            return Ok(());
        }
        let line = config.render(record)?;
        self.state.lock().logs.push(line);
        Ok(())
    }
}

impl fmt::Display for ListAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.write_str(&state.logs.join(LINE_SEPARATOR))
    }
}

impl fmt::Debug for ListAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ListAppender")
            .field("name", &self.name)
            .field("formatter", &state.config.formatter)
            .field("threshold", &state.config.threshold)
            .field("filters", &state.config.filters.len())
            .field("only_levels", &state.config.only_levels)
            .field("lines", &state.logs.len())
            .finish()
    }
}
