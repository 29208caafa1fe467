//! Assertions over the lines captured by a [`ListAppender`].
//!
//! A matcher is any `Fn(&str) -> bool`, or one of the describing matchers
//! built by the functions in this module. A transformer is any
//! `Fn(&str) -> Option<String>`: returning `None` removes the line from the
//! view the matcher sees. Transformation never alters the captured lines.
//!
//! ```
//! use femtologging_capture::{FemtoLevel, ListAppender, LoggerRegistry, query};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(LoggerRegistry::new());
//! let capture = ListAppender::create_and_attach(&registry);
//! registry.log("app", FemtoLevel::Warn, "disk low").unwrap();
//!
//! capture.assert_has_log(query::contains("disk low"));
//! capture.assert_has_no_log(|line: &str| line.starts_with("ERROR"));
//! ```

use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::LINE_SEPARATOR;
use crate::appender::{DUMP_FOOTER, DUMP_HEADER, ListAppender};

/// Predicate over a single captured line.
pub trait LogMatcher {
    fn matches(&self, line: &str) -> bool;

    /// Human-readable description used in failure messages.
    fn describe(&self) -> String {
        String::from("<predicate>")
    }
}

impl<F> LogMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, line: &str) -> bool {
        self(line)
    }
}

/// Maps a captured line to its replacement, or `None` to drop it.
pub trait LogTransformer {
    fn transform(&self, line: &str) -> Option<String>;
}

impl<F> LogTransformer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn transform(&self, line: &str) -> Option<String> {
        self(line)
    }
}

/// Matcher carrying its own description.
pub struct Described<F> {
    description: String,
    predicate: F,
}

impl<F> LogMatcher for Described<F>
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, line: &str) -> bool {
        (self.predicate)(line)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Attach `description` to an arbitrary predicate.
pub fn described<F>(description: impl Into<String>, predicate: F) -> Described<F>
where
    F: Fn(&str) -> bool,
{
    Described {
        description: description.into(),
        predicate,
    }
}

pub fn contains(needle: impl Into<String>) -> impl LogMatcher {
    let needle = needle.into();
    described(format!("a line containing {needle:?}"), move |line: &str| {
        line.contains(needle.as_str())
    })
}

pub fn equal_to(expected: impl Into<String>) -> impl LogMatcher {
    let expected = expected.into();
    described(format!("{expected:?}"), move |line: &str| line == expected)
}

pub fn starts_with(prefix: impl Into<String>) -> impl LogMatcher {
    let prefix = prefix.into();
    described(format!("a line starting with {prefix:?}"), move |line: &str| {
        line.starts_with(prefix.as_str())
    })
}

pub fn ends_with(suffix: impl Into<String>) -> impl LogMatcher {
    let suffix = suffix.into();
    described(format!("a line ending with {suffix:?}"), move |line: &str| {
        line.ends_with(suffix.as_str())
    })
}

/// Match lines in which `regex` finds a match anywhere.
pub fn matches_regex(regex: Regex) -> impl LogMatcher {
    described(format!("a line matching /{regex}/"), move |line: &str| {
        regex.is_match(line)
    })
}

/// Invert `matcher`.
pub fn not<M>(matcher: M) -> impl LogMatcher
where
    M: LogMatcher,
{
    let description = format!("not {}", matcher.describe());
    described(description, move |line: &str| !matcher.matches(line))
}

/// Which condition an assertion expected to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expectation {
    HasLog,
    HasNoLog,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::HasLog => f.write_str("expected a log line matching"),
            Expectation::HasNoLog => f.write_str("expected no log line matching"),
        }
    }
}

/// Failure of a presence or absence assertion.
#[derive(Clone, Debug, Error)]
#[error("{expectation} {description}{sep}{transcript}", sep = LINE_SEPARATOR)]
pub struct AssertionFailure {
    pub expectation: Expectation,
    pub description: String,
    /// Delimited dump of every captured line, untransformed.
    pub transcript: String,
}

impl ListAppender {
    /// Captured lines as seen through `transformer`.
    ///
    /// Without a transformer this is the captured sequence itself. With one,
    /// each line is mapped in order and rejected lines are dropped.
    pub fn transformed_logs(&self, transformer: Option<&dyn LogTransformer>) -> Vec<String> {
        let lines = self.lines();
        match transformer {
            None => lines,
            Some(transformer) => lines
                .iter()
                .filter_map(|line| transformer.transform(line))
                .collect(),
        }
    }

    /// Succeed when some line of the transformed view satisfies `matcher`.
    pub fn check_has_log(
        &self,
        matcher: &dyn LogMatcher,
        transformer: Option<&dyn LogTransformer>,
    ) -> Result<(), AssertionFailure> {
        let view = self.transformed_logs(transformer);
        if view.iter().any(|line| matcher.matches(line)) {
            Ok(())
        } else {
            Err(self.failure(Expectation::HasLog, matcher))
        }
    }

    /// Succeed when no line of the transformed view satisfies `matcher`.
    pub fn check_has_no_log(
        &self,
        matcher: &dyn LogMatcher,
        transformer: Option<&dyn LogTransformer>,
    ) -> Result<(), AssertionFailure> {
        let view = self.transformed_logs(transformer);
        if view.iter().any(|line| matcher.matches(line)) {
            Err(self.failure(Expectation::HasNoLog, matcher))
        } else {
            Ok(())
        }
    }

    /// Panic unless some captured line satisfies `matcher`.
    #[track_caller]
    pub fn assert_has_log<M: LogMatcher>(&self, matcher: M) {
        raise(self.check_has_log(&matcher, None));
    }

    /// Panic unless some transformed line satisfies `matcher`.
    #[track_caller]
    pub fn assert_has_log_with<M, T>(&self, matcher: M, transformer: T)
    where
        M: LogMatcher,
        T: LogTransformer,
    {
        raise(self.check_has_log(&matcher, Some(&transformer)));
    }

    /// Panic if any captured line satisfies `matcher`.
    #[track_caller]
    pub fn assert_has_no_log<M: LogMatcher>(&self, matcher: M) {
        raise(self.check_has_no_log(&matcher, None));
    }

    /// Panic if any transformed line satisfies `matcher`.
    #[track_caller]
    pub fn assert_has_no_log_with<M, T>(&self, matcher: M, transformer: T)
    where
        M: LogMatcher,
        T: LogTransformer,
    {
        raise(self.check_has_no_log(&matcher, Some(&transformer)));
    }

    fn failure(&self, expectation: Expectation, matcher: &dyn LogMatcher) -> AssertionFailure {
        let mut transcript = String::from(DUMP_HEADER);
        for line in self.lines() {
            transcript.push_str(LINE_SEPARATOR);
            transcript.push_str(&line);
        }
        transcript.push_str(LINE_SEPARATOR);
        transcript.push_str(DUMP_FOOTER);
        AssertionFailure {
            expectation,
            description: matcher.describe(),
            transcript,
        }
    }
}

#[track_caller]
fn raise(outcome: Result<(), AssertionFailure>) {
    if let Err(failure) = outcome {
        panic!("{failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FemtoHandler;
    use crate::level::FemtoLevel;
    use crate::log_record::FemtoLogRecord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn retries() -> ListAppender {
        let appender = ListAppender::new();
        for message in ["retry 1", "retry 2", "done"] {
            appender
                .handle(&FemtoLogRecord::new("core", FemtoLevel::Info, message))
                .expect("capture succeeds");
        }
        appender
    }

    fn only_retries(line: &str) -> Option<String> {
        line.contains("retry").then(|| line.to_owned())
    }

    #[rstest]
    fn transformer_drops_rejected_lines(retries: ListAppender) {
        let view = retries.transformed_logs(Some(&only_retries));
        assert_eq!(view, ["INFO: retry 1", "INFO: retry 2"]);
        assert_eq!(retries.len(), 3);
    }

    #[rstest]
    fn view_without_transformer_is_verbatim(retries: ListAppender) {
        assert_eq!(retries.transformed_logs(None), retries.lines());
    }

    #[rstest]
    fn transformed_view_feeds_matcher(retries: ListAppender) {
        retries.assert_has_log_with(ends_with("retry 2"), only_retries);
        let err = retries
            .check_has_log(&ends_with("done"), Some(&only_retries))
            .expect_err("done is filtered out");
        assert_eq!(err.expectation, Expectation::HasLog);
    }

    #[rstest]
    fn transformer_can_rewrite_lines(retries: ListAppender) {
        let strip_level = |line: &str| line.strip_prefix("INFO: ").map(str::to_owned);
        retries.assert_has_log_with(equal_to("done"), strip_level);
        retries.assert_has_no_log_with(starts_with("INFO"), strip_level);
    }

    #[test]
    fn empty_log_fails_presence_and_passes_absence() {
        let appender = ListAppender::new();
        assert!(appender.check_has_log(&|_: &str| true, None).is_err());
        assert!(appender.check_has_no_log(&|_: &str| true, None).is_ok());
    }

    #[rstest]
    fn failure_message_carries_description_and_transcript(retries: ListAppender) {
        let err = retries
            .check_has_no_log(&contains("retry"), None)
            .expect_err("retry lines exist");
        let message = err.to_string();
        assert!(message.starts_with("expected no log line matching a line containing \"retry\""));
        assert!(message.contains(DUMP_HEADER));
        assert!(message.contains("INFO: done"));
        assert!(message.ends_with(DUMP_FOOTER));
    }

    #[rstest]
    #[should_panic(expected = "expected a log line matching a line containing \"missing\"")]
    fn assert_has_log_panics_when_absent(retries: ListAppender) {
        retries.assert_has_log(contains("missing"));
    }

    #[rstest]
    fn describing_matchers(retries: ListAppender) {
        retries.assert_has_log(matches_regex(Regex::new(r"retry \d").expect("valid regex")));
        retries.assert_has_log(not(contains("retry")));
        assert_eq!(not(equal_to("x")).describe(), "not \"x\"");
    }

    #[rstest]
    fn queries_are_idempotent(retries: ListAppender) {
        let first = (retries.to_string(), retries.check_has_log(&contains("done"), None).is_ok());
        let second = (retries.to_string(), retries.check_has_log(&contains("done"), None).is_ok());
        assert_eq!(first, second);
    }
}
