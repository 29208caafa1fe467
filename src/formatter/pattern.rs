//! Pattern-driven formatter.
//!
//! Patterns mix literal text with `%` conversions:
//!
//! | Conversion | Output                          |
//! |------------|---------------------------------|
//! | `%p`       | level name                      |
//! | `%c`       | logger name                     |
//! | `%m`       | message                         |
//! | `%t`       | thread name, empty when unnamed |
//! | `%M`       | module path                     |
//! | `%F`       | source file                     |
//! | `%L`       | source line                     |
//! | `%n`       | platform line separator         |
//! | `%%`       | a literal `%`                   |
//!
//! The pattern is parsed once at construction so rendering never fails on
//! syntax.

use std::fmt::Write as _;

use super::{FemtoFormatter, FormatError, FormatterBuildError};
use crate::LINE_SEPARATOR;
use crate::log_record::FemtoLogRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Level,
    Logger,
    Message,
    Thread,
    Module,
    File,
    Line,
    Newline,
}

/// Formatter rendering records through a compiled pattern.
#[derive(Clone, Debug)]
pub struct PatternFormatter {
    segments: Vec<Segment>,
    include_throwables: bool,
}

impl PatternFormatter {
    /// Compile `pattern`, rejecting unknown conversions.
    pub fn new(pattern: &str) -> Result<Self, FormatterBuildError> {
        Ok(Self {
            segments: parse(pattern)?,
            include_throwables: false,
        })
    }

    /// Let the appender append throwable traces after the rendered text.
    pub fn including_throwables(mut self) -> Self {
        self.include_throwables = true;
        self
    }
}

fn parse(pattern: &str) -> Result<Vec<Segment>, FormatterBuildError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }
        let (_, conversion) = chars.next().ok_or(FormatterBuildError::DanglingPercent)?;
        let segment = match conversion {
            '%' => {
                literal.push('%');
                continue;
            }
            'p' => Segment::Level,
            'c' => Segment::Logger,
            'm' => Segment::Message,
            't' => Segment::Thread,
            'M' => Segment::Module,
            'F' => Segment::File,
            'L' => Segment::Line,
            'n' => Segment::Newline,
            other => {
                return Err(FormatterBuildError::UnknownConversion {
                    conversion: other,
                    offset,
                });
            }
        };
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(segment);
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

impl FemtoFormatter for PatternFormatter {
    fn format(&self, record: &FemtoLogRecord) -> Result<String, FormatError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Level => out.push_str(record.level.as_str()),
                Segment::Logger => out.push_str(&record.logger),
                Segment::Message => out.push_str(&record.message),
                Segment::Thread => {
                    out.push_str(record.metadata.thread_name.as_deref().unwrap_or_default())
                }
                Segment::Module => out.push_str(&record.metadata.module_path),
                Segment::File => out.push_str(&record.metadata.filename),
                Segment::Line => write!(out, "{}", record.metadata.line_number)?,
                Segment::Newline => out.push_str(LINE_SEPARATOR),
            }
        }
        Ok(out)
    }

    fn ignores_throwable(&self) -> bool {
        !self.include_throwables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::FemtoLevel;
    use crate::log_record::RecordMetadata;
    use rstest::rstest;

    fn record() -> FemtoLogRecord {
        let metadata = RecordMetadata {
            module_path: "app::db".into(),
            filename: "db.rs".into(),
            line_number: 17,
            ..Default::default()
        };
        FemtoLogRecord::with_metadata("app.db", FemtoLevel::Info, "connected", metadata)
    }

    #[rstest]
    #[case("%p %c - %m", "INFO app.db - connected")]
    #[case("[%M] %F:%L %m", "[app::db] db.rs:17 connected")]
    #[case("100%% %m", "100% connected")]
    #[case("plain", "plain")]
    #[case("", "")]
    fn renders_conversions(#[case] pattern: &str, #[case] expected: &str) {
        let formatter = PatternFormatter::new(pattern).expect("pattern compiles");
        assert_eq!(formatter.format(&record()).expect("render"), expected);
    }

    #[test]
    fn newline_conversion_uses_platform_separator() {
        let formatter = PatternFormatter::new("%p%n%m").expect("pattern compiles");
        let expected = format!("INFO{LINE_SEPARATOR}connected");
        assert_eq!(formatter.format(&record()).expect("render"), expected);
    }

    #[test]
    fn rejects_unknown_conversion() {
        let err = PatternFormatter::new("%p %q").expect_err("unknown conversion");
        assert_eq!(
            err,
            FormatterBuildError::UnknownConversion {
                conversion: 'q',
                offset: 3
            }
        );
    }

    #[test]
    fn rejects_trailing_percent() {
        let err = PatternFormatter::new("%m %").expect_err("dangling percent");
        assert_eq!(err, FormatterBuildError::DanglingPercent);
    }

    #[test]
    fn throwable_policy_is_opt_in() {
        let formatter = PatternFormatter::new("%m").expect("pattern compiles");
        assert!(formatter.ignores_throwable());
        assert!(!formatter.including_throwables().ignores_throwable());
    }
}
