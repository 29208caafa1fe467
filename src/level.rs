//! Severity levels understood by the capture pipeline.
//!
//! Ordering is defined by an explicit numeric rank rather than by the
//! position of each variant, so `Fatal` compares greater than `Error` no
//! matter how the enum is laid out.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FemtoLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

/// Every level, most severe first.
pub const ALL_LEVELS: [FemtoLevel; 6] = [
    FemtoLevel::Fatal,
    FemtoLevel::Error,
    FemtoLevel::Warn,
    FemtoLevel::Info,
    FemtoLevel::Debug,
    FemtoLevel::Trace,
];

/// Error returned when a level name is not recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FemtoLevel {
    /// Numeric severity; larger is more severe.
    pub const fn rank(self) -> u8 {
        match self {
            FemtoLevel::Trace => 0,
            FemtoLevel::Debug => 10,
            FemtoLevel::Info => 20,
            FemtoLevel::Warn => 30,
            FemtoLevel::Error => 40,
            FemtoLevel::Fatal => 50,
        }
    }

    /// Return `true` when `self` is at least as severe as `threshold`.
    pub fn is_as_severe_as(self, threshold: FemtoLevel) -> bool {
        self >= threshold
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FemtoLevel::Trace => "TRACE",
            FemtoLevel::Debug => "DEBUG",
            FemtoLevel::Info => "INFO",
            FemtoLevel::Warn => "WARN",
            FemtoLevel::Error => "ERROR",
            FemtoLevel::Fatal => "FATAL",
        }
    }
}

impl PartialOrd for FemtoLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FemtoLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for FemtoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FemtoLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" | "CRITICAL" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

impl From<log::Level> for FemtoLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => FemtoLevel::Trace,
            log::Level::Debug => FemtoLevel::Debug,
            log::Level::Info => FemtoLevel::Info,
            log::Level::Warn => FemtoLevel::Warn,
            log::Level::Error => FemtoLevel::Error,
        }
    }
}

#[cfg(feature = "tracing-compat")]
impl From<tracing::Level> for FemtoLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            l if l == tracing::Level::TRACE => FemtoLevel::Trace,
            l if l == tracing::Level::DEBUG => FemtoLevel::Debug,
            l if l == tracing::Level::INFO => FemtoLevel::Info,
            l if l == tracing::Level::WARN => FemtoLevel::Warn,
            _ => FemtoLevel::Error,
        }
    }
}
