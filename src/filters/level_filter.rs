//! Set-based level retention.

use std::collections::BTreeSet;

use crate::{filters::FemtoFilter, level::FemtoLevel, log_record::FemtoLogRecord};

/// Which severities an appender keeps.
///
/// `All` is the unconfigured state. `Only` keeps exactly the listed levels,
/// so `Only` with an empty set keeps nothing at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(BTreeSet<FemtoLevel>),
}

impl LevelFilter {
    /// Keep exactly `levels`.
    pub fn only<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = FemtoLevel>,
    {
        Self::Only(levels.into_iter().collect())
    }

    pub fn retains(&self, level: FemtoLevel) -> bool {
        match self {
            Self::All => true,
            Self::Only(levels) => levels.contains(&level),
        }
    }
}

impl FemtoFilter for LevelFilter {
    fn should_log(&self, record: &FemtoLogRecord) -> bool {
        self.retains(record.level)
    }
}
