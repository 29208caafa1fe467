//! Minimum-severity filter.

use crate::{filters::FemtoFilter, level::FemtoLevel, log_record::FemtoLogRecord};

/// Accepts records at least as severe as `threshold`.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdFilter {
    threshold: FemtoLevel,
}

impl ThresholdFilter {
    pub fn new(threshold: FemtoLevel) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> FemtoLevel {
        self.threshold
    }
}

impl FemtoFilter for ThresholdFilter {
    fn should_log(&self, record: &FemtoLogRecord) -> bool {
        record.level.is_as_severe_as(self.threshold)
    }
}
