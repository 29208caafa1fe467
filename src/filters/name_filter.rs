//! Logger-name prefix filter.

use crate::{filters::FemtoFilter, log_record::FemtoLogRecord};

/// Accepts records whose logger name starts with a prefix.
#[derive(Clone, Debug)]
pub struct NameFilter {
    prefix: String,
}

impl NameFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl FemtoFilter for NameFilter {
    fn should_log(&self, record: &FemtoLogRecord) -> bool {
        record.logger.starts_with(&self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::FemtoLevel;
    use rstest::rstest;

    #[rstest]
    #[case("app.db", true)]
    #[case("app", true)]
    #[case("other.app", false)]
    #[case("", false)]
    fn prefix_match(#[case] logger: &str, #[case] expected: bool) {
        let filter = NameFilter::new("app");
        let record = FemtoLogRecord::new(logger, FemtoLevel::Info, "msg");
        assert_eq!(filter.should_log(&record), expected);
    }
}
