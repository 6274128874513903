//! Run statistics derived from the step sequence

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::step::{StepRecord, StepStatus};

/// Statistics for one run, always recomputed from the steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub info: usize,
    pub warn: usize,
    /// Whole seconds between start and end, never negative
    pub elapsed_secs: u64,
}

impl RunSummary {
    pub fn compute(steps: &[StepRecord], started_at: DateTime<Local>, ended_at: DateTime<Local>) -> Self {
        let mut summary = Self {
            started_at,
            ended_at,
            total: 0,
            passed: 0,
            failed: 0,
            info: 0,
            warn: 0,
            elapsed_secs: (ended_at - started_at).num_seconds().max(0) as u64,
        };

        for step in steps {
            summary.total += 1;
            match step.status {
                StepStatus::Pass => summary.passed += 1,
                StepStatus::Fail => summary.failed += 1,
                StepStatus::Info => summary.info += 1,
                StepStatus::Warn => summary.warn += 1,
            }
        }

        summary
    }

    pub fn count(&self, status: StepStatus) -> usize {
        match status {
            StepStatus::Pass => self.passed,
            StepStatus::Fail => self.failed,
            StepStatus::Info => self.info,
            StepStatus::Warn => self.warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn step(status: StepStatus) -> StepRecord {
        StepRecord {
            timestamp: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            description: status.to_string(),
            status,
            details: String::new(),
        }
    }

    #[test]
    fn test_counts_sum_to_total() {
        let start = Local.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let statuses = [
            StepStatus::Info,
            StepStatus::Pass,
            StepStatus::Warn,
            StepStatus::Fail,
            StepStatus::Pass,
            StepStatus::Info,
        ];
        let steps: Vec<_> = statuses.iter().copied().map(step).collect();

        let summary = RunSummary::compute(&steps, start, start);
        assert_eq!(summary.total, steps.len());
        assert_eq!(
            summary.passed + summary.failed + summary.info + summary.warn,
            summary.total
        );
        assert_eq!(summary.count(StepStatus::Pass), 2);
        assert_eq!(summary.count(StepStatus::Warn), 1);
    }

    #[test]
    fn test_elapsed_whole_seconds_and_clamped() {
        let start = Local.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let later = start + chrono::Duration::milliseconds(61_900);

        assert_eq!(RunSummary::compute(&[], start, later).elapsed_secs, 61);
        assert_eq!(RunSummary::compute(&[], later, start).elapsed_secs, 0);
    }
}
