//! Machine-readable JSON report

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};

use super::ReportContext;
use crate::clock::ManualClock;
use crate::config::ReporterConfig;
use crate::error::{ReportError, ReportResult};
use crate::recorder::StepRecorder;
use crate::session::{BrowserInfo, SessionSnapshot};
use crate::step::{OverallStatus, ScreenshotRef, StepRecord};
use crate::summary::RunSummary;

/// The JSON report document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineReport {
    pub test_name: String,
    pub execution_time: DateTime<Local>,
    pub overall_status: OverallStatus,
    pub duration_seconds: u64,
    pub final_url: String,
    pub page_title: String,
    pub browser_info: BrowserInfo,
    pub test_steps: Vec<StepRecord>,
    pub screenshots: Vec<String>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_steps: usize,
    pub passed_steps: usize,
    pub failed_steps: usize,
    pub info_steps: usize,
    #[serde(default)]
    pub warn_steps: usize,
}

impl From<&RunSummary> for Statistics {
    fn from(summary: &RunSummary) -> Self {
        Self {
            total_steps: summary.total,
            passed_steps: summary.passed,
            failed_steps: summary.failed,
            info_steps: summary.info,
            warn_steps: summary.warn,
        }
    }
}

impl MachineReport {
    pub fn from_context(ctx: &ReportContext<'_>) -> Self {
        Self {
            test_name: ctx.run_name.to_string(),
            execution_time: ctx.executed_at,
            overall_status: ctx.overall,
            duration_seconds: ctx.summary.elapsed_secs,
            final_url: ctx.session.final_url.clone(),
            page_title: ctx.session.page_title.clone(),
            browser_info: ctx.session.browser.clone(),
            test_steps: ctx.steps.to_vec(),
            screenshots: ctx.screenshots.iter().map(|s| s.file_name.clone()).collect(),
            statistics: Statistics::from(ctx.summary),
        }
    }

    /// Load a report previously written by the JSON renderer
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let report: Self = serde_json::from_str(&content)?;
        if report.checked_started_at().is_none() {
            return Err(ReportError::Config(format!(
                "duration out of range: {} seconds in {}",
                report.duration_seconds,
                path.display()
            )));
        }
        Ok(report)
    }

    fn checked_started_at(&self) -> Option<DateTime<Local>> {
        let secs = i64::try_from(self.duration_seconds).ok()?;
        let elapsed = TimeDelta::try_seconds(secs)?;
        self.execution_time.checked_sub_signed(elapsed)
    }

    /// When the run started, derived from execution time and duration.
    /// A duration reaching past the representable range collapses to zero.
    pub fn started_at(&self) -> DateTime<Local> {
        self.checked_started_at().unwrap_or(self.execution_time)
    }

    /// Statistics recomputed from the step array
    pub fn recount(&self) -> Statistics {
        let summary = RunSummary::compute(&self.test_steps, self.started_at(), self.execution_time);
        Statistics::from(&summary)
    }

    /// Whether the stored statistics match a recount of the steps
    pub fn is_consistent(&self) -> bool {
        self.recount() == self.statistics
    }

    pub fn session(&self) -> SessionSnapshot {
        SessionSnapshot {
            final_url: self.final_url.clone(),
            page_title: self.page_title.clone(),
            browser: self.browser_info.clone(),
        }
    }

    /// Rebuild a recorder frozen at this report's execution time
    pub fn into_recorder(self, config: ReporterConfig) -> StepRecorder {
        let started_at = self.started_at();
        let clock = Arc::new(ManualClock::new(self.execution_time));
        let config = config.with_run_name(self.test_name);
        let screenshots = self
            .screenshots
            .into_iter()
            .map(|file_name| ScreenshotRef {
                file_name,
                label: None,
            })
            .collect();

        StepRecorder::restore(config, clock, started_at, self.test_steps, screenshots)
    }
}

pub fn render(ctx: &ReportContext<'_>) -> ReportResult<String> {
    let report = MachineReport::from_context(ctx);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
