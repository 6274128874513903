//! Step recorder: the append-only log of one test run

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ReporterConfig;
use crate::error::{ReportError, ReportResult};
use crate::session::BrowserSession;
use crate::step::{ScreenshotRef, StepRecord, StepStatus};
use crate::summary::RunSummary;
use crate::STAMP_FORMAT;

/// Accumulates steps and screenshot references for a single run.
///
/// Owned by the driver for the whole run and handed to the renderer by
/// shared reference at the end.
pub struct StepRecorder {
    config: ReporterConfig,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Local>,
    steps: Vec<StepRecord>,
    screenshots: Vec<ScreenshotRef>,
}

impl StepRecorder {
    /// Create a recorder on the system clock
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ReporterConfig, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            config,
            clock,
            started_at,
            steps: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    /// Rebuild a recorder from a previously saved run
    pub fn restore(
        config: ReporterConfig,
        clock: Arc<dyn Clock>,
        started_at: DateTime<Local>,
        steps: Vec<StepRecord>,
        screenshots: Vec<ScreenshotRef>,
    ) -> Self {
        Self {
            config,
            clock,
            started_at,
            steps,
            screenshots,
        }
    }

    /// Append a step and echo it to the log
    pub fn record_step(
        &mut self,
        description: impl Into<String>,
        status: StepStatus,
        details: impl Into<String>,
    ) {
        let step = StepRecord {
            timestamp: self.clock.now().time(),
            description: description.into(),
            status,
            details: details.into(),
        };

        match (step.status, step.has_details()) {
            (StepStatus::Fail, true) => error!("[{}] {} ({})", step.status, step.description, step.details),
            (StepStatus::Fail, false) => error!("[{}] {}", step.status, step.description),
            (StepStatus::Warn, true) => warn!("[{}] {} ({})", step.status, step.description, step.details),
            (StepStatus::Warn, false) => warn!("[{}] {}", step.status, step.description),
            (_, true) => info!("[{}] {} ({})", step.status, step.description, step.details),
            (_, false) => info!("[{}] {}", step.status, step.description),
        }

        self.steps.push(step);
    }

    /// Append a step whose status arrives as free text
    pub fn record_step_lenient(
        &mut self,
        description: impl Into<String>,
        status: &str,
        details: impl Into<String>,
    ) {
        self.record_step(description, StepStatus::parse_lenient(status), details);
    }

    pub fn info(&mut self, description: impl Into<String>) {
        self.record_step(description, StepStatus::Info, "");
    }

    pub fn pass(&mut self, description: impl Into<String>) {
        self.record_step(description, StepStatus::Pass, "");
    }

    pub fn warn(&mut self, description: impl Into<String>) {
        self.record_step(description, StepStatus::Warn, "");
    }

    pub fn fail(&mut self, description: impl Into<String>) {
        self.record_step(description, StepStatus::Fail, "");
    }

    /// Save a screenshot through the session and keep its file name.
    ///
    /// Nothing is recorded when the session fails to write the image.
    pub fn capture_screenshot(
        &mut self,
        session: &mut dyn BrowserSession,
        label: &str,
    ) -> ReportResult<String> {
        let file_name = self.next_screenshot_name(label);
        let path = self.config.output_dir.join(&file_name);

        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| ReportError::Capture {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!("Capturing screenshot: {}", path.display());
        session.save_screenshot(&path)?;

        let label = sanitize_label(label);
        self.screenshots.push(ScreenshotRef {
            file_name: file_name.clone(),
            label: (!label.is_empty()).then_some(label),
        });

        Ok(file_name)
    }

    /// Best-effort capture for cleanup paths: logs and returns `None` on failure
    pub fn try_capture_screenshot(
        &mut self,
        session: &mut dyn BrowserSession,
        label: &str,
    ) -> Option<String> {
        match self.capture_screenshot(session, label) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("Screenshot '{}' skipped: {}", label, e);
                None
            }
        }
    }

    fn next_screenshot_name(&self, label: &str) -> String {
        let stamp = self.clock.now().format(STAMP_FORMAT).to_string();
        let label = sanitize_label(label);
        let base = if label.is_empty() {
            format!("{}_{}", self.config.screenshot_prefix, stamp)
        } else {
            format!("{}_{}_{}", self.config.screenshot_prefix, label, stamp)
        };

        let mut candidate = format!("{}.png", base);
        let mut n = 1;
        while self.screenshots.iter().any(|s| s.file_name == candidate) {
            n += 1;
            candidate = format!("{}_{}.png", base, n);
        }
        candidate
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn screenshots(&self) -> &[ScreenshotRef] {
        &self.screenshots
    }

    pub fn screenshot_path(&self, screenshot: &ScreenshotRef) -> PathBuf {
        self.config.output_dir.join(&screenshot.file_name)
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Statistics as of now
    pub fn summary(&self) -> RunSummary {
        RunSummary::compute(&self.steps, self.started_at, self.clock.now())
    }
}

fn sanitize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
