//! Report rendering: one shared summary, three output formats

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ReportError, ReportResult};
use crate::recorder::StepRecorder;
use crate::session::SessionSnapshot;
use crate::step::{OverallStatus, ScreenshotRef, StepRecord};
use crate::summary::RunSummary;
use crate::STAMP_FORMAT;

pub mod html;
pub mod json;
pub mod text;

pub use json::{MachineReport, Statistics};

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Html,
    Json,
    Text,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Html, ReportFormat::Json, ReportFormat::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Text => "text",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }

    /// Serialize one report body
    pub fn render(&self, ctx: &ReportContext<'_>) -> ReportResult<String> {
        match self {
            ReportFormat::Html => Ok(html::render(ctx)),
            ReportFormat::Json => json::render(ctx),
            ReportFormat::Text => Ok(text::render(ctx)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(ReportError::Config(format!("unknown report format: {}", other))),
        }
    }
}

/// Everything a format needs, frozen for one render call
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub run_name: &'a str,
    pub executed_at: DateTime<Local>,
    pub run_stamp: &'a str,
    pub overall: OverallStatus,
    pub summary: &'a RunSummary,
    pub session: &'a SessionSnapshot,
    pub steps: &'a [StepRecord],
    pub screenshots: &'a [ScreenshotRef],
}

/// Result of writing one format
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub format: ReportFormat,
    pub result: ReportResult<PathBuf>,
}

/// Result of a render call: one entry per enabled format
#[derive(Debug)]
pub struct RenderOutcome {
    pub run_stamp: String,
    pub summary: RunSummary,
    pub artifacts: Vec<ArtifactOutcome>,
}

impl RenderOutcome {
    /// Path of a successfully written format
    pub fn path(&self, format: ReportFormat) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.format == format)
            .and_then(|a| a.result.as_ref().ok())
            .map(PathBuf::as_path)
    }

    pub fn all_succeeded(&self) -> bool {
        self.artifacts.iter().all(|a| a.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (ReportFormat, &ReportError)> + '_ {
        self.artifacts
            .iter()
            .filter_map(|a| a.result.as_ref().err().map(|e| (a.format, e)))
    }
}

/// Renders a recorder's state into report artifacts
pub struct ReportRenderer<'a> {
    recorder: &'a StepRecorder,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(recorder: &'a StepRecorder) -> Self {
        Self { recorder }
    }

    /// Write every enabled format to the output directory.
    ///
    /// Each format is attempted even if an earlier one failed.
    pub fn render(&self, session: &SessionSnapshot, overall: OverallStatus) -> RenderOutcome {
        let executed_at = self.recorder.clock().now();
        let run_stamp = executed_at.format(STAMP_FORMAT).to_string();
        let summary = RunSummary::compute(self.recorder.steps(), self.recorder.started_at(), executed_at);
        let ctx = self.context(executed_at, &run_stamp, &summary, session, overall);

        let mut formats: Vec<ReportFormat> = Vec::new();
        for format in &self.recorder.config().formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }

        let artifacts: Vec<ArtifactOutcome> = formats
            .into_iter()
            .map(|format| {
                let result = self.write_format(format, &ctx);
                match &result {
                    Ok(path) => info!("{} report: {}", format.as_str().to_uppercase(), path.display()),
                    Err(e) => error!("{} report failed: {}", format.as_str().to_uppercase(), e),
                }
                ArtifactOutcome { format, result }
            })
            .collect();

        info!(
            "Test report generated: {} steps, {} passed, {} failed ({}s)",
            summary.total, summary.passed, summary.failed, summary.elapsed_secs
        );

        RenderOutcome {
            run_stamp,
            summary,
            artifacts,
        }
    }

    /// Render one format in memory without touching the filesystem
    pub fn render_to_string(
        &self,
        format: ReportFormat,
        session: &SessionSnapshot,
        overall: OverallStatus,
    ) -> ReportResult<String> {
        let executed_at = self.recorder.clock().now();
        let run_stamp = executed_at.format(STAMP_FORMAT).to_string();
        let summary = RunSummary::compute(self.recorder.steps(), self.recorder.started_at(), executed_at);
        let ctx = self.context(executed_at, &run_stamp, &summary, session, overall);
        format.render(&ctx)
    }

    fn context<'c>(
        &'c self,
        executed_at: DateTime<Local>,
        run_stamp: &'c str,
        summary: &'c RunSummary,
        session: &'c SessionSnapshot,
        overall: OverallStatus,
    ) -> ReportContext<'c> {
        ReportContext {
            run_name: &self.recorder.config().run_name,
            executed_at,
            run_stamp,
            overall,
            summary,
            session,
            steps: self.recorder.steps(),
            screenshots: self.recorder.screenshots(),
        }
    }

    fn write_format(&self, format: ReportFormat, ctx: &ReportContext<'_>) -> ReportResult<PathBuf> {
        let config = self.recorder.config();
        let body = format.render(ctx)?;

        let dir = &config.output_dir;
        std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(format!(
            "{}_{}.{}",
            config.report_prefix,
            ctx.run_stamp,
            format.extension()
        ));
        std::fs::write(&path, body).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
