//! stepreport - step recording and reporting for browser-driven E2E runs
//!
//! This crate provides the reporting core shared by E2E driver scripts:
//! - Records timestamped, status-tagged steps as the run progresses
//! - Captures screenshots through an external browser session
//! - Renders one run into HTML, JSON and plain-text reports
//! - Keeps all three reports statistically consistent
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   E2E driver (out of crate)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  StepRecorder                                               │
//! │    ├── record_step(description, status, details)            │
//! │    ├── capture_screenshot(session, label) -> filename       │
//! │    └── summary() -> RunSummary                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ReportRenderer                                             │
//! │    └── render(snapshot, overall) -> RenderOutcome           │
//! │          ├── html  -> test_report_YYYYMMDD_HHMMSS.html      │
//! │          ├── json  -> test_report_YYYYMMDD_HHMMSS.json      │
//! │          └── text  -> test_report_YYYYMMDD_HHMMSS.txt       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BrowserSession (trait)                                     │
//! │    └── PlaywrightSession                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod playwright;
pub mod recorder;
pub mod render;
pub mod session;
pub mod step;
pub mod summary;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ReporterConfig;
pub use error::{ReportError, ReportResult};
pub use recorder::StepRecorder;
pub use render::{MachineReport, RenderOutcome, ReportFormat, ReportRenderer};
pub use session::{BrowserInfo, BrowserSession, SessionSnapshot};
pub use step::{OverallStatus, ScreenshotRef, StepRecord, StepStatus};
pub use summary::RunSummary;

/// Format of the run-level timestamp token embedded in file names
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
