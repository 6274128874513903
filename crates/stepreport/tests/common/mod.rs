//! Shared fixtures for stepreport integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, TimeZone};
use stepreport::{
    BrowserInfo, BrowserSession, ManualClock, ReportError, ReportResult, ReporterConfig,
    StepRecorder,
};

/// In-memory browser session that writes placeholder PNG bytes
pub struct FakeSession {
    pub url: String,
    pub title: String,
    pub open: bool,
    pub saved: Vec<PathBuf>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            url: "https://qa.example.test/rms-sp/#/home".to_string(),
            title: "Home".to_string(),
            open: true,
            saved: Vec::new(),
        }
    }
}

impl BrowserSession for FakeSession {
    fn save_screenshot(&mut self, path: &Path) -> ReportResult<()> {
        if !self.open {
            return Err(ReportError::SessionClosed);
        }
        std::fs::write(path, b"\x89PNG\r\n\x1a\n")?;
        self.saved.push(path.to_path_buf());
        Ok(())
    }

    fn current_url(&self) -> ReportResult<String> {
        if !self.open {
            return Err(ReportError::SessionClosed);
        }
        Ok(self.url.clone())
    }

    fn title(&self) -> ReportResult<String> {
        if !self.open {
            return Err(ReportError::SessionClosed);
        }
        Ok(self.title.clone())
    }

    fn browser_info(&self) -> ReportResult<BrowserInfo> {
        let mut info = BrowserInfo::new("chrome", "120.0.6099.109");
        info.capabilities
            .insert("platformName".to_string(), serde_json::json!("linux"));
        Ok(info)
    }
}

pub fn frozen_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Local.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap(),
    ))
}

pub fn recorder_in(dir: &Path) -> (StepRecorder, Arc<ManualClock>) {
    let clock = frozen_clock();
    let config = ReporterConfig::default().with_output_dir(dir);
    (StepRecorder::with_clock(config, clock.clone()), clock)
}
