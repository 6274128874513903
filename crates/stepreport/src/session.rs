//! Browser session collaborator and the render-time snapshot taken from it

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ReportResult;

/// An active browser session driven by the test.
///
/// Implementations return `ReportError::SessionClosed` once the underlying
/// browser has gone away.
pub trait BrowserSession {
    /// Capture the current viewport to an image file at `path`
    fn save_screenshot(&mut self, path: &Path) -> ReportResult<()>;

    /// Currently navigated address
    fn current_url(&self) -> ReportResult<String>;

    /// Current document title
    fn title(&self) -> ReportResult<String>;

    fn browser_info(&self) -> ReportResult<BrowserInfo>;
}

/// Browser name/version pair plus any raw capabilities the session exposes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub capabilities: BTreeMap<String, serde_json::Value>,
}

impl BrowserInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            capabilities: BTreeMap::new(),
        }
    }

    /// "name version", or just the name when the version is unknown
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.version).trim().to_string()
    }
}

/// Point-in-time session metadata used only for reporting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub final_url: String,
    pub page_title: String,
    pub browser: BrowserInfo,
}

impl SessionSnapshot {
    /// Read the session's final state.
    ///
    /// Runs in the cleanup path, so a field the session can no longer
    /// provide is left empty and logged instead of aborting the render.
    pub fn capture(session: &dyn BrowserSession) -> Self {
        let final_url = session.current_url().unwrap_or_else(|e| {
            warn!("Could not read final URL from session: {}", e);
            String::new()
        });
        let page_title = session.title().unwrap_or_else(|e| {
            warn!("Could not read page title from session: {}", e);
            String::new()
        });
        let browser = session.browser_info().unwrap_or_else(|e| {
            warn!("Could not read browser info from session: {}", e);
            BrowserInfo::default()
        });

        Self {
            final_url,
            page_title,
            browser,
        }
    }
}
