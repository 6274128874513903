//! Playwright-backed browser session

use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::session::{BrowserInfo, BrowserSession};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(ReportError::Config(format!("unknown browser: {}", other))),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,
    pub navigation_timeout_ms: u64,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            viewport_width: 1280,
            viewport_height: 720,
            headless: true,
            navigation_timeout_ms: 40_000,
        }
    }
}

/// Page state printed by every generated script
#[derive(Debug, Clone, Deserialize)]
struct PageState {
    url: String,
    title: String,
    #[serde(default)]
    version: String,
}

/// Browser session that drives Playwright through short-lived Node scripts.
///
/// Every action launches the browser, loads the current URL and exits, so
/// the session itself only tracks the last known address, title and the
/// browser build that served them.
pub struct PlaywrightSession {
    config: PlaywrightConfig,
    version: String,
    browser_version: String,
    current_url: Option<String>,
    title: String,
    closed: bool,
}

impl PlaywrightSession {
    /// Verify Playwright is installed and open a session
    pub fn launch(config: PlaywrightConfig) -> ReportResult<Self> {
        let version = Self::detect_version()?;
        info!("Using Playwright {} ({})", version, config.browser.as_str());

        Ok(Self {
            config,
            version,
            browser_version: String::new(),
            current_url: None,
            title: String::new(),
            closed: false,
        })
    }

    fn detect_version() -> ReportResult<String> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdin(Stdio::null())
            .output()
            .map_err(|_| ReportError::PlaywrightNotFound)?;

        if !output.status.success() {
            return Err(ReportError::PlaywrightNotFound);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_version(&stdout).unwrap_or_else(|| "unknown".to_string()))
    }

    /// Load `url` and remember where the browser ended up
    pub fn navigate(&mut self, url: &str) -> ReportResult<()> {
        self.ensure_open()?;
        let script = self.build_script(url, None);
        let state = self.run_script(&script)?;
        debug!("Navigated to {} ({})", state.url, state.title);
        self.apply(state);
        Ok(())
    }

    fn apply(&mut self, state: PageState) {
        self.current_url = Some(state.url);
        self.title = state.title;
        if !state.version.is_empty() {
            self.browser_version = state.version;
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    fn ensure_open(&self) -> ReportResult<()> {
        if self.closed {
            Err(ReportError::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Build the Node script for one page load, optionally ending in a screenshot
    pub fn build_script(&self, url: &str, screenshot: Option<&Path>) -> String {
        // serde_json string encoding doubles as a safe JS string literal.
        let url_literal = serde_json::to_string(url).unwrap_or_else(|_| "\"about:blank\"".to_string());
        let capture = screenshot
            .map(|path| {
                let path_literal = serde_json::to_string(&path.to_string_lossy())
                    .unwrap_or_else(|_| "\"screenshot.png\"".to_string());
                format!("\n    await page.screenshot({{ path: {} }});", path_literal)
            })
            .unwrap_or_default();

        format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto({url}, {{ timeout: {timeout} }});{capture}
    console.log(JSON.stringify({{ url: page.url(), title: await page.title(), version: browser.version() }}));
  }} catch (error) {{
    console.error(JSON.stringify({{ error: error.message }}));
    process.exit(1);
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            url = url_literal,
            timeout = self.config.navigation_timeout_ms,
            capture = capture,
        )
    }

    fn run_script(&self, script: &str) -> ReportResult<PageState> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("session.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = Command::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReportError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        parse_page_state(&stdout)
    }
}

impl BrowserSession for PlaywrightSession {
    fn save_screenshot(&mut self, path: &Path) -> ReportResult<()> {
        self.ensure_open()?;
        let url = self
            .current_url
            .clone()
            .ok_or_else(|| ReportError::Session("no page has been loaded".to_string()))?;

        let script = self.build_script(&url, Some(path));
        let state = self.run_script(&script).map_err(|e| ReportError::Capture {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.apply(state);

        if !path.exists() {
            return Err(ReportError::Capture {
                path: path.display().to_string(),
                reason: "Playwright reported success but no file was written".to_string(),
            });
        }
        Ok(())
    }

    fn current_url(&self) -> ReportResult<String> {
        self.ensure_open()?;
        Ok(self.current_url.clone().unwrap_or_else(|| "about:blank".to_string()))
    }

    fn title(&self) -> ReportResult<String> {
        self.ensure_open()?;
        Ok(self.title.clone())
    }

    fn browser_info(&self) -> ReportResult<BrowserInfo> {
        let mut info = BrowserInfo::new(self.config.browser.as_str(), self.browser_version.as_str());
        info.capabilities.insert("playwrightVersion".into(), self.version.clone().into());
        info.capabilities.insert("headless".into(), self.config.headless.into());
        info.capabilities.insert(
            "viewport".into(),
            serde_json::json!({
                "width": self.config.viewport_width,
                "height": self.config.viewport_height,
            }),
        );
        Ok(info)
    }
}

/// Extract the version number from `npx playwright --version` output
pub fn parse_version(output: &str) -> Option<String> {
    let re = Regex::new(r"(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The last JSON line on stdout carries the page state
fn parse_page_state(stdout: &str) -> ReportResult<PageState> {
    let line = stdout
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .ok_or_else(|| ReportError::Playwright("script printed no page state".to_string()))?;
    Ok(serde_json::from_str(line)?)
}
