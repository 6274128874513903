//! Error types for step reporting

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Browser session is closed")]
    SessionClosed,

    #[error("Browser session error: {0}")]
    Session(String),

    #[error("Screenshot capture failed for {path}: {reason}")]
    Capture { path: String, reason: String },

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Unknown step status: {0}")]
    InvalidStatus(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
