//! Reporter configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};
use crate::render::ReportFormat;

/// Configuration shared by the recorder and the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Human-readable run name shown in every report
    pub run_name: String,

    /// Directory for screenshots and report artifacts
    pub output_dir: PathBuf,

    /// Prefix of report file names
    pub report_prefix: String,

    /// Prefix of screenshot file names
    pub screenshot_prefix: String,

    /// Report formats to render
    pub formats: Vec<ReportFormat>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            run_name: "SSO & Create Case Flow".to_string(),
            output_dir: PathBuf::from("report"),
            report_prefix: "test_report".to_string(),
            screenshot_prefix: "screenshot".to_string(),
            formats: ReportFormat::ALL.to_vec(),
        }
    }
}

impl ReporterConfig {
    /// Load configuration from a TOML file, or defaults if it does not exist
    pub fn load(path: &Path) -> ReportResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> ReportResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ReportError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.report_prefix.trim().is_empty() {
            return Err(ReportError::Config("report_prefix must not be empty".into()));
        }
        if self.screenshot_prefix.trim().is_empty() {
            return Err(ReportError::Config("screenshot_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_run_name(mut self, name: impl Into<String>) -> Self {
        self.run_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReporterConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ReporterConfig::default());
        assert_eq!(config.formats.len(), 3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stepreport.toml");
        std::fs::write(&path, "run_name = \"Landing page\"\nformats = [\"json\"]\n").unwrap();

        let config = ReporterConfig::load(&path).unwrap();
        assert_eq!(config.run_name, "Landing page");
        assert_eq!(config.formats, vec![ReportFormat::Json]);
        assert_eq!(config.output_dir, PathBuf::from("report"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/stepreport.toml");
        let config = ReporterConfig::default().with_run_name("Smoke");
        config.save(&path).unwrap();
        assert_eq!(ReporterConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "report_prefix = \"\"\n").unwrap();
        assert!(matches!(
            ReporterConfig::load(&path),
            Err(ReportError::Config(_))
        ));
    }
}
