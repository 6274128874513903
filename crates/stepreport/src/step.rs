//! Step records, statuses and screenshot references

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::ReportError;

/// Status of a single recorded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StepStatus {
    Pass,
    Fail,
    #[default]
    Info,
    Warn,
}

impl StepStatus {
    pub const ALL: [StepStatus; 4] = [
        StepStatus::Pass,
        StepStatus::Fail,
        StepStatus::Info,
        StepStatus::Warn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pass => "PASS",
            StepStatus::Fail => "FAIL",
            StepStatus::Info => "INFO",
            StepStatus::Warn => "WARN",
        }
    }

    /// Parse a free-text status, falling back to `Info` for unknown values.
    ///
    /// The fallback is logged so a typo in a driver never disappears into
    /// the pass/fail counts unnoticed.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.parse() {
            Ok(status) => status,
            Err(_) => {
                warn!("Unknown step status '{}', counting it as INFO", raw);
                StepStatus::Info
            }
        }
    }
}

impl FromStr for StepStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" | "PASSED" => Ok(StepStatus::Pass),
            "FAIL" | "FAILED" => Ok(StepStatus::Fail),
            "INFO" => Ok(StepStatus::Info),
            "WARN" | "WARNING" => Ok(StepStatus::Warn),
            _ => Err(ReportError::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StepStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StepStatus::parse_lenient(&raw))
    }
}

/// Verdict for the whole run, supplied by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    #[default]
    Pass,
    Fail,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Pass => "PASS",
            OverallStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverallStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(OverallStatus::Pass),
            "FAIL" => Ok(OverallStatus::Fail),
            _ => Err(ReportError::InvalidStatus(s.to_string())),
        }
    }
}

/// One recorded step. Never mutated after the recorder appends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Wall-clock time of day the step was recorded
    #[serde(with = "time_of_day")]
    pub timestamp: NaiveTime,

    pub description: String,

    pub status: StepStatus,

    /// Free-text details, empty when none were given
    #[serde(default)]
    pub details: String,
}

impl StepRecord {
    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format(time_of_day::FORMAT).to_string()
    }
}

/// Reference to a screenshot file written through the browser session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotRef {
    /// File name relative to the report output directory
    pub file_name: String,

    #[serde(default)]
    pub label: Option<String>,
}

mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PASS", StepStatus::Pass)]
    #[test_case("passed", StepStatus::Pass)]
    #[test_case("FAIL", StepStatus::Fail)]
    #[test_case(" fail ", StepStatus::Fail)]
    #[test_case("INFO", StepStatus::Info)]
    #[test_case("Warning", StepStatus::Warn)]
    fn test_parse_known_status(raw: &str, expected: StepStatus) {
        assert_eq!(raw.parse::<StepStatus>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_status_is_rejected_strictly() {
        let err = "SKIPPED".parse::<StepStatus>().unwrap_err();
        assert!(matches!(err, ReportError::InvalidStatus(s) if s == "SKIPPED"));
    }

    #[test]
    fn test_unknown_status_counts_as_info_leniently() {
        assert_eq!(StepStatus::parse_lenient("SKIPPED"), StepStatus::Info);
        assert_eq!(StepStatus::parse_lenient(""), StepStatus::Info);
    }

    #[test]
    fn test_step_record_json_shape() {
        let step = StepRecord {
            timestamp: NaiveTime::from_hms_opt(9, 5, 7).unwrap(),
            description: "Submit failed".to_string(),
            status: StepStatus::Fail,
            details: "timeout".to_string(),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["timestamp"], "09:05:07");
        assert_eq!(value["status"], "FAIL");
        assert_eq!(value["details"], "timeout");
    }

    #[test]
    fn test_deserialize_unknown_status_as_info() {
        let json = r#"{"timestamp":"10:00:00","description":"x","status":"BLOCKED"}"#;
        let step: StepRecord = serde_json::from_str(json).unwrap();
        assert_eq!(step.status, StepStatus::Info);
        assert!(!step.has_details());
    }

    #[test]
    fn test_overall_status_serde() {
        assert_eq!(serde_json::to_string(&OverallStatus::Fail).unwrap(), "\"FAIL\"");
        assert_eq!("pass".parse::<OverallStatus>().unwrap(), OverallStatus::Pass);
    }
}
