//! Print statistics and steps of a saved JSON report

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use comfy_table::{Cell, Color};
use serde::Serialize;
use stepreport::render::Statistics;
use stepreport::{MachineReport, OverallStatus, StepRecord};

use crate::output::{print_warning, status_cell, table, OutputFormat};

#[derive(Args)]
pub struct SummaryArgs {
    /// Path to a JSON report
    #[arg(required = true)]
    pub report: PathBuf,

    /// Also list every step
    #[arg(long)]
    pub steps: bool,
}

#[derive(Serialize)]
struct SummaryView<'a> {
    test_name: &'a str,
    overall_status: OverallStatus,
    duration_seconds: u64,
    #[serde(flatten)]
    statistics: Statistics,
}

pub fn execute(args: SummaryArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let report = MachineReport::from_file(&args.report)?;
    let recount = report.recount();

    if recount != report.statistics {
        print_warning("Stored statistics do not match the step list; showing the recount");
    }

    println!("{}", render_summary(&report, recount, format)?);
    if args.steps {
        println!("{}", render_steps(&report.test_steps, format)?);
    }

    Ok(recount.failed_steps == 0)
}

fn render_summary(report: &MachineReport, stats: Statistics, format: OutputFormat) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Table => {
            let overall = match report.overall_status {
                OverallStatus::Pass => Cell::new(report.overall_status).fg(Color::Green),
                OverallStatus::Fail => Cell::new(report.overall_status).fg(Color::Red),
            };
            let mut table = table();
            table.set_header(vec!["Test", "Status", "Duration", "Total", "Passed", "Failed", "Info", "Warn"]);
            table.add_row(vec![
                Cell::new(&report.test_name),
                overall,
                Cell::new(format!("{}s", report.duration_seconds)),
                Cell::new(stats.total_steps),
                Cell::new(stats.passed_steps),
                Cell::new(stats.failed_steps),
                Cell::new(stats.info_steps),
                Cell::new(stats.warn_steps),
            ]);
            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(&SummaryView {
            test_name: &report.test_name,
            overall_status: report.overall_status,
            duration_seconds: report.duration_seconds,
            statistics: stats,
        })?,
        OutputFormat::Plain => format!(
            "Test: {}\nStatus: {}\nDuration: {}s\nSteps: {} (passed {}, failed {}, info {}, warn {})",
            report.test_name,
            report.overall_status,
            report.duration_seconds,
            stats.total_steps,
            stats.passed_steps,
            stats.failed_steps,
            stats.info_steps,
            stats.warn_steps,
        ),
    };
    Ok(out)
}

fn render_steps(steps: &[StepRecord], format: OutputFormat) -> anyhow::Result<String> {
    if steps.is_empty() && format != OutputFormat::Json {
        return Ok("No steps recorded.".to_string());
    }

    let out = match format {
        OutputFormat::Table => {
            let mut table = table();
            table.set_header(vec!["#", "Time", "Status", "Description", "Details"]);
            for (i, step) in steps.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(step.time_label()),
                    status_cell(step.status),
                    Cell::new(&step.description),
                    Cell::new(&step.details),
                ]);
            }
            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(steps)?,
        OutputFormat::Plain => {
            let mut out = String::new();
            for (i, step) in steps.iter().enumerate() {
                let _ = write!(out, "{}. [{}] {} {}", i + 1, step.status, step.time_label(), step.description);
                if step.has_details() {
                    let _ = write!(out, " - {}", step.details);
                }
                out.push('\n');
            }
            out.pop();
            out
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepreport::{ReportFormat, ReportRenderer, ReporterConfig, SessionSnapshot, StepRecorder, StepStatus};

    fn report() -> MachineReport {
        let mut recorder = StepRecorder::new(ReporterConfig::default().with_run_name("Landing page"));
        recorder.info("Opened landing page");
        recorder.record_step("Submitted form", StepStatus::Fail, "timeout");

        let json = ReportRenderer::new(&recorder)
            .render_to_string(ReportFormat::Json, &SessionSnapshot::default(), OverallStatus::Fail)
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_plain_summary_uses_recount() {
        let report = report();
        let out = render_summary(&report, report.recount(), OutputFormat::Plain).unwrap();
        assert!(out.starts_with("Test: Landing page\nStatus: FAIL\n"));
        assert!(out.ends_with("Steps: 2 (passed 0, failed 1, info 1, warn 0)"));
    }

    #[test]
    fn test_json_summary_flattens_statistics() {
        let report = report();
        let out = render_summary(&report, report.recount(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["overall_status"], "FAIL");
        assert_eq!(value["total_steps"], 2);
        assert_eq!(value["failed_steps"], 1);
    }

    #[test]
    fn test_plain_steps_keep_order_and_details() {
        let report = report();
        let out = render_steps(&report.test_steps, OutputFormat::Plain).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. [INFO] "));
        assert!(lines[0].ends_with(" Opened landing page"));
        assert!(lines[1].starts_with("2. [FAIL] "));
        assert!(lines[1].ends_with(" Submitted form - timeout"));
    }

    #[test]
    fn test_empty_steps() {
        assert_eq!(render_steps(&[], OutputFormat::Table).unwrap(), "No steps recorded.");
        assert_eq!(render_steps(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_step_table_lists_every_step() {
        let report = report();
        let out = render_steps(&report.test_steps, OutputFormat::Table).unwrap();
        assert!(out.contains("Opened landing page"));
        assert!(out.contains("Submitted form"));
        assert!(out.contains("timeout"));
    }
}
