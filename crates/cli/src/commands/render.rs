//! Re-render a saved JSON report

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use stepreport::{MachineReport, ReportFormat, ReportRenderer, ReporterConfig};
use tracing::info;

use crate::output::{print_error, print_success, print_warning};

#[derive(Args)]
pub struct RenderArgs {
    /// Path to a JSON report written by a previous run
    #[arg(required = true)]
    pub report: PathBuf,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only render these formats (comma separated: html,json,text)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ReportFormat>,
}

pub fn execute(args: RenderArgs, mut config: ReporterConfig) -> anyhow::Result<bool> {
    let report = MachineReport::from_file(&args.report)?;
    info!(
        "Loaded report {} ({} steps, {} screenshots)",
        args.report.display(),
        report.test_steps.len(),
        report.screenshots.len()
    );

    if !report.is_consistent() {
        print_warning(&format!(
            "Stored statistics in {} do not match its steps; re-rendered reports use the recount",
            args.report.display()
        ));
    }

    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if !args.only.is_empty() {
        config.formats = args.only;
    }

    let session = report.session();
    let overall = report.overall_status;
    let recorder = report.into_recorder(config);
    let outcome = ReportRenderer::new(&recorder).render(&session, overall);

    println!();
    println!("{}", "📊 TEST REPORT GENERATED:".bold());
    for artifact in &outcome.artifacts {
        match &artifact.result {
            Ok(path) => println!("   {} Report: {}", artifact.format.as_str().to_uppercase(), path.display()),
            Err(e) => print_error(&format!("{} report failed: {}", artifact.format, e)),
        }
    }

    if outcome.all_succeeded() {
        print_success(&format!("Rendered run {}", outcome.run_stamp));
    }
    Ok(outcome.all_succeeded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepreport::{OverallStatus, SessionSnapshot, StepRecorder, StepStatus};

    fn saved_report(dir: &std::path::Path) -> PathBuf {
        let config = ReporterConfig::default()
            .with_output_dir(dir.join("first"))
            .with_run_name("Landing page");
        let mut recorder = StepRecorder::new(config);
        recorder.pass("Opened landing page");
        recorder.record_step("Checked hero banner", StepStatus::Warn, "slow image");

        let outcome = ReportRenderer::new(&recorder).render(&SessionSnapshot::default(), OverallStatus::Pass);
        outcome.path(ReportFormat::Json).unwrap().to_path_buf()
    }

    #[test]
    fn test_render_writes_only_requested_formats() {
        let dir = tempfile::tempdir().unwrap();
        let report = saved_report(dir.path());
        let out = dir.path().join("second");

        let args = RenderArgs {
            report,
            output: Some(out.clone()),
            only: vec![ReportFormat::Text],
        };
        assert!(execute(args, ReporterConfig::default()).unwrap());

        let written: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with(".txt"));

        let text = std::fs::read_to_string(out.join(&written[0])).unwrap();
        assert!(text.contains("Landing page"));
        assert!(text.contains("Checked hero banner"));
    }

    #[test]
    fn test_render_missing_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            report: dir.path().join("missing.json"),
            output: None,
            only: Vec::new(),
        };
        assert!(execute(args, ReporterConfig::default()).is_err());
    }
}
