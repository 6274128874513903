//! Minimal smoke run: open one page, screenshot it, report

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use stepreport::playwright::{Browser, PlaywrightConfig, PlaywrightSession};
use stepreport::{
    BrowserSession, OverallStatus, ReportRenderer, ReportResult, ReporterConfig, SessionSnapshot,
    StepRecorder, StepStatus,
};

use crate::output::print_error;

#[derive(Args)]
pub struct SmokeArgs {
    /// Page to open
    #[arg(long, required = true)]
    pub url: String,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    pub browser: Browser,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value = "40000")]
    pub timeout_ms: u64,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SmokeArgs, mut config: ReporterConfig) -> anyhow::Result<bool> {
    if let Some(output) = args.output.clone() {
        config.output_dir = output;
    }
    let mut recorder = StepRecorder::new(config);

    let playwright = PlaywrightConfig {
        browser: args.browser,
        headless: !args.headed,
        navigation_timeout_ms: args.timeout_ms,
        ..Default::default()
    };

    let (overall, snapshot) = match PlaywrightSession::launch(playwright) {
        Ok(mut session) => {
            let overall = match run(&mut recorder, &mut session, &args.url) {
                Ok(()) => OverallStatus::Pass,
                Err(e) => {
                    recorder.fail(format!("Test failed with error: {}", truncate(&e.to_string(), 200)));
                    recorder.try_capture_screenshot(&mut session, "error_state");
                    OverallStatus::Fail
                }
            };
            let snapshot = SessionSnapshot::capture(&session);
            session.close();
            (overall, snapshot)
        }
        Err(e) => {
            recorder.record_step("Launching browser", StepStatus::Fail, e.to_string());
            (OverallStatus::Fail, SessionSnapshot::default())
        }
    };

    let outcome = ReportRenderer::new(&recorder).render(&snapshot, overall);
    let summary = &outcome.summary;

    println!();
    println!("{}", "=".repeat(60));
    println!("TEST EXECUTION COMPLETE");
    println!("{}", "=".repeat(60));
    let status = match overall {
        OverallStatus::Pass => overall.as_str().green().bold(),
        OverallStatus::Fail => overall.as_str().red().bold(),
    };
    println!("Overall Status: {}", status);
    println!("Total Steps: {}", summary.total);
    println!("Passed: {} | Failed: {}", summary.passed, summary.failed);
    println!();
    println!("Reports Generated in '{}' folder:", recorder.config().output_dir.display());
    for artifact in &outcome.artifacts {
        match &artifact.result {
            Ok(path) => println!(
                "  {}: {}",
                artifact.format.as_str().to_uppercase(),
                path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
            ),
            Err(e) => print_error(&format!("{} report failed: {}", artifact.format, e)),
        }
    }
    println!("{}", "=".repeat(60));

    Ok(overall == OverallStatus::Pass && outcome.all_succeeded())
}

fn run(recorder: &mut StepRecorder, session: &mut PlaywrightSession, url: &str) -> ReportResult<()> {
    recorder.info(format!("Opening {}", url));
    session.navigate(url)?;

    let landed = session.current_url()?;
    recorder.record_step("Page loaded", StepStatus::Pass, format!("URL: {}", landed));

    let title = session.title()?;
    if title.trim().is_empty() {
        recorder.warn("Page has no title");
    } else {
        recorder.pass(format!("Page title: {}", title));
    }

    recorder.capture_screenshot(session, "landing")?;
    recorder.pass("Smoke run completed successfully");
    Ok(())
}

fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
