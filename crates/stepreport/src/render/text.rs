//! Plain-text report

use std::fmt::Write;

use super::ReportContext;
use crate::step::StepStatus;

const BANNER_WIDTH: usize = 60;

pub fn glyph(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pass => "✓",
        StepStatus::Fail => "✗",
        StepStatus::Info => "i",
        StepStatus::Warn => "!",
    }
}

fn statistics_label(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pass => "Passed",
        StepStatus::Fail => "Failed",
        StepStatus::Info => "Info",
        StepStatus::Warn => "Warnings",
    }
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    let _ = write!(out, "{rule}\n{title}\n{rule}\n\n");
}

pub fn render(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let summary = ctx.summary;

    banner(&mut out, "TEST EXECUTION REPORT");
    let _ = writeln!(out, "Test Name: {}", ctx.run_name);
    let _ = writeln!(out, "Execution Time: {}", ctx.executed_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Overall Status: {}", ctx.overall);
    let _ = writeln!(out, "Duration: {} seconds", summary.elapsed_secs);
    out.push('\n');
    let _ = writeln!(out, "Final URL: {}", ctx.session.final_url);
    let _ = writeln!(out, "Page Title: {}", ctx.session.page_title);
    let _ = writeln!(out, "Browser: {}", ctx.session.browser.label());
    out.push('\n');

    banner(&mut out, "STEP-BY-STEP EXECUTION");
    if ctx.steps.is_empty() {
        out.push_str("(no steps recorded)\n\n");
    }
    for (i, step) in ctx.steps.iter().enumerate() {
        let _ = writeln!(out, "{} Step {}: {}", glyph(step.status), i + 1, step.description);
        let _ = writeln!(out, "   Time: {} | Status: {}", step.time_label(), step.status);
        if step.has_details() {
            let _ = writeln!(out, "   Details: {}", step.details);
        }
        out.push('\n');
    }

    banner(&mut out, "STATISTICS");
    let _ = writeln!(out, "Total Steps: {}", summary.total);
    for status in StepStatus::ALL {
        let _ = writeln!(out, "{}: {}", statistics_label(status), summary.count(status));
    }
    out.push('\n');

    out.push_str("Screenshots:\n");
    if ctx.screenshots.is_empty() {
        out.push_str("  (none)\n");
    }
    for shot in ctx.screenshots {
        let _ = writeln!(out, "  - {}", shot.file_name);
    }

    out
}
