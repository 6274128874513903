//! Self-contained HTML report

use std::fmt::Write;

use super::{escape_html, ReportContext};
use crate::step::{OverallStatus, StepStatus};

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
    .container { max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    .header { text-align: center; padding: 20px 0; border-bottom: 2px solid #eee; margin-bottom: 30px; }
    .status-badge { display: inline-block; padding: 5px 15px; border-radius: 20px; font-weight: bold; }
    .status-pass { background-color: #d4edda; color: #155724; }
    .status-fail { background-color: #f8d7da; color: #721c24; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 30px 0; }
    .summary-card { padding: 20px; border-radius: 8px; text-align: center; }
    .card-pass { background-color: #e8f5e9; }
    .card-fail { background-color: #ffebee; }
    .card-warn { background-color: #fff8e1; }
    .card-info { background-color: #e3f2fd; }
    .step-log { margin: 20px 0; }
    .step { padding: 15px; margin: 10px 0; border-radius: 5px; border-left: 5px solid; }
    .step-pass { border-left-color: #28a745; background-color: #f8fff9; }
    .step-fail { border-left-color: #dc3545; background-color: #fff8f8; }
    .step-warn { border-left-color: #ffc107; background-color: #fffdf5; }
    .step-info { border-left-color: #17a2b8; background-color: #f8fdff; }
    .screenshot-gallery { display: flex; flex-wrap: wrap; gap: 10px; margin: 20px 0; }
    .screenshot { width: 300px; border: 1px solid #ddd; border-radius: 5px; cursor: pointer; }
    .screenshot:hover { transform: scale(1.02); transition: transform 0.2s; }
    figure { margin: 0; }
    figcaption { font-size: 12px; color: #666; text-align: center; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #f8f9fa; }
    .empty { color: #888; font-style: italic; }
"#;

fn icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pass => "✅",
        StepStatus::Fail => "❌",
        StepStatus::Warn => "⚠️",
        StepStatus::Info => "ℹ️",
    }
}

fn badge_class(overall: OverallStatus) -> &'static str {
    match overall {
        OverallStatus::Pass => "status-pass",
        OverallStatus::Fail => "status-fail",
    }
}

pub fn render(ctx: &ReportContext<'_>) -> String {
    let mut html = String::new();
    let run_name = escape_html(ctx.run_name);
    let summary = ctx.summary;

    // Writing into a String cannot fail, so the fmt::Results are discarded.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{run_name} Test Report - {stamp}</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>🎯 {run_name} Test Report</h1>
      <h3>Execution Time: {executed}</h3>
      <div class="status-badge {badge}">{overall}</div>
    </div>

    <div class="summary">
      <div class="summary-card card-info"><h3>📋 Total Steps</h3><h2>{total}</h2></div>
      <div class="summary-card card-pass"><h3>✅ Passed</h3><h2>{passed}</h2></div>
      <div class="summary-card card-fail"><h3>❌ Failed</h3><h2>{failed}</h2></div>
      <div class="summary-card card-warn"><h3>⚠️ Warnings</h3><h2>{warn}</h2></div>
      <div class="summary-card card-info"><h3>⏱️ Duration</h3><h2>{elapsed} seconds</h2></div>
    </div>

    <h2>📝 Test Details</h2>
    <table>
      <tr><th>Final URL</th><td>{url}</td></tr>
      <tr><th>Page Title</th><td>{title}</td></tr>
      <tr><th>Browser</th><td>{browser}</td></tr>
    </table>

    <h2>📋 Step-by-Step Execution</h2>
    <div class="step-log">
"#,
        stamp = ctx.run_stamp,
        executed = ctx.executed_at.format("%Y-%m-%d %H:%M:%S"),
        badge = badge_class(ctx.overall),
        overall = ctx.overall,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        warn = summary.warn,
        elapsed = summary.elapsed_secs,
        url = escape_html(&ctx.session.final_url),
        title = escape_html(&ctx.session.page_title),
        browser = escape_html(&ctx.session.browser.label()),
    );

    if ctx.steps.is_empty() {
        html.push_str("      <p class=\"empty\">No steps recorded.</p>\n");
    }
    for (i, step) in ctx.steps.iter().enumerate() {
        let _ = write!(
            html,
            "      <div class=\"step step-{class}\">\n        <strong>{icon} Step {n}: {desc}</strong><br>\n        <small>Time: {time} | Status: {status}</small>",
            class = step.status.as_str().to_ascii_lowercase(),
            icon = icon(step.status),
            n = i + 1,
            desc = escape_html(&step.description),
            time = step.time_label(),
            status = step.status,
        );
        if step.has_details() {
            let _ = write!(html, "<br>\n        <small>Details: {}</small>", escape_html(&step.details));
        }
        html.push_str("\n      </div>\n");
    }

    html.push_str("    </div>\n\n    <h2>📸 Screenshots</h2>\n    <div class=\"screenshot-gallery\">\n");
    if ctx.screenshots.is_empty() {
        html.push_str("      <p class=\"empty\">No screenshots captured.</p>\n");
    }
    for (i, shot) in ctx.screenshots.iter().enumerate() {
        let src = escape_html(&shot.file_name);
        let caption = escape_html(shot.label.as_deref().unwrap_or(&shot.file_name));
        let _ = writeln!(
            html,
            "      <figure><img src=\"{src}\" alt=\"Screenshot {n}\" class=\"screenshot\" onclick=\"window.open(this.src)\"><figcaption>{caption}</figcaption></figure>",
            n = i + 1,
        );
    }

    let _ = write!(
        html,
        r#"    </div>

    <footer style="margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; text-align: center; color: #666;">
      <p>Generated by stepreport | {stamp}</p>
    </footer>
  </div>
</body>
</html>
"#,
        stamp = ctx.run_stamp,
    );

    html
}
