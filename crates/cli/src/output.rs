//! Terminal output for the CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use stepreport::StepStatus;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Empty table with the CLI's preset
pub fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Status cell colored the way the HTML report colors step borders
pub fn status_cell(status: StepStatus) -> Cell {
    let color = match status {
        StepStatus::Pass => Color::Green,
        StepStatus::Fail => Color::Red,
        StepStatus::Warn => Color::Yellow,
        StepStatus::Info => Color::Blue,
    };
    Cell::new(status.as_str()).fg(color)
}

pub fn print_success(message: &str) {
    println!("{} {}", "✔".green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✘".red().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}
