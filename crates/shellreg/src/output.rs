//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use shellreg_core::{InstallOutcome, KeyOp, RegistrationReport};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print one line per ProgId of a bulk operation
pub fn report(report: &RegistrationReport) {
    for entry in &report.entries {
        match &entry.result {
            Ok(InstallOutcome::Applied) => {
                println!("  {} {}", "✓".green(), entry.id)
            }
            Ok(InstallOutcome::NotApplicable) => {
                println!("  {} {} {}", "-".dimmed(), entry.id, "(no registry)".dimmed())
            }
            Err(e) => println!("  {} {}: {}", "✗".red(), entry.id, e.to_string().red()),
        }
    }
}

/// Print the key store calls a dry run recorded
pub fn preview_calls(calls: &[KeyOp]) {
    header(&format!("Registry writes ({})", calls.len()));
    for op in calls {
        println!("  {}", op.dimmed());
    }
}
