//! Terminal report
//!
//! Everything the harness prints to stdout goes through here.

use colored::Colorize;

use crate::common::Error;

use super::checks::CheckResult;
use super::runner::ScenarioResult;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print the banner opening a scenario
pub fn scenario_header(name: &str, description: Option<&str>) {
    println!("\n{}", rule());
    println!("{} {}", "Scenario:".blue().bold(), name.white().bold());
    println!("  {}", description.unwrap_or_default().trim().dimmed());
    println!("{}", rule());
}

/// Print a scenario-level failure
pub fn scenario_error(error: &Error) {
    println!("  {} {}", "ERROR:".red().bold(), error);
}

/// Print where a scenario's output was written
pub fn rendered(destination: &str) {
    println!("  Rendered → {}", destination.dimmed());
}

/// Print one check outcome
pub fn check(result: &CheckResult) {
    let mark = if result.passed {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("  {} {}", mark, result.message);
}

/// Print a scenario's verdict
pub fn verdict(passed: bool) {
    println!("\n  Result: {}", status(passed));
}

/// Print the final summary table
pub fn summary(results: &[ScenarioResult]) {
    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    println!("\n{}", rule());
    let line = format!("SUMMARY: {}/{} scenarios passed", passed, total);
    if passed == total {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
    println!("{}", rule());
    for result in results {
        println!("  [{}] {}", status(result.passed), result.name);
    }
}

fn status(passed: bool) -> colored::ColoredString {
    if passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}
