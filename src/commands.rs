//! CLI argument definitions
//!
//! Defines the clap arguments for the harness.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codraft-harness", about = "Scenario test runner for Codraft templates")]
#[command(version, long_about = None)]
pub struct Args {
    /// Scenario files or glob patterns (default: every scenario in the scenarios directory)
    ///
    /// Patterns that match nothing are kept as-is so the missing file is
    /// reported as a failed scenario.
    pub patterns: Vec<String>,

    /// Test root containing fixtures/, scenarios/ and results/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/harness.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// List the scenarios that would run, without running them
    #[arg(long)]
    pub list: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
