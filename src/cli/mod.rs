//! Test orchestration
//!
//! Discovers scenarios, runs them one after another and prints the summary.

pub mod discovery;

use std::path::PathBuf;

use crate::commands::Args;
use crate::common::config::Config;
use crate::common::paths::{Layout, CONFIG_FILE_NAME};
use crate::common::Result;
use crate::testing::{self, RunOptions, ScenarioResult};

/// Results of a whole run, in discovery order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    /// Number of passing scenarios
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of scenarios run
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True when at least one scenario ran and every scenario passed
    pub fn success(&self) -> bool {
        !self.results.is_empty() && self.passed() == self.total()
    }
}

/// Load configuration, resolve the layout and discover scenarios
fn prepare(args: &Args) -> Result<(Config, Layout, Vec<PathBuf>)> {
    let config = Config::load(args.config.as_deref(), &args.root.join(CONFIG_FILE_NAME))?;
    let layout = Layout::new(&args.root, &config.layout);
    let scenarios = discovery::discover(&args.patterns, &layout);
    tracing::debug!(
        root = %layout.root.display(),
        count = scenarios.len(),
        "discovered scenarios"
    );
    Ok((config, layout, scenarios))
}

/// Run every discovered scenario and print the summary
///
/// With no scenarios, nothing is created and the returned summary is empty
/// (and therefore unsuccessful).
pub fn run(args: &Args) -> Result<RunSummary> {
    let (config, layout, scenarios) = prepare(args)?;

    if scenarios.is_empty() {
        println!("No scenario files found.");
        return Ok(RunSummary::default());
    }

    println!("Running {} scenario(s)...", scenarios.len());
    layout.ensure_results_dir()?;

    let options = RunOptions {
        verbose: args.verbose,
        render: config.render,
    };
    let results = scenarios
        .iter()
        .map(|path| testing::run_scenario(path, &layout, &options))
        .collect();
    let summary = RunSummary { results };

    testing::report::summary(&summary.results);
    tracing::info!(
        passed = summary.passed(),
        total = summary.total(),
        "run complete"
    );
    Ok(summary)
}

/// Print the scenarios that would run; false when there are none
pub fn list(args: &Args) -> Result<bool> {
    let (_, _, scenarios) = prepare(args)?;
    if scenarios.is_empty() {
        println!("No scenario files found.");
        return Ok(false);
    }
    for path in &scenarios {
        println!("{}", path.display());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            name: "s".to_string(),
            passed,
            checks: Vec::new(),
        }
    }

    #[test]
    fn test_empty_summary_is_not_success() {
        let summary = RunSummary::default();
        assert_eq!(summary.total(), 0);
        assert!(!summary.success());
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            results: vec![result(true), result(false), result(true)],
        };
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.total(), 3);
        assert!(!summary.success());

        let summary = RunSummary {
            results: vec![result(true)],
        };
        assert!(summary.success());
    }
}
