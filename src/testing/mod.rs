//! Scenario testing
//!
//! Reads YAML scenarios, renders each one's template into the results root
//! and checks the rendered output for expected text.

pub mod checks;
mod config;
pub(crate) mod report;
mod runner;

pub use checks::CheckResult;
pub use config::*;
pub use runner::{run_scenario, RunOptions, ScenarioResult};
