//! Codraft test harness - scenario-based checks for Codraft templates
//!
//! Each scenario names a template, the variables to render it with, where
//! to write the result and the text the result must (or must not) contain.

pub mod cli;
pub mod commands;
pub mod common;
pub mod render;
pub mod testing;

// Re-export commonly used types for tests
pub use cli::RunSummary;
pub use common::{Error, Result};
pub use testing::{Check, CheckResult, Scenario, ScenarioResult};
