//! Scenario runner
//!
//! Loads one scenario, renders its template into the results root and runs
//! its checks. Failures never escape a scenario: they become a failing
//! [`ScenarioResult`] and the batch carries on.

use std::path::Path;

use crate::common::config::RenderConfig;
use crate::common::paths::Layout;
use crate::common::{Error, Result};
use crate::render::{self, TemplateKind};

use super::checks::{self, CheckResult};
use super::config::Scenario;
use super::report;

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub checks: Vec<CheckResult>,
}

impl ScenarioResult {
    /// A scenario that failed before any check ran
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            checks: Vec::new(),
        }
    }

    /// Aggregate check results; no checks means the scenario passed
    pub fn from_checks(name: impl Into<String>, checks: Vec<CheckResult>) -> Self {
        Self {
            name: name.into(),
            passed: checks.iter().all(|c| c.passed),
            checks,
        }
    }
}

/// Options shared by every scenario in a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub verbose: bool,
    pub render: RenderConfig,
}

/// Run a scenario from a YAML file
pub fn run_scenario(path: &Path, layout: &Layout, options: &RunOptions) -> ScenarioResult {
    let scenario = match Scenario::load(path) {
        Ok(scenario) => scenario,
        Err(e) => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::warn!(scenario = %path.display(), error = %e, "could not load scenario");
            report::scenario_header(&name, None);
            report::scenario_error(&e);
            return ScenarioResult::failed(name);
        }
    };

    report::scenario_header(&scenario.name, scenario.description.as_deref());
    if options.verbose {
        println!("  Scenario file: {}", path.display());
        let names: Vec<&str> = scenario.variables.keys().map(String::as_str).collect();
        println!("  Variables: [{}]", names.join(", "));
    }

    match execute(&scenario, layout, options) {
        Ok(results) => {
            let result = ScenarioResult::from_checks(scenario.name, results);
            report::verdict(result.passed);
            result
        }
        Err(e) => {
            tracing::warn!(scenario = %scenario.name, error = %e, "scenario failed before checks");
            report::scenario_error(&e);
            ScenarioResult::failed(scenario.name)
        }
    }
}

/// Render the scenario's template and evaluate its checks in order
fn execute(scenario: &Scenario, layout: &Layout, options: &RunOptions) -> Result<Vec<CheckResult>> {
    let template_path = layout.template_path(&scenario.template);
    if !template_path.exists() {
        return Err(Error::TemplateNotFound(template_path));
    }

    let output_path = layout.result_path(&scenario.expected_output);
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_write(parent, &e))?;
    }

    tracing::debug!(
        template = %template_path.display(),
        output = %output_path.display(),
        "rendering scenario"
    );

    match TemplateKind::from_path(&template_path) {
        Some(TemplateKind::Html) => render::render_html_template(
            &template_path,
            &scenario.variables,
            &output_path,
            options.render,
        )?,
        None => return Err(Error::unsupported_template(&template_path)),
    }

    report::rendered(&layout.display_relative(&output_path));

    let results = scenario
        .checks
        .iter()
        .map(|check| {
            let result = checks::evaluate(check, &output_path, layout);
            report::check(&result);
            result
        })
        .collect();
    Ok(results)
}
