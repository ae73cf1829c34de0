//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Directory layout, relative to the test root
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Template rendering settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Directory layout settings
#[derive(Debug, Deserialize)]
pub struct LayoutConfig {
    /// Template sources
    #[serde(default = "default_fixtures")]
    pub fixtures: PathBuf,

    /// Scenario definitions
    #[serde(default = "default_scenarios")]
    pub scenarios: PathBuf,

    /// Rendered outputs
    #[serde(default = "default_results")]
    pub results: PathBuf,

    /// File in the scenarios directory that documents the format and is never run
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Extension of scenario files picked up by discovery
    #[serde(default = "default_scenario_extension")]
    pub scenario_extension: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fixtures: default_fixtures(),
            scenarios: default_scenarios(),
            results: default_results(),
            schema_file: default_schema_file(),
            scenario_extension: default_scenario_extension(),
        }
    }
}

fn default_fixtures() -> PathBuf {
    PathBuf::from("fixtures").join("templates")
}
fn default_scenarios() -> PathBuf {
    PathBuf::from("scenarios")
}
fn default_results() -> PathBuf {
    PathBuf::from("results")
}
fn default_schema_file() -> String {
    "scenario_schema.yaml".to_string()
}
fn default_scenario_extension() -> String {
    "yaml".to_string()
}

/// Template rendering settings
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct RenderConfig {
    /// HTML-escape substituted values
    #[serde(default)]
    pub autoescape: bool,
}

impl Config {
    /// Load configuration for a test root
    ///
    /// An explicit path must exist. Otherwise `default_path` is read when
    /// present, and defaults are used when it is not.
    pub fn load(explicit: Option<&Path>, default_path: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(super::Error::Config(format!(
                        "Config file '{}' does not exist",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None if default_path.exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
