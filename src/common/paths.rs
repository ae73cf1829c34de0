//! Test-root directory layout
//!
//! Every directory the harness touches is resolved against an explicit test
//! root:
//! - `fixtures/templates/` holds template sources
//! - `scenarios/` holds scenario definitions
//! - `results/` receives rendered output, created on demand

use std::path::{Path, PathBuf};

use super::config::LayoutConfig;

/// Name of the optional configuration file inside the test root
pub const CONFIG_FILE_NAME: &str = "harness.toml";

/// Resolved directories for one harness run
#[derive(Debug, Clone)]
pub struct Layout {
    /// Test root all other paths are relative to
    pub root: PathBuf,
    /// Directory containing template sources
    pub fixtures_dir: PathBuf,
    /// Directory scanned for scenario files when no patterns are given
    pub scenarios_dir: PathBuf,
    /// Directory receiving rendered outputs
    pub results_dir: PathBuf,
    /// Reserved file name excluded from scenario discovery
    pub schema_file: String,
    /// Extension (without dot) of discoverable scenario files
    pub scenario_extension: String,
}

impl Layout {
    /// Resolve a layout configuration against a test root
    pub fn new(root: impl Into<PathBuf>, config: &LayoutConfig) -> Self {
        let root = root.into();
        Self {
            fixtures_dir: root.join(&config.fixtures),
            scenarios_dir: root.join(&config.scenarios),
            results_dir: root.join(&config.results),
            schema_file: config.schema_file.clone(),
            scenario_extension: config.scenario_extension.clone(),
            root,
        }
    }

    /// Path of a template referenced by a scenario
    pub fn template_path(&self, template: &Path) -> PathBuf {
        self.fixtures_dir.join(template)
    }

    /// Path of a file under the results root
    pub fn result_path(&self, relative: &Path) -> PathBuf {
        self.results_dir.join(relative)
    }

    /// Display a path relative to the test root when it lies beneath it
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Ensure the results root exists
    pub fn ensure_results_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.results_dir)
    }
}
