//! Error types for the Codraft test harness
//!
//! Most variants are scenario-local: the runner turns them into a failing
//! scenario result and moves on. Only configuration and I/O errors raised
//! before the first scenario runs reach `main`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Failed to read scenario '{path}': {error}")]
    ScenarioRead { path: PathBuf, error: String },

    #[error("Failed to parse scenario '{path}': {message}")]
    ScenarioParse { path: PathBuf, message: String },

    // === Template Errors ===
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Unsupported template type: {suffix}")]
    UnsupportedTemplate { suffix: String },

    #[error("Failed to render '{template}': {message}")]
    Render { template: String, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write '{path}': {error}")]
    FileWrite { path: String, error: String },
}

impl Error {
    /// Create a scenario read error
    pub fn scenario_read(path: &Path, error: &io::Error) -> Self {
        Self::ScenarioRead {
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }

    /// Create a scenario parse error
    pub fn scenario_parse(path: &Path, message: impl ToString) -> Self {
        Self::ScenarioParse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Create a render error for the named template
    pub fn render(template: &str, message: impl ToString) -> Self {
        Self::Render {
            template: template.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported template error from the template's suffix
    pub fn unsupported_template(path: &Path) -> Self {
        let suffix = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self::UnsupportedTemplate { suffix }
    }

    /// Create a file read error
    pub fn file_read(path: &Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: &Path, error: &io::Error) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
