//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};
use crate::render::Variables;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct Scenario {
    /// Name of the scenario, used in the report
    pub name: String,
    /// Optional description of what the scenario verifies
    #[serde(default)]
    pub description: Option<String>,
    /// Template path relative to the fixtures root
    pub template: PathBuf,
    /// Output path relative to the results root
    pub expected_output: PathBuf,
    /// Values substituted into the template
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Variables,
    /// Assertions run against the rendered output, in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks: Vec<Check>,
}

impl Scenario {
    /// Load and parse a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::scenario_read(path, &e))?;
        Self::parse(&content).map_err(|e| Error::scenario_parse(path, e))
    }

    /// Parse a scenario from YAML text
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// A single assertion against the rendered output
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawCheck")]
pub enum Check {
    /// Output must contain the text
    ContainsText { value: String },
    /// Output must not contain the text
    NotContainsText { value: String },
    /// A path under the results root must exist
    FileExists { path: PathBuf },
    /// Unrecognised `type` tag
    Unknown { kind: String },
    /// Known `type` tag without its required field
    Malformed { kind: String, field: String },
}

impl Check {
    /// The `type` tag as written in the scenario
    pub fn kind(&self) -> &str {
        match self {
            Check::ContainsText { .. } => "contains_text",
            Check::NotContainsText { .. } => "not_contains_text",
            Check::FileExists { .. } => "file_exists",
            Check::Unknown { kind } | Check::Malformed { kind, .. } => kind,
        }
    }

    fn malformed(kind: String, field: &str) -> Self {
        Check::Malformed {
            kind,
            field: field.to_string(),
        }
    }
}

/// Wire form of a check, before its tag is validated
#[derive(Deserialize)]
struct RawCheck {
    #[serde(rename = "type")]
    kind: String,
    value: Option<String>,
    path: Option<PathBuf>,
}

impl From<RawCheck> for Check {
    fn from(raw: RawCheck) -> Self {
        match raw.kind.as_str() {
            "contains_text" => match raw.value {
                Some(value) => Check::ContainsText { value },
                None => Check::malformed(raw.kind, "value"),
            },
            "not_contains_text" => match raw.value {
                Some(value) => Check::NotContainsText { value },
                None => Check::malformed(raw.kind, "value"),
            },
            "file_exists" => match raw.path {
                Some(path) => Check::FileExists { path },
                None => Check::malformed(raw.kind, "path"),
            },
            _ => Check::Unknown { kind: raw.kind },
        }
    }
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
