//! Output checks
//!
//! Each check inspects a rendered file and returns a [`CheckResult`]. The
//! message is for the report only and is never parsed back.

use std::path::Path;

use crate::common::paths::Layout;

use super::config::Check;

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(message: String) -> Self {
        Self {
            passed: true,
            message,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            passed: false,
            message,
        }
    }
}

/// Evaluate a declared check against a scenario's rendered output
///
/// Text checks read `output_path`; `file_exists` paths are resolved under
/// the results root.
pub fn evaluate(check: &Check, output_path: &Path, layout: &Layout) -> CheckResult {
    let result = match check {
        Check::ContainsText { value } => contains_text(output_path, value),
        Check::NotContainsText { value } => not_contains_text(output_path, value),
        Check::FileExists { path } => file_exists(&layout.result_path(path)),
        Check::Unknown { kind } => CheckResult::fail(format!("Unknown check type: {}", kind)),
        Check::Malformed { kind, field } => CheckResult::fail(format!(
            "Check '{}' is missing required field '{}'",
            kind, field
        )),
    };
    tracing::trace!(kind = check.kind(), passed = result.passed, "evaluated check");
    result
}

/// Pass iff the file contains `text` (exact, case-sensitive)
pub fn contains_text(path: &Path, text: &str) -> CheckResult {
    let content = match read_output(path) {
        Ok(content) => content,
        Err(result) => return result,
    };
    if content.contains(text) {
        CheckResult::pass(format!("Contains: {:?}", text))
    } else {
        CheckResult::fail(format!("Expected to contain: {:?}", text))
    }
}

/// Pass iff the file does not contain `text`
pub fn not_contains_text(path: &Path, text: &str) -> CheckResult {
    let content = match read_output(path) {
        Ok(content) => content,
        Err(result) => return result,
    };
    if content.contains(text) {
        CheckResult::fail(format!("Expected NOT to contain: {:?}", text))
    } else {
        CheckResult::pass(format!("Does not contain: {:?}", text))
    }
}

/// Pass iff something exists at `path`
pub fn file_exists(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::pass(format!("File exists: {}", path.display()))
    } else {
        CheckResult::fail(format!("File not found: {}", path.display()))
    }
}

fn read_output(path: &Path) -> Result<String, CheckResult> {
    if !path.exists() {
        return Err(CheckResult::fail(format!("File not found: {}", path.display())));
    }
    std::fs::read_to_string(path)
        .map_err(|e| CheckResult::fail(format!("Failed to read {}: {}", path.display(), e)))
}
