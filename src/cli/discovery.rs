//! Scenario discovery

use std::path::PathBuf;

use crate::common::paths::Layout;

/// Find the scenario files to run
///
/// Explicit patterns are glob-expanded; without any, the scenarios
/// directory is scanned.
pub fn discover(patterns: &[String], layout: &Layout) -> Vec<PathBuf> {
    if patterns.is_empty() {
        discover_all(layout)
    } else {
        expand_patterns(patterns)
    }
}

/// Expand each pattern against the filesystem
///
/// A pattern that matches nothing (or is not a valid glob) is kept as a
/// literal path.
pub fn expand_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let mut matched: Vec<PathBuf> = match glob::glob(pattern) {
            Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "invalid glob pattern, using it literally");
                Vec::new()
            }
        };

        if matched.is_empty() {
            tracing::debug!(pattern = %pattern, "pattern matched nothing");
            paths.push(PathBuf::from(pattern));
        } else {
            matched.sort();
            paths.append(&mut matched);
        }
    }
    paths
}

/// Every scenario file in the scenarios directory, sorted by name
///
/// The reserved schema file is skipped.
pub fn discover_all(layout: &Layout) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(&layout.scenarios_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(
                dir = %layout.scenarios_dir.display(),
                error = %e,
                "cannot read scenarios directory"
            );
            return Vec::new();
        }
    };

    let extension = layout.scenario_extension.as_str();
    let schema = layout.schema_file.as_str();
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .filter(|path| path.file_name().is_some_and(|name| name != schema))
        .collect();
    paths.sort();
    paths
}
