//! Test utility functions for scenario resolution

#![allow(dead_code)]

use scenario::core::{Arguments, ScenarioEntry, ScenarioError, ScenarioResolver, StepSpec};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding scenario files
pub struct ScenarioDir {
    dir: TempDir,
}

impl ScenarioDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the directory, creating parents
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write scenario file");
        path
    }
}

/// Resolve a project scenario, and optionally a common one, from YAML text
pub fn resolve_yaml(project: &str, common: Option<&str>) -> Result<Vec<ScenarioEntry>, ScenarioError> {
    let dir = ScenarioDir::new();
    let project_path = dir.write("project/scenario.yml", project);
    let common_path = match common {
        Some(yaml) => dir.write("common/scenario.yml", yaml),
        None => dir.path().join("common/scenario.yml"),
    };

    ScenarioResolver::new(project_path, Some(common_path)).parse()
}

/// Parse an argument mapping from inline YAML
pub fn args(yaml: &str) -> Arguments {
    serde_yaml::from_str(yaml).expect("Invalid argument YAML")
}

/// The plain step at `index`, panicking on a parallel group
pub fn step_at(entries: &[ScenarioEntry], index: usize) -> &StepSpec {
    entries[index]
        .as_step()
        .unwrap_or_else(|| panic!("Entry {} should be a plain step", index))
}

/// Child `child` of the parallel group at `index`
pub fn parallel_child(entries: &[ScenarioEntry], index: usize, child: usize) -> &StepSpec {
    let group = entries[index]
        .as_parallel()
        .unwrap_or_else(|| panic!("Entry {} should be a parallel group", index));
    &group.steps[child]
}

/// Identifiers of every step, in order
pub fn identifiers(entries: &[ScenarioEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.steps())
        .map(|step| step.identifier.clone())
        .collect()
}
