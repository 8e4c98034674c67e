//! Scenario document loading

use crate::core::error::ScenarioError;
use serde_yaml::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load a scenario file into a generic YAML tree
pub fn load<P: AsRef<Path>>(path: P) -> Result<Value, ScenarioError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    parse(path, &content)
}

/// Load an optional scenario file
///
/// A file that does not exist yields `Ok(None)`. Any other read failure
/// is still reported as an error.
pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Value>, ScenarioError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => parse(path, &content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Optional scenario {} not found, skipping", path.display());
            Ok(None)
        }
        Err(source) => Err(ScenarioError::FileAccess {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse(path: &Path, content: &str) -> Result<Value, ScenarioError> {
    serde_yaml::from_str(content).map_err(|source| ScenarioError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
