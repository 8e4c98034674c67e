//! Scenario resolution: load, validate and merge project and common scenarios

use crate::core::{
    config::{ConfigError, ResolverConfig},
    document,
    error::{DocumentKind, ScenarioError},
    keys::validate_essential_keys,
    merge::merge,
    schema::validate_structure,
    step::ScenarioEntry,
};
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolves a project scenario, and an optional common scenario, into
/// one merged list of steps
#[derive(Debug, Clone)]
pub struct ScenarioResolver {
    project_path: PathBuf,
    common_path: Option<PathBuf>,
}

impl ScenarioResolver {
    /// Create a resolver for the given scenario files
    ///
    /// The project file must exist. The common file is optional and is
    /// skipped when it does not exist.
    pub fn new(project_path: impl Into<PathBuf>, common_path: Option<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            common_path,
        }
    }

    /// Create a resolver from configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.project_path()?, config.common_path()))
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn common_path(&self) -> Option<&Path> {
        self.common_path.as_deref()
    }

    /// Load, validate and merge the scenarios
    ///
    /// Any failure aborts the whole run; no partial scenario is returned.
    pub fn parse(&self) -> Result<Vec<ScenarioEntry>, ScenarioError> {
        info!("Parsing scenario {}", self.project_path.display());

        let project = document::load(&self.project_path)?;
        let project = validate_project(&project)?;

        let common = match &self.common_path {
            Some(path) => document::load_optional(path)?,
            None => None,
        };
        let steps = merge_common(project, common.as_ref())?;

        info!("Finished parsing scenario: {} entries", steps.len());
        Ok(steps)
    }
}

/// Validate and merge already loaded scenario documents
pub fn resolve(project: &Value, common: Option<&Value>) -> Result<Vec<ScenarioEntry>, ScenarioError> {
    let project = validate_project(project)?;
    merge_common(project, common)
}

fn validate_project(tree: &Value) -> Result<Vec<ScenarioEntry>, ScenarioError> {
    let project = validate_document(tree, DocumentKind::Project)?;
    warn_duplicate_identifiers(&project);
    Ok(project)
}

/// Validate the common document, if any, and merge it into validated project entries
fn merge_common(project: Vec<ScenarioEntry>, common: Option<&Value>) -> Result<Vec<ScenarioEntry>, ScenarioError> {
    match common {
        Some(common) => {
            let common = validate_document(common, DocumentKind::Common)?;
            debug!("Merging {} project entries with {} common entries", project.len(), common.len());
            Ok(merge(project, &common))
        }
        None => {
            debug!("No common scenario, using project entries as written");
            Ok(project)
        }
    }
}

/// Run the structure and essential-key checks, then decode the entries
pub fn validate_document(tree: &Value, document: DocumentKind) -> Result<Vec<ScenarioEntry>, ScenarioError> {
    let entries = validate_structure(tree, document)?;
    validate_essential_keys(entries, document)?;
    let decoded = ScenarioEntry::decode_all(entries).map_err(|v| ScenarioError::schema(document, v))?;

    debug!("Validated {}: {} entries", document, decoded.len());
    Ok(decoded)
}

fn warn_duplicate_identifiers(entries: &[ScenarioEntry]) {
    let mut seen = HashSet::new();
    for step in entries.iter().flat_map(ScenarioEntry::steps) {
        if !seen.insert(step.identifier.as_str()) {
            warn!("Step identifier '{}' is used more than once", step.identifier);
        }
    }
}
