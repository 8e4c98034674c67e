//! Top-level structure validation for scenario documents

use crate::core::error::{DocumentKind, ScenarioError, SchemaViolation};
use crate::core::step::ROOT_KEY;
use serde_yaml::Value;

/// Validate the top-level shape of a scenario document
///
/// The root must be a mapping holding a `scenario` sequence whose
/// elements are all mappings. Returns the step entries on success.
pub fn validate_structure(tree: &Value, document: DocumentKind) -> Result<&[Value], ScenarioError> {
    let root = tree
        .as_mapping()
        .ok_or_else(|| ScenarioError::schema(document, SchemaViolation::RootNotMapping))?;

    let entries = root.get(ROOT_KEY).ok_or_else(|| {
        ScenarioError::schema(document, SchemaViolation::MissingRootKey(ROOT_KEY.to_string()))
    })?;

    let entries = entries.as_sequence().ok_or_else(|| {
        ScenarioError::schema(document, SchemaViolation::NotSequence(ROOT_KEY.to_string()))
    })?;

    if let Some(index) = entries.iter().position(|entry| !entry.is_mapping()) {
        return Err(ScenarioError::schema(
            document,
            SchemaViolation::ElementNotMapping { index },
        ));
    }

    Ok(entries)
}
