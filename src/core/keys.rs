//! Essential-key checks for scenario step entries

use crate::core::error::{DocumentKind, ScenarioError, SchemaViolation, StepPosition};
use crate::core::step::{parallel_children, CLASS_KEY, STEP_KEY};
use serde_yaml::{Mapping, Value};

/// Keys every step entry must carry, in the order they are checked
const ESSENTIAL_KEYS: [&str; 2] = [STEP_KEY, CLASS_KEY];

/// Check that every step entry carries its identifying keys
///
/// Top-level entries without a `parallel` group and every child of a
/// `parallel` group need both `step` and `class`. A group entry itself
/// needs neither. Children are not searched for further groups.
pub fn validate_essential_keys(steps: &[Value], document: DocumentKind) -> Result<(), ScenarioError> {
    for (index, entry) in steps.iter().enumerate() {
        let entry = entry.as_mapping().ok_or_else(|| {
            ScenarioError::schema(document, SchemaViolation::ElementNotMapping { index })
        })?;

        match parallel_children(entry, index).map_err(|v| ScenarioError::schema(document, v))? {
            Some(children) => {
                for (child_index, child) in children.iter().enumerate() {
                    let child = child.as_mapping().ok_or_else(|| {
                        ScenarioError::schema(
                            document,
                            SchemaViolation::ChildNotMapping {
                                parent: index,
                                child: child_index,
                            },
                        )
                    })?;
                    require_keys(
                        child,
                        StepPosition::Parallel {
                            parent: index,
                            child: child_index,
                        },
                        document,
                    )?;
                }
            }
            None => require_keys(entry, StepPosition::TopLevel(index), document)?,
        }
    }

    Ok(())
}

fn require_keys(
    entry: &Mapping,
    position: StepPosition,
    document: DocumentKind,
) -> Result<(), ScenarioError> {
    // A key written with no value (`class: ~`) counts as missing.
    let is_missing = |key: &str| matches!(entry.get(key), None | Some(Value::Null));

    match ESSENTIAL_KEYS.iter().find(|key| is_missing(key)) {
        Some(key) => Err(ScenarioError::MissingKey {
            document,
            position,
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}
