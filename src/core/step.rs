//! Scenario step domain model

use crate::core::error::{SchemaViolation, StepPosition};
use serde::Serialize;
use serde_yaml::{Mapping, Sequence, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Root key holding the step sequence
pub const ROOT_KEY: &str = "scenario";
/// Step identifier, used downstream for cross-step addressing
pub const STEP_KEY: &str = "step";
/// Class name, matched when merging
pub const CLASS_KEY: &str = "class";
pub const MODULE_KEY: &str = "module";
pub const ARGUMENTS_KEY: &str = "arguments";
pub const PARALLEL_KEY: &str = "parallel";

/// Step arguments, keyed by argument name
pub type Arguments = BTreeMap<String, Value>;

/// A single element of the scenario sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScenarioEntry {
    /// A plain step
    Step(StepSpec),
    /// A group of steps meant to run concurrently
    Parallel(ParallelGroup),
}

/// A step description: class, identifier and arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSpec {
    /// Unique step identifier
    #[serde(rename = "step")]
    pub identifier: String,

    /// Name of the step class to instantiate
    #[serde(rename = "class")]
    pub class_name: String,

    /// Optional module hint for the step class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Arguments applied to the step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,

    /// Any other keys, carried through untouched
    #[serde(flatten)]
    pub extra: Mapping,
}

/// An ordered group of steps for concurrent execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelGroup {
    /// Optional identifier of the group itself
    #[serde(rename = "step", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Child steps, in document order
    #[serde(rename = "parallel")]
    pub steps: Vec<StepSpec>,

    /// Any other keys, carried through untouched
    #[serde(flatten)]
    pub extra: Mapping,
}

impl StepSpec {
    /// Create a step with no module and no arguments
    pub fn new(identifier: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            class_name: class_name.into(),
            module: None,
            arguments: None,
            extra: Mapping::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// Decode a step from a validated step mapping
    pub fn decode(entry: &Mapping, position: StepPosition) -> Result<Self, SchemaViolation> {
        let identifier = required_string(entry, STEP_KEY, position)?;
        let class_name = required_string(entry, CLASS_KEY, position)?;
        let module = optional_string(entry, MODULE_KEY, position)?;
        let arguments = decode_arguments(entry, position)?;
        let extra = remaining(entry, &[STEP_KEY, CLASS_KEY, MODULE_KEY, ARGUMENTS_KEY], position)?;

        if matches!(position, StepPosition::Parallel { .. }) && extra.contains_key(PARALLEL_KEY) {
            warn!(
                "{} ('{}') nests a parallel group; it is passed through without validation or merging",
                position, identifier
            );
        }

        Ok(Self {
            identifier,
            class_name,
            module,
            arguments,
            extra,
        })
    }

    /// Whether the step carries a non-empty argument mapping
    pub fn has_arguments(&self) -> bool {
        self.arguments.as_ref().is_some_and(|args| !args.is_empty())
    }
}

impl ParallelGroup {
    pub fn new(steps: Vec<StepSpec>) -> Self {
        Self {
            identifier: None,
            steps,
            extra: Mapping::new(),
        }
    }
}

impl ScenarioEntry {
    /// Decode a top-level entry at `index`
    ///
    /// An entry with a non-null `parallel` key is a group; its other keys,
    /// besides `step`, are kept verbatim.
    pub fn decode(entry: &Mapping, index: usize) -> Result<Self, SchemaViolation> {
        let Some(children) = parallel_children(entry, index)? else {
            return StepSpec::decode(entry, StepPosition::TopLevel(index)).map(ScenarioEntry::Step);
        };

        let steps = children
            .iter()
            .enumerate()
            .map(|(child, value)| {
                let mapping = value
                    .as_mapping()
                    .ok_or(SchemaViolation::ChildNotMapping { parent: index, child })?;
                StepSpec::decode(mapping, StepPosition::Parallel { parent: index, child })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScenarioEntry::Parallel(ParallelGroup {
            identifier: optional_string(entry, STEP_KEY, StepPosition::TopLevel(index))?,
            steps,
            extra: remaining(entry, &[STEP_KEY, PARALLEL_KEY], StepPosition::TopLevel(index))?,
        }))
    }

    /// Decode every entry of a validated scenario sequence
    pub fn decode_all(entries: &[Value]) -> Result<Vec<Self>, SchemaViolation> {
        entries
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mapping = value
                    .as_mapping()
                    .ok_or(SchemaViolation::ElementNotMapping { index })?;
                Self::decode(mapping, index)
            })
            .collect()
    }

    /// Iterate over every step, descending into parallel groups
    pub fn steps(&self) -> Box<dyn Iterator<Item = &StepSpec> + '_> {
        match self {
            ScenarioEntry::Step(step) => Box::new(std::iter::once(step)),
            ScenarioEntry::Parallel(group) => Box::new(group.steps.iter()),
        }
    }

    pub fn as_step(&self) -> Option<&StepSpec> {
        match self {
            ScenarioEntry::Step(step) => Some(step),
            ScenarioEntry::Parallel(_) => None,
        }
    }

    pub fn as_parallel(&self) -> Option<&ParallelGroup> {
        match self {
            ScenarioEntry::Parallel(group) => Some(group),
            ScenarioEntry::Step(_) => None,
        }
    }
}

/// Children of the `parallel` group of a top-level entry
///
/// Returns `None` when the key is absent or null.
pub(crate) fn parallel_children(
    entry: &Mapping,
    index: usize,
) -> Result<Option<&Sequence>, SchemaViolation> {
    match entry.get(PARALLEL_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(children)) => Ok(Some(children)),
        Some(_) => Err(SchemaViolation::InvalidField {
            position: StepPosition::TopLevel(index),
            field: PARALLEL_KEY.to_string(),
            expected: "a sequence of steps",
        }),
    }
}

fn invalid(position: StepPosition, field: &str, expected: &'static str) -> SchemaViolation {
    SchemaViolation::InvalidField {
        position,
        field: field.to_string(),
        expected,
    }
}

fn required_string(entry: &Mapping, key: &str, position: StepPosition) -> Result<String, SchemaViolation> {
    optional_string(entry, key, position)?.ok_or_else(|| invalid(position, key, "a string"))
}

fn optional_string(
    entry: &Mapping,
    key: &str,
    position: StepPosition,
) -> Result<Option<String>, SchemaViolation> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(position, key, "a string")),
    }
}

fn decode_arguments(entry: &Mapping, position: StepPosition) -> Result<Option<Arguments>, SchemaViolation> {
    let map = match entry.get(ARGUMENTS_KEY) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Mapping(map)) => map,
        Some(_) => return Err(invalid(position, ARGUMENTS_KEY, "a mapping")),
    };

    map.iter()
        .map(|(key, value)| match key {
            Value::String(name) => Ok((name.clone(), value.clone())),
            _ => Err(invalid(position, ARGUMENTS_KEY, "a mapping with string keys")),
        })
        .collect::<Result<Arguments, _>>()
        .map(Some)
}

/// Keys other than `known`, kept verbatim
///
/// Pass-through keys must be strings so the step can be written back out as
/// JSON as well as YAML.
fn remaining(entry: &Mapping, known: &[&str], position: StepPosition) -> Result<Mapping, SchemaViolation> {
    entry
        .iter()
        .filter_map(|(key, value)| match key.as_str() {
            Some(name) if known.contains(&name) => None,
            Some(_) => Some(Ok((key.clone(), value.clone()))),
            None => Some(Err(invalid(position, "keys", "strings"))),
        })
        .collect()
}
