//! Step registry - maps class names to step constructors
//!
//! The execution side of a scenario needs to turn every `class` name into a
//! concrete step. Rather than looking classes up by name at runtime, every
//! step kind is registered up front, so the set of valid classes is closed
//! and known before any scenario is planned.

pub mod plan;

use crate::core::{ScenarioEntry, StepSpec};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub use plan::{ExecutionPlan, PlanUnit};

/// A step implementation that can be configured from scenario arguments
pub trait Step: Send {
    /// Apply one scenario argument
    fn set_argument(&mut self, name: &str, value: &Value) -> Result<(), ArgumentError>;
}

/// Constructor for a registered step class
pub type StepFactory = fn() -> Box<dyn Step>;

/// Errors raised by a step while applying an argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("unknown argument")]
    Unknown,

    #[error("expected {0}")]
    InvalidType(&'static str),

    #[error("{0}")]
    Invalid(String),
}

impl ArgumentError {
    /// Read a string argument value
    pub fn expect_str(value: &Value) -> Result<&str, ArgumentError> {
        value.as_str().ok_or(ArgumentError::InvalidType("a string"))
    }

    /// Read an integer argument value
    pub fn expect_i64(value: &Value) -> Result<i64, ArgumentError> {
        value.as_i64().ok_or(ArgumentError::InvalidType("an integer"))
    }

    /// Read a boolean argument value
    pub fn expect_bool(value: &Value) -> Result<bool, ArgumentError> {
        value.as_bool().ok_or(ArgumentError::InvalidType("a boolean"))
    }
}

/// Errors raised while instantiating steps
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("step '{identifier}': unknown class '{class_name}'")]
    UnknownClass {
        identifier: String,
        class_name: String,
    },

    #[error("step '{identifier}': argument '{argument}': {source}")]
    Argument {
        identifier: String,
        argument: String,
        #[source]
        source: ArgumentError,
    },

    #[error("class '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// A step built from a scenario entry, with its arguments applied
pub struct ConfiguredStep {
    pub identifier: String,
    pub class_name: String,
    pub step: Box<dyn Step>,
}

impl fmt::Debug for ConfiguredStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredStep")
            .field("identifier", &self.identifier)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Registry of step classes available to scenarios
#[derive(Debug, Default, Clone)]
pub struct StepRegistry {
    factories: HashMap<String, StepFactory>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a step class
    ///
    /// Registering the same class twice is an error.
    pub fn register(&mut self, class_name: &str, factory: StepFactory) -> Result<(), RegistryError> {
        if self.factories.contains_key(class_name) {
            return Err(RegistryError::AlreadyRegistered(class_name.to_string()));
        }
        self.factories.insert(class_name.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// Registered class names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a step and apply its arguments
    pub fn instantiate(&self, spec: &StepSpec) -> Result<ConfiguredStep, RegistryError> {
        let factory = self
            .factories
            .get(&spec.class_name)
            .ok_or_else(|| RegistryError::UnknownClass {
                identifier: spec.identifier.clone(),
                class_name: spec.class_name.clone(),
            })?;

        let mut step = factory();
        for (name, value) in spec.arguments.iter().flatten() {
            step.set_argument(name, value)
                .map_err(|source| RegistryError::Argument {
                    identifier: spec.identifier.clone(),
                    argument: name.clone(),
                    source,
                })?;
        }

        debug!("Instantiated step '{}' ({})", spec.identifier, spec.class_name);
        Ok(ConfiguredStep {
            identifier: spec.identifier.clone(),
            class_name: spec.class_name.clone(),
            step,
        })
    }

    /// Instantiate every entry of a resolved scenario, in order
    pub fn build_plan(&self, entries: &[ScenarioEntry]) -> Result<ExecutionPlan, RegistryError> {
        let units = entries
            .iter()
            .map(|entry| match entry {
                ScenarioEntry::Step(spec) => self.instantiate(spec).map(PlanUnit::Single),
                ScenarioEntry::Parallel(group) => group
                    .steps
                    .iter()
                    .map(|spec| self.instantiate(spec))
                    .collect::<Result<Vec<_>, _>>()
                    .map(PlanUnit::Parallel),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExecutionPlan::new(units))
    }
}
