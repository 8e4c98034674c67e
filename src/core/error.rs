//! Error types for scenario resolution

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two scenario documents an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The project-specific, authoritative scenario
    Project,
    /// The shared scenario providing default arguments
    Common,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Project => write!(f, "project scenario"),
            DocumentKind::Common => write!(f, "common scenario"),
        }
    }
}

/// Position of a step entry within a scenario sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    /// Index into the top-level sequence
    TopLevel(usize),
    /// Child of a parallel group at `parent`
    Parallel { parent: usize, child: usize },
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepPosition::TopLevel(index) => write!(f, "step #{}", index),
            StepPosition::Parallel { parent, child } => {
                write!(f, "step #{} parallel #{}", parent, child)
            }
        }
    }
}

/// Shape violations found while validating a scenario document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("document root must be a mapping")]
    RootNotMapping,

    #[error("document root has no '{0}' key")]
    MissingRootKey(String),

    #[error("'{0}' must be a sequence of steps")]
    NotSequence(String),

    #[error("entry #{index} must be a mapping")]
    ElementNotMapping { index: usize },

    #[error("entry #{parent} parallel #{child} must be a mapping")]
    ChildNotMapping { parent: usize, child: usize },

    #[error("{position}: '{field}' must be {expected}")]
    InvalidField {
        position: StepPosition,
        field: String,
        expected: &'static str,
    },
}

/// Errors raised while resolving a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("cannot read scenario file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scenario file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {document}: {violation}")]
    Schema {
        document: DocumentKind,
        violation: SchemaViolation,
    },

    #[error("{document}: {position} is missing required key '{key}'")]
    MissingKey {
        document: DocumentKind,
        position: StepPosition,
        key: String,
    },
}

impl ScenarioError {
    pub(crate) fn schema(document: DocumentKind, violation: SchemaViolation) -> Self {
        ScenarioError::Schema { document, violation }
    }
}
