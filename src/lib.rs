//! scenario - loader, validator and merge engine for ETL pipeline scenarios

pub mod cli;
pub mod core;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{ScenarioEntry, StepSpec, ParallelGroup, Arguments, ScenarioResolver, ScenarioError};
pub use crate::core::config::ResolverConfig;
pub use crate::registry::{StepRegistry, Step, ExecutionPlan, PlanUnit};
