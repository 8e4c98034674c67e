//! Ordered execution plan built from a resolved scenario

use crate::registry::ConfiguredStep;

/// One unit of work in an execution plan
#[derive(Debug)]
pub enum PlanUnit {
    /// Run on its own, after the previous unit
    Single(ConfiguredStep),

    /// Dispatch together; order matches the scenario for deterministic fan-in
    Parallel(Vec<ConfiguredStep>),
}

impl PlanUnit {
    pub fn steps(&self) -> &[ConfiguredStep] {
        match self {
            PlanUnit::Single(step) => std::slice::from_ref(step),
            PlanUnit::Parallel(steps) => steps,
        }
    }
}

/// Steps ready to hand to an execution engine, in scenario order
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    units: Vec<PlanUnit>,
}

impl ExecutionPlan {
    pub fn new(units: Vec<PlanUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[PlanUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<PlanUnit> {
        self.units
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of steps across all units
    pub fn step_count(&self) -> usize {
        self.units.iter().map(|unit| unit.steps().len()).sum()
    }

    /// Step identifiers in dispatch order
    pub fn identifiers(&self) -> Vec<&str> {
        self.units
            .iter()
            .flat_map(|unit| unit.steps())
            .map(|step| step.identifier.as_str())
            .collect()
    }
}
