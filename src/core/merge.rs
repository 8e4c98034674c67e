//! Merging of project scenario steps with common scenario defaults
//!
//! A project step picks up arguments from the first common step with the
//! same class name. Project values always win, and the merge is shallow:
//! nested mappings or sequences inside an argument are replaced as a whole.

use crate::core::step::{Arguments, ParallelGroup, ScenarioEntry, StepSpec};
use tracing::debug;

/// Merge project entries with the common scenario
///
/// Parallel group children are merged one by one against the flat common
/// list and keep their order. `common` is never modified.
pub fn merge(project: Vec<ScenarioEntry>, common: &[ScenarioEntry]) -> Vec<ScenarioEntry> {
    project
        .into_iter()
        .map(|entry| match entry {
            ScenarioEntry::Step(step) => ScenarioEntry::Step(merge_step(step, common)),
            ScenarioEntry::Parallel(group) => ScenarioEntry::Parallel(ParallelGroup {
                steps: group
                    .steps
                    .into_iter()
                    .map(|step| merge_step(step, common))
                    .collect(),
                ..group
            }),
        })
        .collect()
}

/// Merge a single project step against the common scenario
pub fn merge_step(mut step: StepSpec, common: &[ScenarioEntry]) -> StepSpec {
    let Some(matched) = find_common(&step.class_name, common) else {
        return step;
    };

    debug!(
        "Step '{}' ({}) merged with common step '{}'",
        step.identifier, step.class_name, matched.identifier
    );

    match (step.has_arguments(), matched.has_arguments()) {
        (true, true) => {
            if let (Some(project_args), Some(common_args)) = (step.arguments.take(), &matched.arguments) {
                step.arguments = Some(overlay_shallow(common_args, project_args));
            }
        }
        (false, true) => step.arguments = matched.arguments.clone(),
        // Project arguments, or their absence, stand as written.
        (_, false) => {}
    }

    step
}

/// Overlay `overrides` onto a copy of `base`, one key at a time
///
/// This is a shallow union: every key of `overrides` replaces the value
/// under the same key in `base` wholesale. Values are never merged
/// recursively, so a nested mapping in `overrides` drops the nested keys
/// `base` had under that argument.
pub fn overlay_shallow(base: &Arguments, overrides: Arguments) -> Arguments {
    let mut merged = base.clone();
    merged.extend(overrides);
    merged
}

/// First common step with the given class name
///
/// Later steps sharing the class are ignored. Parallel groups in the
/// common scenario are not searched.
fn find_common<'a>(class_name: &str, common: &'a [ScenarioEntry]) -> Option<&'a StepSpec> {
    let mut candidates = common
        .iter()
        .filter_map(ScenarioEntry::as_step)
        .filter(|c| c.class_name == class_name);

    let first = candidates.next()?;
    let ignored = candidates.count();
    if ignored > 0 {
        debug!(
            "Ignoring {} later common step(s) of class {} in favour of '{}'",
            ignored, class_name, first.identifier
        );
    }

    Some(first)
}
