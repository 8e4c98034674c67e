//! CLI output formatting

use crate::cli::commands::OutputFormat;
use crate::core::{ScenarioEntry, StepSpec};
use console::Emoji;
use serde::Serialize;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Counts describing a resolved scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioSummary {
    pub entries: usize,
    pub steps: usize,
    pub parallel_groups: usize,
}

impl ScenarioSummary {
    pub fn of(entries: &[ScenarioEntry]) -> Self {
        Self {
            entries: entries.len(),
            steps: entries.iter().map(|e| e.steps().count()).sum(),
            parallel_groups: entries.iter().filter(|e| e.as_parallel().is_some()).count(),
        }
    }
}

/// Serialize the resolved scenario under its `scenario` root key
pub fn render_scenario(entries: &[ScenarioEntry], format: OutputFormat) -> anyhow::Result<String> {
    #[derive(Serialize)]
    struct Document<'a> {
        scenario: &'a [ScenarioEntry],
    }

    let document = Document { scenario: entries };
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(&document)?,
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
    })
}

/// Format a single step for display
pub fn format_step(step: &StepSpec) -> String {
    let arg_count = step.arguments.as_ref().map_or(0, |a| a.len());
    format!(
        "{} {} {}",
        style(&step.identifier).bold(),
        style(format!("({})", step.class_name)).cyan(),
        style(format!("{} args", arg_count)).dim()
    )
}

/// Format a top-level entry for display
pub fn format_entry(index: usize, entry: &ScenarioEntry) -> String {
    match entry {
        ScenarioEntry::Step(step) => format!("  #{} {}", index, format_step(step)),
        ScenarioEntry::Parallel(group) => {
            let mut lines = vec![format!(
                "  #{} {} ({} steps)",
                index,
                style("parallel").yellow(),
                group.steps.len()
            )];
            lines.extend(group.steps.iter().map(|step| format!("      {}", format_step(step))));
            lines.join("\n")
        }
    }
}
