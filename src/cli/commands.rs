//! CLI command definitions

use clap::Args;
use crate::core::config::ResolverConfig;

/// Where to find the scenarios; overrides the config file
#[derive(Debug, Args, Clone, Default)]
pub struct ScenarioArgs {
    /// Path to the project scenario file
    #[arg(short, long)]
    pub project_file: Option<String>,

    /// Path to the common scenario file (skipped if it does not exist)
    #[arg(long)]
    pub common_file: Option<String>,

    /// Root directory of the project/common layout
    #[arg(long)]
    pub root: Option<String>,

    /// Project name within the layout
    #[arg(long)]
    pub project: Option<String>,
}

impl ScenarioArgs {
    /// Apply command-line overrides on top of a base configuration
    pub fn apply(&self, mut config: ResolverConfig) -> ResolverConfig {
        if let Some(path) = &self.project_file {
            config.project_file = Some(path.into());
        }
        if let Some(path) = &self.common_file {
            config.common_file = Some(path.into());
        }
        if let Some(root) = &self.root {
            config.root_dir = Some(root.into());
        }
        if let Some(project) = &self.project {
            config.project = Some(project.clone());
        }
        config
    }
}

/// Print the merged scenario
#[derive(Debug, Args, Clone)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Validate a scenario
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Output format for resolved scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}
