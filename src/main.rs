use anyhow::{Context, Result};
use scenario::cli::commands::{ResolveCommand, ScenarioArgs, ValidateCommand};
use scenario::cli::output::*;
use scenario::cli::{Cli, Command};
use scenario::core::config::ResolverConfig;
use scenario::core::{ScenarioEntry, ScenarioResolver};
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for scenario output
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let base = match &cli.config {
        Some(path) => ResolverConfig::from_file(path).context("Failed to load resolver config")?,
        None => ResolverConfig::new(),
    };

    match &cli.command {
        Command::Resolve(cmd) => resolve_scenario(cmd, base)?,
        Command::Validate(cmd) => validate_scenario(cmd, base)?,
    }

    Ok(())
}

fn parse_scenario(args: &ScenarioArgs, base: ResolverConfig) -> Result<Vec<ScenarioEntry>> {
    let config = args.apply(base);
    let resolver = ScenarioResolver::from_config(&config).context("Invalid scenario location")?;
    let steps = resolver
        .parse()
        .with_context(|| format!("Failed to resolve scenario {}", resolver.project_path().display()))?;
    Ok(steps)
}

fn resolve_scenario(cmd: &ResolveCommand, base: ResolverConfig) -> Result<()> {
    let steps = parse_scenario(&cmd.scenario, base)?;
    print!("{}", render_scenario(&steps, cmd.format)?);
    Ok(())
}

fn validate_scenario(cmd: &ValidateCommand, base: ResolverConfig) -> Result<()> {
    println!("{} Validating scenario...", INFO);

    match parse_scenario(&cmd.scenario, base) {
        Ok(steps) => {
            let summary = ScenarioSummary::of(&steps);
            println!("{} Scenario is valid!", CHECK);
            println!("  Entries: {}", style(summary.entries).cyan());
            println!("  Steps: {}", style(summary.steps).cyan());
            println!("  Parallel groups: {}", style(summary.parallel_groups).cyan());

            for (index, entry) in steps.iter().enumerate() {
                println!("{}", format_entry(index, entry));
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&summary)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
