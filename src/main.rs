use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use mars_colony::{
    logging, scenario::ScenarioLoader, DecayRange, MonthlyStatistics, ReportFormat, Simulation,
    SimulationConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Mars colony population simulation")]
struct Cli {
    /// Path to the scenario YAML file (built-in defaults when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the number of months to simulate
    #[arg(long)]
    months: Option<u32>,

    /// Override the initial population size
    #[arg(long)]
    population: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Monthly hydration loss range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    water_usage: Option<Vec<f64>>,

    /// Monthly hunger loss range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    hunger_rate: Option<Vec<f64>>,

    /// Report format for the monthly lines on stdout
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Write the monthly history to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut SimulationConfig) {
        if let Some(months) = self.months {
            config.months = months;
        }
        if let Some(population) = self.population {
            config.initial_population = population;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(range) = self.water_usage.as_deref().and_then(as_range) {
            config.water_usage_range = range;
        }
        if let Some(range) = self.hunger_rate.as_deref().and_then(as_range) {
            config.hunger_rate_range = range;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if self.csv.is_some() {
            config.report.csv = self.csv.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

fn as_range(bounds: &[f64]) -> Option<DecayRange> {
    match bounds {
        [min, max] => Some(DecayRange::new(*min, *max)),
        _ => None,
    }
}

fn report(stats: &MonthlyStatistics, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => println!("{stats}"),
        ReportFormat::Json => println!("{}", serde_json::to_string(stats)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => SimulationConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config
        .validate()
        .context("invalid simulation parameters")?;

    logging::init(config.logging.level_filter()?)?;

    let months = config.months;
    let format = config.report.format;
    let csv_path = config.report.csv.clone();
    let mut simulation = Simulation::new(config)?;

    for _ in 0..months {
        let stats = simulation.step();
        report(&stats, format)?;
    }

    if let Some(path) = csv_path {
        simulation
            .export_csv(&path)
            .with_context(|| format!("Failed to export history to {}", path.display()))?;
    }

    let census = simulation.population().census();
    info!(
        "Scenario '{}' completed for {} months. Survivors: {} of {}",
        simulation.config().name,
        months,
        census.alive(),
        census.total()
    );
    Ok(())
}
