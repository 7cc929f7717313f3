use std::path::Path;

use log::{debug, info};

use crate::config::{ConfigError, ParameterForm, SimulationConfig};
use crate::export::{export_csv, ExportError, HistoryRow};
use crate::population::{MonthlyStatistics, Population};
use crate::rng::{ColonyRng, UniformSource};

/// Drives a [`Population`] month by month and records what happened.
///
/// This is the surface front ends talk to: advance, run, reset, reconfigure
/// and export. Population internals are only reachable read-only.
pub struct Simulation<R = ColonyRng> {
    config: SimulationConfig,
    population: Population,
    rng: R,
    history: Vec<HistoryRow>,
}

impl Simulation<ColonyRng> {
    /// Builds a simulation seeded from `config.seed`, or from OS entropy.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let rng = ColonyRng::from_seed_option(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: UniformSource> Simulation<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let population = build_population(&config);
        info!(
            "simulation '{}' starting with {} colonists",
            config.name,
            population.len()
        );
        Ok(Self {
            config,
            population,
            rng,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn month(&self) -> u32 {
        self.population.month()
    }

    pub fn statistics(&self) -> MonthlyStatistics {
        self.population.statistics()
    }

    /// One row per month advanced since construction or the last reset.
    pub fn history(&self) -> &[HistoryRow] {
        &self.history
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Advances one month and returns the resulting statistics.
    pub fn step(&mut self) -> MonthlyStatistics {
        self.run_with_hook(1, |_| {});
        self.population.statistics()
    }

    pub fn run(&mut self, months: u32) {
        self.run_with_hook(months, |_| {});
    }

    pub fn run_with_hook<F>(&mut self, months: u32, mut hook: F)
    where
        F: FnMut(&MonthlyStatistics),
    {
        let history = &mut self.history;
        self.population.run(months, &mut self.rng, |stats| {
            history.push(HistoryRow::from(stats));
            debug!("{stats}");
            hook(stats);
        });
    }

    /// Replaces the population with a fresh cohort and clears the history.
    pub fn reset(&mut self) {
        self.replace_population(build_population(&self.config));
    }

    fn replace_population(&mut self, population: Population) {
        self.population = population;
        self.history.clear();
        info!(
            "simulation '{}' reset to {} colonists",
            self.config.name,
            self.population.len()
        );
    }

    /// Validates `config` and, only if it is valid, adopts it and resets.
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let population = build_population(&config);
        self.config = config;
        self.replace_population(population);
        Ok(())
    }

    /// Parses a raw parameter form and applies it; see [`Simulation::reconfigure`].
    pub fn apply(&mut self, form: &ParameterForm) -> Result<(), ConfigError> {
        let config = form.parse(&self.config)?;
        self.reconfigure(config)
    }

    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        export_csv(path, &self.history)?;
        info!(
            "wrote {} months of history to {}",
            self.history.len(),
            path.display()
        );
        Ok(())
    }
}

fn build_population(config: &SimulationConfig) -> Population {
    Population::with_rates(config.initial_population, config.decay_rates())
}
