//! Simulation parameters: scenario files, the raw parameter form and validation.

use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::individual::{DecayRange, DecayRates};

/// Largest cohort a simulation will allocate.
pub const MAX_POPULATION: usize = 10_000_000;

fn default_name() -> String {
    "mars_colony".to_string()
}

fn default_months() -> u32 {
    120
}

fn default_initial_population() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{field}: '{value}' is not a valid {expected}")]
    Malformed {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `Month N: Population = ...` lines.
    #[default]
    Text,
    /// One JSON object per month.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    /// Where to write the monthly history as CSV once the run completes.
    #[serde(default)]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Malformed {
                field: "logging.level",
                value: self.level.clone(),
                expected: "log level (off, error, warn, info, debug, trace)",
            })
    }
}

/// Everything needed to build and drive a colony simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Fixed seed for reproducible runs; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default = "default_initial_population")]
    pub initial_population: usize,
    #[serde(default)]
    pub water_usage_range: DecayRange,
    #[serde(default)]
    pub hunger_rate_range: DecayRange,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            seed: None,
            months: default_months(),
            initial_population: default_initial_population(),
            water_usage_range: DecayRange::default(),
            hunger_rate_range: DecayRange::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "name",
                reason: "scenario must define a name".to_string(),
            });
        }
        if self.initial_population > MAX_POPULATION {
            return Err(ConfigError::Invalid {
                field: "initial_population",
                reason: format!(
                    "{} exceeds the limit of {MAX_POPULATION}",
                    self.initial_population
                ),
            });
        }
        validate_range("water_usage_range", &self.water_usage_range)?;
        validate_range("hunger_rate_range", &self.hunger_rate_range)?;
        self.logging.level_filter()?;
        Ok(())
    }

    pub fn decay_rates(&self) -> DecayRates {
        DecayRates {
            water: self.water_usage_range,
            hunger: self.hunger_rate_range,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn validate_range(field: &'static str, range: &DecayRange) -> Result<(), ConfigError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("bounds must be finite, got [{}, {}]", range.min, range.max),
        });
    }
    if !(range.max - range.min).is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("width of [{}, {}] overflows", range.min, range.max),
        });
    }
    if range.min > range.max {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("min {} is greater than max {}", range.min, range.max),
        });
    }
    Ok(())
}

/// Unparsed parameter entries as typed by a user.
///
/// [`ParameterForm::parse`] either yields a complete, validated config or an
/// error; it never produces a partially updated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterForm {
    pub initial_population: String,
    pub water_usage_min: String,
    pub water_usage_max: String,
    pub hunger_rate_min: String,
    pub hunger_rate_max: String,
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl ParameterForm {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            initial_population: config.initial_population.to_string(),
            water_usage_min: config.water_usage_range.min.to_string(),
            water_usage_max: config.water_usage_range.max.to_string(),
            hunger_rate_min: config.hunger_rate_range.min.to_string(),
            hunger_rate_max: config.hunger_rate_range.max.to_string(),
        }
    }

    /// Applies the form on top of `base`, leaving the other settings as they are.
    pub fn parse(&self, base: &SimulationConfig) -> Result<SimulationConfig, ConfigError> {
        let initial_population = parse_count("initial_population", &self.initial_population)?;
        let water_usage_range = DecayRange::new(
            parse_bound("water_usage_min", &self.water_usage_min)?,
            parse_bound("water_usage_max", &self.water_usage_max)?,
        );
        let hunger_rate_range = DecayRange::new(
            parse_bound("hunger_rate_min", &self.hunger_rate_min)?,
            parse_bound("hunger_rate_max", &self.hunger_rate_max)?,
        );

        let config = SimulationConfig {
            initial_population,
            water_usage_range,
            hunger_rate_range,
            ..base.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::Malformed {
            field,
            value: value.to_string(),
            expected: "non-negative integer",
        })
}

fn parse_bound(field: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::Malformed {
            field,
            value: value.to_string(),
            expected: "number",
        })
}
