pub mod config;
pub mod engine;
pub mod export;
pub mod individual;
pub mod logging;
pub mod population;
pub mod rng;
pub mod scenario;

pub use config::{ParameterForm, ReportFormat, SimulationConfig};
pub use engine::Simulation;
pub use individual::{Condition, DecayRange, Individual, Vitals};
pub use population::{Census, MonthlyStatistics, Population};
pub use rng::{ColonyRng, ScriptedDraws, UniformSource};
