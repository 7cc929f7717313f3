use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::config::{ConfigError, SimulationConfig};

/// Reads scenario YAML files relative to a base directory.
pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Loads and validates a scenario.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<SimulationConfig, ConfigError> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: SimulationConfig =
            serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;
        debug!("loaded scenario '{}' from {}", config.name, path.display());
        Ok(config)
    }
}
