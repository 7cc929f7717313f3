//! Console logging. Log lines go to stderr so report output on stdout stays
//! machine-readable.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{Config, Handle};
use thiserror::Error;

// ISO 8601 timestamp, color coded level, target
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging configuration: {0}")]
    Config(#[from] ConfigErrors),
    #[error("failed to install logger: {0}")]
    Install(#[from] log::SetLoggerError),
}

pub fn build_config(level: LevelFilter) -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
}

/// Installs the global logger. Can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<Handle, LoggingError> {
    let config = build_config(level)?;
    Ok(log4rs::init_config(config)?)
}
