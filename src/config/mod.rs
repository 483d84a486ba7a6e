mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, warn};

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;

    if let Ok(value) = env::var("ENGINE_MAX_CONCURRENCY") {
        match value.parse::<usize>() {
            Ok(n) if n > 0 => config.engine.max_concurrency = n,
            _ => warn!("Ignoring invalid ENGINE_MAX_CONCURRENCY: '{}'", value),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parses a YAML document into a [`Config`] without touching the environment.
pub fn parse(yaml: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.engine.base_url.trim().is_empty() {
            return Err(Error::config("engine.base_url cannot be empty"));
        }
        if self.engine.model.trim().is_empty() {
            return Err(Error::config("engine.model cannot be empty"));
        }
        if self.engine.max_concurrency == 0 {
            return Err(Error::config("engine.max_concurrency must be at least 1"));
        }

        let generation = &self.generation;
        if generation.temperature < 0.0 {
            return Err(Error::config(format!(
                "generation.temperature must be non-negative, got {}",
                generation.temperature
            )));
        }
        if !(generation.nucleus_threshold > 0.0 && generation.nucleus_threshold <= 1.0) {
            return Err(Error::config(format!(
                "generation.nucleus_threshold must be in (0, 1], got {}",
                generation.nucleus_threshold
            )));
        }

        Ok(())
    }
}
