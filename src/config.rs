//! Engine configuration

use crate::errors::RouteError;
use crate::route::DEFAULT_TIME_ESTIMATE_FACTOR;
use crate::stats::{DEFAULT_STATS_PRECISION, MAX_STATS_PRECISION};

use std::path::Path;
use serde::{Deserialize, Serialize};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Multiplier from route cost to estimated hours
    pub time_estimate_factor: f64,
    /// Decimals kept in the sample average cost
    pub stats_precision: u32,
    /// Endpoints of the showcase route
    pub default_origin: String,
    pub default_destination: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_estimate_factor: DEFAULT_TIME_ESTIMATE_FACTOR,
            stats_precision: DEFAULT_STATS_PRECISION,
            default_origin: "Ibarra".to_string(),
            default_destination: "Loja".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {

    /// Load configuration from a TOML file, defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, RouteError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| RouteError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RouteError> {
        let config: Self = toml::from_str(content)?;
        if !config.time_estimate_factor.is_finite() || config.time_estimate_factor < 0.0 {
            return Err(RouteError::Config(format!(
                "time_estimate_factor must be a non-negative number, got {}",
                config.time_estimate_factor
            )));
        }
        if config.stats_precision > MAX_STATS_PRECISION {
            return Err(RouteError::Config(format!(
                "stats_precision must be at most {MAX_STATS_PRECISION}, got {}",
                config.stats_precision
            )));
        }
        Ok(config)
    }
}
