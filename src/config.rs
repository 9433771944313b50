use crate::deal::DealAssumptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "deal_analyzer.json";
pub const CONFIG_PATH_ENV: &str = "DEAL_ANALYZER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assumptions: DealAssumptions,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            assumptions: DealAssumptions::default(),
            window_width: 1280.0,
            window_height: 900.0,
        }
    }
}

impl AppConfig {
    /// Path from `DEAL_ANALYZER_CONFIG`, else `deal_analyzer.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// A missing file yields the defaults; a broken one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: AppConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring config file, using defaults");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.assumptions;
        check_rate("closing_cost_rate", a.closing_cost_rate)?;
        check_rate("hard_money_rate", a.hard_money_rate)?;

        let target = a.default_target_percent;
        if !(target > 0.0 && target <= 100.0) {
            return Err(ConfigError::Invalid {
                field: "default_target_percent",
                message: format!("{target} is outside (0, 100]"),
            });
        }

        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "window_width/window_height",
                message: "window size must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn check_rate(field: &'static str, rate: f64) -> Result<(), ConfigError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("{rate} is not a non-negative rate"),
        })
    }
}
