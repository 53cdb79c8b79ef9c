//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakRule, Region};

use super::types::WorktimeConfig;

/// Loads and provides access to the engine configuration.
///
/// # File format
///
/// ```text
/// holiday_path: meta/holidays.json
/// region: HE
/// pause_rules:
///   - { hours: 6, pause: 30 }
///   - { hours: 9, pause: 45 }
///   - { hours: 10, pause: 60 }
/// ```
///
/// # Example
///
/// ```
/// use worktime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::default();
/// assert_eq!(loader.break_rules().len(), 3);
/// assert_eq!(loader.config().region, "HE");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: WorktimeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: WorktimeConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self::from_config(config))
    }

    /// Loads the file at `path` if given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> EngineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Wraps an already constructed configuration.
    pub fn from_config(config: WorktimeConfig) -> Self {
        let config = config.normalized();
        if config.region().is_none() {
            warn!(
                region = %config.region,
                "unknown region code, only nationwide holidays will be generated"
            );
        }
        Self { config }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &WorktimeConfig {
        &self.config
    }

    /// Returns the configured break rules.
    pub fn break_rules(&self) -> Vec<BreakRule> {
        self.config.break_rules()
    }

    /// Returns the configured region, if recognized.
    pub fn region(&self) -> Option<Region> {
        self.config.region()
    }

    /// Returns the holiday data file location.
    pub fn holiday_path(&self) -> PathBuf {
        PathBuf::from(&self.config.holiday_path)
    }
}
