//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkingDays;

use super::types::{PayrollConfig, RoundingConfig};

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

/// Loads and provides access to payroll configuration.
///
/// # File Format
///
/// ```text
/// defaults:
///   working_days: [1, 2, 3, 4, 5]   # 0 = Sunday .. 6 = Saturday
/// rounding:
///   decimal_places: 2
///   strategy: midpoint_away_from_zero
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_apportionment::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Default working days: {:?}", loader.default_working_days());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file does not exist or cannot be read,
    /// and `ConfigParseError` if it is not valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            return Err(EngineError::ConfigNotFound { path: path_str });
        }

        let content = fs::read_to_string(path)
            .map_err(|_| EngineError::ConfigNotFound { path: path_str.clone() })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_apportionment::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("defaults:\n  working_days: [1, 3, 5]\n").unwrap();
    /// assert_eq!(loader.default_working_days().day_numbers(), vec![1, 3, 5]);
    /// assert_eq!(loader.rounding().decimal_places, 2);
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if config.rounding.decimal_places > MAX_DECIMAL_PLACES {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: format!(
                    "rounding.decimal_places must be at most {}, got {}",
                    MAX_DECIMAL_PLACES,
                    config.rounding.decimal_places
                ),
            });
        }

        Ok(Self { config })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Working days applied to contracts that do not list their own.
    pub fn default_working_days(&self) -> WorkingDays {
        self.config.defaults.working_days
    }

    /// The rounding rule for reported amounts.
    pub fn rounding(&self) -> &RoundingConfig {
        &self.config.rounding
    }
}
