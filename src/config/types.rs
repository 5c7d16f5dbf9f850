//! Configuration types for salary apportionment.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::models::WorkingDays;

/// Defaults applied when a request leaves a value out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    /// Working days used when a contract does not list its own.
    #[serde(default)]
    pub working_days: WorkingDays,
}

/// How an exact apportioned amount is rounded for payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Half-way values round away from zero (0.005 -> 0.01).
    MidpointAwayFromZero,
    /// Half-way values round to the nearest even digit (banker's rounding).
    MidpointNearestEven,
    /// Truncate towards zero.
    ToZero,
}

impl From<RoundingMode> for RoundingStrategy {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::MidpointAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::MidpointNearestEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::ToZero => RoundingStrategy::ToZero,
        }
    }
}

/// Rounding rule for reported amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoundingConfig {
    /// Number of decimal places kept.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// How the last kept digit is chosen.
    #[serde(default = "default_rounding_mode")]
    pub strategy: RoundingMode,
}

fn default_decimal_places() -> u32 {
    2
}

fn default_rounding_mode() -> RoundingMode {
    RoundingMode::MidpointAwayFromZero
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
            strategy: default_rounding_mode(),
        }
    }
}

impl RoundingConfig {
    /// Rounds an amount per this rule.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_apportionment::config::RoundingConfig;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let rounding = RoundingConfig::default();
    /// let amount = Decimal::from_str("2727.272727").unwrap();
    /// assert_eq!(rounding.apply(amount), Decimal::from_str("2727.27").unwrap());
    /// ```
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, self.strategy.into())
    }
}

/// The complete payroll configuration.
///
/// Every section is optional in the YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollConfig {
    /// Request defaults.
    #[serde(default)]
    pub defaults: Defaults,
    /// Rounding of reported amounts.
    #[serde(default)]
    pub rounding: RoundingConfig,
}
