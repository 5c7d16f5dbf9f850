//! Configuration loading and management for the salary apportionment engine.
//!
//! This module loads payroll configuration from YAML: the working days a
//! contract falls back to, and how reported amounts are rounded.
//!
//! # Example
//!
//! ```no_run
//! use salary_apportionment::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Rounding to {} places", config.rounding().decimal_places);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Defaults, PayrollConfig, RoundingConfig, RoundingMode};
