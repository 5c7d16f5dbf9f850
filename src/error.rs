//! Error types for the salary apportionment engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while apportioning a salary.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the salary apportionment engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_apportionment::error::EngineError;
///
/// let error = EngineError::UnsupportedPayCycle {
///     value: "UNSUPPORTED".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported pay cycle: UNSUPPORTED");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pay cycle was neither a known cycle kind nor a date range.
    #[error("Unsupported pay cycle: {value}")]
    UnsupportedPayCycle {
        /// The offending value, rendered for diagnostics.
        value: String,
    },

    /// A pay cycle kind name outside the closed set of kinds.
    #[error("Invalid pay cycle kind: {value}")]
    InvalidPayCycleKind {
        /// The unrecognised kind name.
        value: String,
    },

    /// A pay cycle range whose start date falls after its end date.
    #[error("Invalid pay cycle range: start date {start_date} is after end date {end_date}")]
    InvalidPayCycleRange {
        /// The start date of the rejected range.
        start_date: NaiveDate,
        /// The end date of the rejected range.
        end_date: NaiveDate,
    },

    /// An employment contract field was invalid.
    #[error("Invalid contract field '{field}': {message}")]
    InvalidContract {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Calendar arithmetic left the representable date range.
    #[error("Date out of range while deriving pay cycle from {date}")]
    DateOutOfRange {
        /// The reference date the derivation started from.
        date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
