//! Request types for the salary apportionment API.
//!
//! This module defines the JSON request structures for the `/apportion` endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmploymentContract, WorkingDays};

/// Request body for the `/apportion` endpoint.
///
/// `pay_cycle` is kept as raw JSON so that a value matching neither a cycle
/// kind nor a date range is reported as an unsupported pay cycle rather than
/// a generic body error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApportionmentRequest {
    /// The employment contract to apportion.
    pub contract: ContractRequest,
    /// `"WEEKLY"`, `"FORTNIGHTLY"`, `"MONTHLY"`, or `{ "start_date", "end_date" }`.
    pub pay_cycle: serde_json::Value,
}

/// Contract information in an apportionment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    /// The salary for one full pay cycle.
    pub salary: Decimal,
    /// Paid days of the week; the configured default applies when absent.
    #[serde(default)]
    pub working_days: Option<WorkingDays>,
    /// The employee's effective start date. Any time of day is ignored.
    #[serde(deserialize_with = "crate::models::calendar_date::deserialize")]
    pub start_date: NaiveDate,
}

impl ContractRequest {
    /// Converts the request into a contract, filling in default working days.
    pub fn into_contract(self, default_working_days: WorkingDays) -> EmploymentContract {
        EmploymentContract {
            salary: self.salary,
            working_days: self.working_days.unwrap_or(default_working_days),
            start_date: self.start_date,
        }
    }
}
