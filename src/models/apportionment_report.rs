//! Apportionment report models.
//!
//! This module contains the [`ApportionmentReport`] type and the audit
//! structures that record how an apportioned salary was arrived at.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayCycleKind, PayCycleRange};

/// Which rule decided the apportioned amount.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::ApportionmentBasis;
///
/// let basis = ApportionmentBasis::ProRata;
/// assert_eq!(serde_json::to_string(&basis).unwrap(), "\"pro_rata\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApportionmentBasis {
    /// Employment started before the pay cycle range; full salary is owed.
    StartedBeforeCycle,
    /// Employment starts after the pay cycle range; nothing is owed.
    StartedAfterCycle,
    /// Salary scaled by working days worked over working days in the cycle.
    ProRata,
    /// The cycle contains none of the contract's working days; nothing is owed.
    NoWorkingDays,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are well defined but may surprise a reader,
/// such as a cycle with no working days in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete, serializable outcome of one apportionment request.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::{
///     ApportionmentBasis, ApportionmentReport, AuditTrace, PayCycleKind, PayCycleRange,
/// };
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let report = ApportionmentReport {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     pay_cycle_kind: Some(PayCycleKind::Weekly),
///     cycle: PayCycleRange::new(
///         NaiveDate::from_ymd_opt(2023, 1, 16).unwrap(),
///         NaiveDate::from_ymd_opt(2023, 1, 22).unwrap(),
///     )
///     .unwrap(),
///     salary: Decimal::new(1000, 0),
///     days_worked: 4,
///     working_days_in_cycle: 5,
///     basis: ApportionmentBasis::ProRata,
///     amount: Decimal::new(800, 0),
///     rounded_amount: Decimal::new(80000, 2),
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(report.amount <= report.salary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApportionmentReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The recurring cycle kind, or `None` for a caller-supplied range.
    pub pay_cycle_kind: Option<PayCycleKind>,
    /// The pay cycle the salary was apportioned against.
    pub cycle: PayCycleRange,
    /// The full-cycle salary from the contract.
    pub salary: Decimal,
    /// Working days from the contract start to the end of the cycle.
    pub days_worked: u32,
    /// Working days in the whole cycle.
    pub working_days_in_cycle: u32,
    /// The rule that decided the amount.
    pub basis: ApportionmentBasis,
    /// The exact apportioned amount.
    pub amount: Decimal,
    /// The amount rounded per the configured rounding rule.
    pub rounded_amount: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
