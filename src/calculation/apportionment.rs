//! Salary apportionment.
//!
//! This module combines pay cycle boundaries and working-day counts into the
//! share of a full-cycle salary owed for a partial cycle:
//! `salary x days worked / working days in cycle`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApportionmentBasis, AuditStep, AuditWarning, EmploymentContract, PayCycle, PayCycleKind,
    PayCycleRange,
};

use super::pay_cycle_bounds::pay_cycle_bounds;
use super::working_days::count_working_days;

/// Warning code raised when a pay cycle contains none of the contract's working days.
pub const NO_WORKING_DAYS_WARNING: &str = "NO_WORKING_DAYS_IN_CYCLE";

/// Warning code raised when a month-anchored fortnight ends in the following month.
pub const FORTNIGHT_CROSSES_MONTH_WARNING: &str = "FORTNIGHT_CROSSES_MONTH";

/// The result of apportioning a salary, with the figures behind it.
#[derive(Debug, Clone)]
pub struct ApportionmentResult {
    /// The apportioned amount, between zero and the contract salary inclusive.
    pub amount: Decimal,
    /// The pay cycle the salary was apportioned against.
    pub cycle: PayCycleRange,
    /// Working days from the contract start to the end of the cycle.
    pub days_worked: u32,
    /// Working days in the whole cycle.
    pub working_days_in_cycle: u32,
    /// The rule that decided the amount.
    pub basis: ApportionmentBasis,
    /// The audit steps recording this calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about surprising but well-defined results.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the salary owed to an employee for the given pay cycle.
///
/// This is [`apportion_salary`] without the breakdown.
///
/// # Errors
///
/// Returns [`EngineError::InvalidContract`] for a negative salary, and
/// [`EngineError::DateOutOfRange`] when a recurring cycle cannot be derived
/// from the contract start date.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::calculate_apportioned_salary;
/// use salary_apportionment::models::{EmploymentContract, PayCycleKind, WorkingDays};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = EmploymentContract {
///     salary: Decimal::new(1000, 0),
///     working_days: WorkingDays::default(),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(), // a Tuesday
/// };
///
/// // Four of the week's five working days remain.
/// let amount = calculate_apportioned_salary(&contract, PayCycleKind::Weekly).unwrap();
/// assert_eq!(amount, Decimal::new(800, 0));
/// ```
pub fn calculate_apportioned_salary(
    contract: &EmploymentContract,
    cycle: impl Into<PayCycle>,
) -> EngineResult<Decimal> {
    apportion_salary(contract, cycle).map(|result| result.amount)
}

/// Apportions a salary over a pay cycle and records how the amount was reached.
///
/// For an explicit [`PayCycleRange`]:
/// - a contract starting before the range is owed the full salary,
/// - a contract starting after the range is owed nothing,
/// - otherwise the salary is prorated by working days from the contract start
///   to the end of the range over working days in the range.
///
/// For a recurring [`PayCycleKind`] the cycle containing the contract start is
/// derived first, and the salary is prorated the same way.
///
/// A cycle with no working days in it yields zero with a
/// [`NO_WORKING_DAYS_WARNING`] warning.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::apportion_salary;
/// use salary_apportionment::models::{
///     ApportionmentBasis, EmploymentContract, PayCycleRange, WorkingDays,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = EmploymentContract {
///     salary: Decimal::new(1000, 0),
///     working_days: WorkingDays::default(),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(),
/// };
/// let range = PayCycleRange::new(
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// let result = apportion_salary(&contract, range).unwrap();
/// assert_eq!(result.days_worked, 11);
/// assert_eq!(result.working_days_in_cycle, 22);
/// assert_eq!(result.basis, ApportionmentBasis::ProRata);
/// assert_eq!(result.amount, Decimal::new(500, 0));
/// ```
pub fn apportion_salary(
    contract: &EmploymentContract,
    cycle: impl Into<PayCycle>,
) -> EngineResult<ApportionmentResult> {
    contract.validate()?;

    let cycle = cycle.into();
    debug!(
        pay_cycle = %cycle,
        start_date = %contract.start_date,
        "Apportioning salary"
    );

    match cycle {
        PayCycle::Range(range) => apportion_over_range(contract, range),
        PayCycle::Recurring(kind) => apportion_over_recurring_cycle(contract, kind),
    }
}

fn apportion_over_range(
    contract: &EmploymentContract,
    range: PayCycleRange,
) -> EngineResult<ApportionmentResult> {
    let mut trail = AuditTrail::default();
    trail.push(
        "pay_cycle_resolution",
        "Pay Cycle Resolution",
        serde_json::json!({ "pay_cycle": "range" }),
        range_json(range),
        format!("Explicit pay cycle range {}", range),
    );

    let working_days_in_cycle =
        count_working_days(range.start_date(), range.end_date(), contract.working_days);
    trail.push_count(
        "working_days_in_cycle",
        "Working Days In Cycle",
        range.start_date(),
        range.end_date(),
        working_days_in_cycle,
    );

    let start = contract.start_date;

    if start < range.start_date() {
        trail.push(
            "coverage_check",
            "Coverage Check",
            serde_json::json!({
                "contract_start_date": start,
                "cycle_start_date": range.start_date(),
            }),
            serde_json::json!({ "basis": ApportionmentBasis::StartedBeforeCycle }),
            format!(
                "Employment started {} before the cycle start {}; full salary ${} is owed",
                start,
                range.start_date(),
                contract.salary.normalize()
            ),
        );
        return Ok(trail.finish(
            contract.salary,
            range,
            working_days_in_cycle,
            working_days_in_cycle,
            ApportionmentBasis::StartedBeforeCycle,
        ));
    }

    if start > range.end_date() {
        trail.push(
            "coverage_check",
            "Coverage Check",
            serde_json::json!({
                "contract_start_date": start,
                "cycle_end_date": range.end_date(),
            }),
            serde_json::json!({ "basis": ApportionmentBasis::StartedAfterCycle }),
            format!(
                "Employment starts {} after the cycle end {}; nothing is owed",
                start,
                range.end_date()
            ),
        );
        return Ok(trail.finish(
            Decimal::ZERO,
            range,
            0,
            working_days_in_cycle,
            ApportionmentBasis::StartedAfterCycle,
        ));
    }

    trail.push(
        "coverage_check",
        "Coverage Check",
        serde_json::json!({ "contract_start_date": start }),
        serde_json::json!({ "within_cycle": true }),
        format!("Employment starts {} within the cycle {}", start, range),
    );

    prorate(contract, range, working_days_in_cycle, trail)
}

fn apportion_over_recurring_cycle(
    contract: &EmploymentContract,
    kind: PayCycleKind,
) -> EngineResult<ApportionmentResult> {
    let mut trail = AuditTrail::default();
    let cycle = pay_cycle_bounds(contract.start_date, kind)?;
    trail.push(
        "pay_cycle_resolution",
        "Pay Cycle Resolution",
        serde_json::json!({
            "pay_cycle": kind,
            "anchor_date": contract.start_date,
        }),
        range_json(cycle),
        format!(
            "{} cycle containing {} runs {} to {}",
            kind,
            contract.start_date,
            cycle.start_date(),
            cycle.end_date()
        ),
    );

    if kind == PayCycleKind::Fortnightly && cycle.end_date().month() != cycle.start_date().month()
    {
        trail.warn(
            FORTNIGHT_CROSSES_MONTH_WARNING,
            format!(
                "Fortnight {} ends in the following month and overlaps that month's first fortnight",
                cycle
            ),
            "low",
        );
    }

    let working_days_in_cycle =
        count_working_days(cycle.start_date(), cycle.end_date(), contract.working_days);
    trail.push_count(
        "working_days_in_cycle",
        "Working Days In Cycle",
        cycle.start_date(),
        cycle.end_date(),
        working_days_in_cycle,
    );

    prorate(contract, cycle, working_days_in_cycle, trail)
}

/// Scales the salary by working days from the contract start to the cycle end.
fn prorate(
    contract: &EmploymentContract,
    cycle: PayCycleRange,
    working_days_in_cycle: u32,
    mut trail: AuditTrail,
) -> EngineResult<ApportionmentResult> {
    let days_worked = count_working_days(contract.start_date, cycle.end_date(), contract.working_days);
    trail.push_count(
        "days_worked",
        "Days Worked",
        contract.start_date,
        cycle.end_date(),
        days_worked,
    );

    if working_days_in_cycle == 0 {
        trail.warn(
            NO_WORKING_DAYS_WARNING,
            format!("Pay cycle {} contains none of the contract's working days", cycle),
            "medium",
        );
        trail.push(
            "proration",
            "Proration",
            serde_json::json!({
                "salary": contract.salary.normalize().to_string(),
                "days_worked": days_worked,
                "working_days_in_cycle": 0,
            }),
            serde_json::json!({ "amount": "0" }),
            "No working days in the cycle; nothing is owed".to_string(),
        );
        return Ok(trail.finish(
            Decimal::ZERO,
            cycle,
            days_worked,
            0,
            ApportionmentBasis::NoWorkingDays,
        ));
    }

    let amount = if days_worked == working_days_in_cycle {
        contract.salary
    } else {
        let worked = Decimal::from(days_worked);
        let total = Decimal::from(working_days_in_cycle);
        // Multiplying first keeps small salaries exact; the ratio is below
        // one, so scaling by it cannot overflow.
        contract
            .salary
            .checked_mul(worked)
            .and_then(|scaled| scaled.checked_div(total))
            .or_else(|| {
                worked
                    .checked_div(total)
                    .and_then(|ratio| contract.salary.checked_mul(ratio))
            })
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "salary {} cannot be prorated by {}/{} without overflow",
                    contract.salary, days_worked, working_days_in_cycle
                ),
            })?
    };

    trail.push(
        "proration",
        "Proration",
        serde_json::json!({
            "salary": contract.salary.normalize().to_string(),
            "days_worked": days_worked,
            "working_days_in_cycle": working_days_in_cycle,
        }),
        serde_json::json!({ "amount": amount.normalize().to_string() }),
        format!(
            "${} x {} / {} = ${}",
            contract.salary.normalize(),
            days_worked,
            working_days_in_cycle,
            amount.normalize()
        ),
    );

    Ok(trail.finish(
        amount,
        cycle,
        days_worked,
        working_days_in_cycle,
        ApportionmentBasis::ProRata,
    ))
}

fn range_json(range: PayCycleRange) -> serde_json::Value {
    serde_json::json!({
        "cycle_start_date": range.start_date(),
        "cycle_end_date": range.end_date(),
    })
}

/// Collects numbered audit steps and warnings for one calculation.
#[derive(Default)]
struct AuditTrail {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl AuditTrail {
    fn push(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn push_count(&mut self, rule_id: &str, rule_name: &str, from: NaiveDate, to: NaiveDate, count: u32) {
        self.push(
            rule_id,
            rule_name,
            serde_json::json!({ "from": from, "to": to }),
            serde_json::json!({ "count": count }),
            format!("{} working days from {} to {}", count, from, to),
        );
    }

    fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }

    fn finish(
        self,
        amount: Decimal,
        cycle: PayCycleRange,
        days_worked: u32,
        working_days_in_cycle: u32,
        basis: ApportionmentBasis,
    ) -> ApportionmentResult {
        ApportionmentResult {
            amount,
            cycle,
            days_worked,
            working_days_in_cycle,
            basis,
            audit_steps: self.steps,
            warnings: self.warnings,
        }
    }
}
