//! Pay cycle boundary derivation.
//!
//! Given a reference date and a [`PayCycleKind`], these functions find the
//! first and last day of the cycle instance that contains the reference date.
//! Both ends are inclusive.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayCycleKind, PayCycleRange};

/// Length of a fortnightly block in days.
pub const FORTNIGHT_DAYS: u32 = 14;

/// Returns the first day of the pay cycle containing `reference`.
///
/// - Weekly: the Monday of the ISO week.
/// - Fortnightly: the start of the 14-day block, counting blocks from day 1
///   of the reference date's month.
/// - Monthly: the first day of the month.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::start_of_pay_cycle;
/// use salary_apportionment::models::PayCycleKind;
/// use chrono::NaiveDate;
///
/// let tuesday = NaiveDate::from_ymd_opt(2023, 1, 17).unwrap();
/// assert_eq!(
///     start_of_pay_cycle(tuesday, PayCycleKind::Weekly).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 16).unwrap()
/// );
/// assert_eq!(
///     start_of_pay_cycle(tuesday, PayCycleKind::Fortnightly).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
/// );
/// ```
pub fn start_of_pay_cycle(reference: NaiveDate, kind: PayCycleKind) -> EngineResult<NaiveDate> {
    let days_back = match kind {
        PayCycleKind::Weekly => reference.weekday().num_days_from_monday(),
        PayCycleKind::Fortnightly => day_of_fortnight(reference),
        PayCycleKind::Monthly => reference.day0(),
    };

    reference
        .checked_sub_days(Days::new(u64::from(days_back)))
        .ok_or(EngineError::DateOutOfRange { date: reference })
}

/// Returns the last day of the pay cycle containing `reference`.
///
/// - Weekly: the Sunday of the ISO week. A Sunday reference is its own end.
/// - Fortnightly: 13 days after the block start. Blocks restart on day 1 of
///   every month, so a block starting on the 29th or later ends in the next
///   month and overlaps that month's first block.
/// - Monthly: the last day of the month, leap years included.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::end_of_pay_cycle;
/// use salary_apportionment::models::PayCycleKind;
/// use chrono::NaiveDate;
///
/// let leap_day = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(
///     end_of_pay_cycle(leap_day, PayCycleKind::Monthly).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
/// );
/// ```
pub fn end_of_pay_cycle(reference: NaiveDate, kind: PayCycleKind) -> EngineResult<NaiveDate> {
    let out_of_range = EngineError::DateOutOfRange { date: reference };

    match kind {
        PayCycleKind::Weekly => {
            // A Sunday closes its own week rather than rolling forward seven
            // days, so the end always pairs with the Monday from
            // `start_of_pay_cycle`.
            let days_forward = 6 - reference.weekday().num_days_from_monday();
            reference
                .checked_add_days(Days::new(u64::from(days_forward)))
                .ok_or(out_of_range)
        }
        PayCycleKind::Fortnightly => {
            let days_forward = FORTNIGHT_DAYS - 1 - day_of_fortnight(reference);
            reference
                .checked_add_days(Days::new(u64::from(days_forward)))
                .ok_or(out_of_range)
        }
        PayCycleKind::Monthly => reference
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next_month| next_month.pred_opt())
            .ok_or(out_of_range),
    }
}

/// Returns both ends of the pay cycle containing `reference`.
///
/// The start and end are each derived from `reference` on its own; the
/// anchoring rules guarantee they describe the same cycle instance.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::pay_cycle_bounds;
/// use salary_apportionment::models::PayCycleKind;
/// use chrono::NaiveDate;
///
/// let bounds = pay_cycle_bounds(
///     NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(),
///     PayCycleKind::Weekly,
/// )
/// .unwrap();
/// assert_eq!(bounds.start_date(), NaiveDate::from_ymd_opt(2023, 1, 16).unwrap());
/// assert_eq!(bounds.end_date(), NaiveDate::from_ymd_opt(2023, 1, 22).unwrap());
/// ```
pub fn pay_cycle_bounds(reference: NaiveDate, kind: PayCycleKind) -> EngineResult<PayCycleRange> {
    let start = start_of_pay_cycle(reference, kind)?;
    let end = end_of_pay_cycle(reference, kind)?;
    PayCycleRange::new(start, end)
}

/// Zero-based position of `date` within its month-anchored fortnight.
fn day_of_fortnight(date: NaiveDate) -> u32 {
    date.day0() % FORTNIGHT_DAYS
}
