//! Working-day counting over inclusive date ranges.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::WorkingDays;

/// Counts the days in `[from, to]` whose weekday is in `working_days`.
///
/// An inverted range (`from > to`) is empty and yields 0. Every whole week
/// in the range contributes each working day once, so only the trailing
/// partial week is walked day by day.
///
/// Pass [`WorkingDays::default()`] for the Monday to Friday week.
///
/// # Example
///
/// ```
/// use salary_apportionment::calculation::count_working_days;
/// use salary_apportionment::models::WorkingDays;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
///
/// assert_eq!(count_working_days(from, to, WorkingDays::default()), 22);
///
/// let weekends = WorkingDays::from_day_numbers(&[0, 6]).unwrap();
/// assert_eq!(count_working_days(from, to, weekends), 9);
///
/// assert_eq!(count_working_days(to, from, WorkingDays::default()), 0);
/// ```
pub fn count_working_days(from: NaiveDate, to: NaiveDate, working_days: WorkingDays) -> u32 {
    if from > to || working_days.is_empty() {
        return 0;
    }

    let span = (to - from).num_days() + 1;
    let whole_weeks = span / 7;
    let from_whole_weeks = whole_weeks as u32 * working_days.len();

    // Within the calendar since the remainder starts no later than `to`.
    let remainder_start = from + Days::new(whole_weeks as u64 * 7);
    let from_remainder = remainder_start
        .iter_days()
        .take_while(|day| *day <= to)
        .filter(|day| working_days.contains(day.weekday()))
        .fold(0, |count, _| count + 1);

    from_whole_weeks + from_remainder
}
