//! Calculation logic for the salary apportionment engine.
//!
//! This module contains pay cycle boundary derivation for weekly, fortnightly
//! and monthly cycles, inclusive working-day counting, and the apportionment
//! of a full-cycle salary over a partial cycle.

mod apportionment;
mod pay_cycle_bounds;
mod working_days;

pub use apportionment::{
    ApportionmentResult, FORTNIGHT_CROSSES_MONTH_WARNING, NO_WORKING_DAYS_WARNING,
    apportion_salary, calculate_apportioned_salary,
};
pub use pay_cycle_bounds::{FORTNIGHT_DAYS, end_of_pay_cycle, pay_cycle_bounds, start_of_pay_cycle};
pub use working_days::count_working_days;
