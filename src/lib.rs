//! Salary apportionment for partial pay cycles.
//!
//! This crate computes the share of a fixed periodic salary owed to an
//! employee whose contract starts part-way through a pay cycle. The cycle is
//! either an explicit date range or a recurring weekly, fortnightly or
//! monthly cycle, and the salary is prorated by the contract's working days.
//!
//! ```
//! use salary_apportionment::calculation::calculate_apportioned_salary;
//! use salary_apportionment::models::{EmploymentContract, PayCycleKind, WorkingDays};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let contract = EmploymentContract {
//!     salary: Decimal::new(1000, 0),
//!     working_days: WorkingDays::default(),
//!     start_date: NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(),
//! };
//! let owed = calculate_apportioned_salary(&contract, PayCycleKind::Monthly).unwrap();
//! assert_eq!(owed, Decimal::new(500, 0));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
