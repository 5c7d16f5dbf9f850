//! Core data models for the salary apportionment engine.
//!
//! This module contains all the domain models used throughout the engine.

mod apportionment_report;
pub(crate) mod calendar_date;
mod contract;
mod pay_cycle;

pub use apportionment_report::{
    ApportionmentBasis, ApportionmentReport, AuditStep, AuditTrace, AuditWarning,
};
pub use calendar_date::parse_calendar_date;
pub use contract::{EmploymentContract, WorkingDays};
pub use pay_cycle::{PayCycle, PayCycleKind, PayCycleRange};
