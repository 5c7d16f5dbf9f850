//! Employment contract model and the working-day set it carries.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The set of weekdays an employee is paid for.
///
/// On the wire this is a list of day numbers where `0` is Sunday and `6` is
/// Saturday. Internally it is a bit set indexed by the same numbering, so
/// membership checks are a shift and a mask.
///
/// The default is Monday to Friday.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::WorkingDays;
/// use chrono::Weekday;
///
/// let part_time = WorkingDays::from_day_numbers(&[1, 3, 5]).unwrap();
/// assert!(part_time.contains(Weekday::Wed));
/// assert!(!part_time.contains(Weekday::Tue));
/// assert_eq!(part_time.len(), 3);
///
/// assert_eq!(WorkingDays::default(), WorkingDays::MONDAY_TO_FRIDAY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WorkingDays(u8);

impl WorkingDays {
    /// Monday through Friday.
    pub const MONDAY_TO_FRIDAY: WorkingDays = WorkingDays(0b0011_1110);

    /// Every day of the week.
    pub const ALL_WEEK: WorkingDays = WorkingDays(0b0111_1111);

    /// A set containing no days.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from day numbers (`0` = Sunday .. `6` = Saturday).
    ///
    /// Duplicates are ignored. Any number above `6` is rejected with
    /// [`EngineError::InvalidContract`].
    pub fn from_day_numbers(days: &[u8]) -> EngineResult<Self> {
        days.iter().try_fold(Self::empty(), |set, &day| {
            if day > 6 {
                return Err(EngineError::InvalidContract {
                    field: "working_days".to_string(),
                    message: format!("day number {} is outside 0 (Sunday) to 6 (Saturday)", day),
                });
            }
            Ok(Self(set.0 | (1 << day)))
        })
    }

    /// Builds a set from chrono weekdays.
    pub fn from_weekdays<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        days.into_iter()
            .fold(Self::empty(), |set, day| Self(set.0 | bit(day)))
    }

    /// Returns true if the given weekday is a working day.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    /// Returns the day numbers in ascending order (`0` = Sunday).
    pub fn day_numbers(self) -> Vec<u8> {
        (0..7u8).filter(|day| self.0 & (1 << day) != 0).collect()
    }

    /// Number of working days per week.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if no day of the week is a working day.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self::MONDAY_TO_FRIDAY
    }
}

impl TryFrom<Vec<u8>> for WorkingDays {
    type Error = EngineError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_day_numbers(&days)
    }
}

impl From<WorkingDays> for Vec<u8> {
    fn from(days: WorkingDays) -> Self {
        days.day_numbers()
    }
}

/// The agreed full-cycle salary and the date the employee starts.
///
/// `working_days` may be omitted when deserializing, in which case it
/// defaults to Monday to Friday.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::{EmploymentContract, WorkingDays};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = EmploymentContract {
///     salary: Decimal::new(1000, 0),
///     working_days: WorkingDays::default(),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 17).unwrap(),
/// };
/// assert!(contract.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentContract {
    /// The salary for one full pay cycle.
    pub salary: Decimal,
    /// The days of the week that are paid.
    #[serde(default)]
    pub working_days: WorkingDays,
    /// The employee's effective start date.
    #[serde(deserialize_with = "super::calendar_date::deserialize")]
    pub start_date: NaiveDate,
}

impl EmploymentContract {
    /// Checks the contract preconditions: the salary must not be negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.salary < Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "salary".to_string(),
                message: format!("must not be negative, got {}", self.salary),
            });
        }
        Ok(())
    }
}
