//! Pay cycle models.
//!
//! A pay cycle is either an explicit [`PayCycleRange`] supplied by the caller
//! or a recurring [`PayCycleKind`] whose boundaries are derived from a
//! reference date. [`PayCycle`] joins the two so the engine can match on them
//! exhaustively.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

use super::calendar_date::{self, parse_calendar_date};

/// A recurring pay cycle.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::PayCycleKind;
///
/// let kind: PayCycleKind = "FORTNIGHTLY".parse().unwrap();
/// assert_eq!(kind, PayCycleKind::Fortnightly);
/// assert_eq!(kind.to_string(), "FORTNIGHTLY");
/// assert!("BIWEEKLY".parse::<PayCycleKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayCycleKind {
    /// Monday to Sunday.
    Weekly,
    /// 14-day blocks counted from the first day of each month.
    Fortnightly,
    /// First to last day of a calendar month.
    Monthly,
}

impl PayCycleKind {
    /// Every recurring cycle kind.
    pub const ALL: [PayCycleKind; 3] = [
        PayCycleKind::Weekly,
        PayCycleKind::Fortnightly,
        PayCycleKind::Monthly,
    ];

    /// The wire name of the cycle kind.
    pub fn as_str(self) -> &'static str {
        match self {
            PayCycleKind::Weekly => "WEEKLY",
            PayCycleKind::Fortnightly => "FORTNIGHTLY",
            PayCycleKind::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for PayCycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayCycleKind {
    type Err = EngineError;

    /// Parses an exact upper-case kind name such as `WEEKLY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayCycleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::InvalidPayCycleKind {
                value: s.to_string(),
            })
    }
}

#[derive(Deserialize)]
struct RawPayCycleRange {
    #[serde(deserialize_with = "calendar_date::deserialize")]
    start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date::deserialize")]
    end_date: NaiveDate,
}

/// An explicit, inclusive pay cycle window.
///
/// The start date never falls after the end date; [`PayCycleRange::new`] and
/// deserialization both enforce this.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::PayCycleRange;
/// use chrono::NaiveDate;
///
/// let range = PayCycleRange::new(
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(range.len_days(), 31);
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()));
/// assert!(!range.contains_date(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPayCycleRange")]
pub struct PayCycleRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PayCycleRange {
    /// Creates a range, rejecting one whose start falls after its end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidPayCycleRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The first day of the range (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the range (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Checks if a given date falls within the range, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl TryFrom<RawPayCycleRange> for PayCycleRange {
    type Error = EngineError;

    fn try_from(raw: RawPayCycleRange) -> Result<Self, Self::Error> {
        PayCycleRange::new(raw.start_date, raw.end_date)
    }
}

impl fmt::Display for PayCycleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_date, self.end_date)
    }
}

/// The pay cycle an apportionment is calculated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayCycle {
    /// A caller-supplied date window.
    Range(PayCycleRange),
    /// A recurring cycle anchored on the contract start date.
    Recurring(PayCycleKind),
}

impl PayCycle {
    /// Resolves an untyped JSON value into a pay cycle.
    ///
    /// A string naming a [`PayCycleKind`] selects recurring mode. An object
    /// with both `start_date` and `end_date` (or `startDate` / `endDate`)
    /// selects range mode. Anything else fails with
    /// [`EngineError::UnsupportedPayCycle`] carrying the value.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_apportionment::models::{PayCycle, PayCycleKind};
    /// use salary_apportionment::error::EngineError;
    /// use serde_json::json;
    ///
    /// let monthly = PayCycle::from_value(&json!("MONTHLY")).unwrap();
    /// assert_eq!(monthly, PayCycle::Recurring(PayCycleKind::Monthly));
    ///
    /// let range = PayCycle::from_value(&json!({
    ///     "start_date": "2023-01-01",
    ///     "end_date": "2023-01-31"
    /// }))
    /// .unwrap();
    /// assert!(matches!(range, PayCycle::Range(_)));
    ///
    /// let err = PayCycle::from_value(&json!("UNSUPPORTED")).unwrap_err();
    /// assert_eq!(err.to_string(), "Unsupported pay cycle: UNSUPPORTED");
    /// ```
    pub fn from_value(value: &Value) -> EngineResult<Self> {
        match value {
            Value::String(name) => name
                .parse::<PayCycleKind>()
                .map(PayCycle::Recurring)
                .map_err(|_| unsupported(value)),
            Value::Object(fields) => {
                let start = fields.get("start_date").or_else(|| fields.get("startDate"));
                let end = fields.get("end_date").or_else(|| fields.get("endDate"));
                let (Some(start), Some(end)) = (start, end) else {
                    return Err(unsupported(value));
                };
                let start_date = date_field(start).ok_or_else(|| unsupported(value))?;
                let end_date = date_field(end).ok_or_else(|| unsupported(value))?;
                PayCycleRange::new(start_date, end_date).map(PayCycle::Range)
            }
            _ => Err(unsupported(value)),
        }
    }

    /// The recurring kind, if this is a recurring cycle.
    pub fn kind(&self) -> Option<PayCycleKind> {
        match self {
            PayCycle::Range(_) => None,
            PayCycle::Recurring(kind) => Some(*kind),
        }
    }
}

fn date_field(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_calendar_date)
}

fn unsupported(value: &Value) -> EngineError {
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    EngineError::UnsupportedPayCycle { value }
}

impl From<PayCycleRange> for PayCycle {
    fn from(range: PayCycleRange) -> Self {
        PayCycle::Range(range)
    }
}

impl From<PayCycleKind> for PayCycle {
    fn from(kind: PayCycleKind) -> Self {
        PayCycle::Recurring(kind)
    }
}

impl fmt::Display for PayCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayCycle::Range(range) => write!(f, "{}", range),
            PayCycle::Recurring(kind) => write!(f, "{}", kind),
        }
    }
}
