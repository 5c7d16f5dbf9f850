//! Lenient calendar-date parsing for wire input.
//!
//! Callers frequently send timestamps where a calendar day is meant. Only the
//! date component takes part in any calculation, so the time of day (and for
//! RFC 3339 input, the offset) is dropped here, before a value reaches the
//! engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de};

/// Parses `YYYY-MM-DD`, a naive date-time, or an RFC 3339 timestamp into the
/// calendar date it names.
///
/// RFC 3339 timestamps resolve to the date local to their own offset.
///
/// # Example
///
/// ```
/// use salary_apportionment::models::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 1, 17).unwrap();
/// assert_eq!(parse_calendar_date("2023-01-17"), Some(expected));
/// assert_eq!(parse_calendar_date("2023-01-17T23:30:00"), Some(expected));
/// assert_eq!(parse_calendar_date("2023-01-17T23:30:00+11:00"), Some(expected));
/// assert_eq!(parse_calendar_date("17/01/2023"), None);
/// ```
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Serde adapter for `#[serde(deserialize_with = "...")]` on date fields.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid calendar date: {}", raw)))
}
