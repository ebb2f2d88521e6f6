//! Calendar-date key
//!
//! Every date in the scheduling model is a plain calendar day. Time-of-day and
//! timezone never take part in equality, ordering, or storage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_KEY_FORMAT, DATE_KEY_LEN};
use crate::errors::{CurriculaError, Result};

/// Canonical `YYYY-MM-DD` calendar date.
///
/// Ordering follows the calendar. Serializes as the formatted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from year, month and day. Returns `None` for impossible
    /// dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a date key.
    ///
    /// Accepts `YYYY-MM-DD` and ISO date-times such as `2025-01-13T09:30:00+05:30`.
    /// Only the written calendar date is kept; no UTC conversion is applied.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || CurriculaError::InvalidInput(format!("invalid calendar date: '{input}'"));

        let (Some(date_part), Some(rest)) = (trimmed.get(..DATE_KEY_LEN), trimmed.get(DATE_KEY_LEN..))
        else {
            return Err(invalid());
        };
        if !rest.is_empty() && !is_time_suffix(date_part, rest) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(date_part, DATE_KEY_FORMAT).map_err(|_| invalid())?;
        let key = Self(date);
        // chrono tolerates unpadded fields; keys must be canonical
        if key.to_string() != date_part {
            return Err(invalid());
        }
        Ok(key)
    }

    /// The underlying calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, if representable.
    pub fn next_day(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Whole days from `self` to `later` (negative when `later` is earlier).
    pub fn days_until(self, later: Self) -> i64 {
        (later.0 - self.0).num_days()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(value: DateKey) -> Self {
        value.0
    }
}

/// `rest` must be a `T` (or space) separated time of day, optionally with a
/// UTC offset.
fn is_time_suffix(date_part: &str, rest: &str) -> bool {
    let Some(time) = rest.strip_prefix(['T', 't', ' ']) else {
        return false;
    };
    let normalised = format!("{date_part}T{time}");

    DateTime::parse_from_rfc3339(&normalised).is_ok()
        || DateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M%:z").is_ok()
        || NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M").is_ok()
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = CurriculaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = CurriculaError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}
