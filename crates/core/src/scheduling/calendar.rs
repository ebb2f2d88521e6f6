//! Calendar date helpers
//!
//! Pure functions over [`DateKey`]. Weekdays are numbered 0 (Sunday) to
//! 6 (Saturday) everywhere in the scheduler.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use curricula_domain::DateKey;

use super::error::{ScheduleError, ScheduleResult};
use super::policy::HolidayPolicy;

/// Values that name a calendar day.
///
/// Time-of-day components are dropped. Zoned values keep the date as seen in
/// their own zone, so a late-evening timestamp never rolls over to the next
/// UTC day.
pub trait ToDateKey {
    fn to_date_key(&self) -> DateKey;
}

impl ToDateKey for DateKey {
    fn to_date_key(&self) -> DateKey {
        *self
    }
}

impl ToDateKey for NaiveDate {
    fn to_date_key(&self) -> DateKey {
        DateKey::from(*self)
    }
}

impl ToDateKey for NaiveDateTime {
    fn to_date_key(&self) -> DateKey {
        DateKey::from(self.date())
    }
}

impl<Tz: TimeZone> ToDateKey for DateTime<Tz> {
    fn to_date_key(&self) -> DateKey {
        DateKey::from(self.date_naive())
    }
}

/// Normalize any calendar-day value to its key.
pub fn date_key<D: ToDateKey + ?Sized>(value: &D) -> DateKey {
    value.to_date_key()
}

/// Weekday number, 0 = Sunday.
pub fn weekday_of(date: DateKey) -> u8 {
    // num_days_from_sunday is always < 7
    date.date().weekday().num_days_from_sunday() as u8
}

/// Every day from `start` to `end`, inclusive, ascending.
pub fn enumerate_range(start: DateKey, end: DateKey) -> ScheduleResult<Vec<DateKey>> {
    if start > end {
        return Err(ScheduleError::InvalidRange { start, end });
    }
    Ok(days_between(start, end).collect())
}

/// Lazy inclusive day iterator; empty when `start > end`.
pub(crate) fn days_between(start: DateKey, end: DateKey) -> impl Iterator<Item = DateKey> {
    let last = end.date();
    start.date().iter_days().take_while(move |day| *day <= last).map(DateKey::from)
}

/// False when the day falls on an excluded weekday or a listed holiday.
pub fn is_valid_day(date: DateKey, policy: &HolidayPolicy) -> bool {
    !policy.is_excluded_weekday(date) && !policy.is_holiday(date)
}

/// Number of days in a month, or `None` for an impossible month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn weekday_numbering_starts_on_sunday() {
        assert_eq!(weekday_of(key("2025-01-12")), 0);
        assert_eq!(weekday_of(key("2025-01-13")), 1);
        assert_eq!(weekday_of(key("2025-01-18")), 6);
    }

    #[test]
    fn zoned_timestamps_keep_their_local_day() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = offset.with_ymd_and_hms(2025, 1, 13, 23, 30, 0).unwrap();
        assert_eq!(date_key(&evening), key("2025-01-13"));
        // the same instant in UTC is already the 14th
        assert_eq!(date_key(&evening.with_timezone(&Utc)), key("2025-01-14"));
    }

    #[test]
    fn naive_values_normalize_to_the_same_key() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let noon = day.and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(date_key(&day), date_key(&noon));
    }

    #[test]
    fn enumerate_range_is_inclusive() {
        let days = enumerate_range(key("2024-02-27"), key("2024-03-01")).unwrap();
        let rendered: Vec<String> = days.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]);

        assert_eq!(enumerate_range(key("2025-01-05"), key("2025-01-05")).unwrap().len(), 1);
    }

    #[test]
    fn enumerate_range_rejects_inverted_bounds() {
        let err = enumerate_range(key("2025-01-06"), key("2025-01-05")).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidRange { start: key("2025-01-06"), end: key("2025-01-05") }
        );
    }

    #[test]
    fn validity_checks_weekday_and_holiday() {
        let policy = HolidayPolicy::new([0], [key("2025-01-15")]).unwrap();
        assert!(is_valid_day(key("2025-01-14"), &policy));
        assert!(!is_valid_day(key("2025-01-15"), &policy));
        assert!(!is_valid_day(key("2025-01-19"), &policy));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }
}
