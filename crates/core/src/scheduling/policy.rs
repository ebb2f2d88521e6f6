//! Per-course holiday policy

use std::collections::BTreeSet;

use curricula_domain::constants::{DAYS_PER_WEEK, DEFAULT_EXCLUDED_WEEKDAYS};
use curricula_domain::{CourseWindow, DateKey};

use super::calendar::{self, days_between, weekday_of};
use super::error::{ScheduleError, ScheduleResult};

/// Days that automatic allocation must skip: excluded weekdays plus explicit
/// holidays. Built once per scheduling session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayPolicy {
    excluded_weekdays: BTreeSet<u8>,
    holidays: BTreeSet<DateKey>,
}

impl HolidayPolicy {
    /// Build a policy, rejecting weekday numbers outside `0..7`.
    pub fn new(
        excluded_weekdays: impl IntoIterator<Item = u8>,
        holidays: impl IntoIterator<Item = DateKey>,
    ) -> ScheduleResult<Self> {
        let excluded_weekdays: BTreeSet<u8> = excluded_weekdays.into_iter().collect();
        if let Some(&weekday) = excluded_weekdays.iter().find(|day| **day >= DAYS_PER_WEEK) {
            return Err(ScheduleError::InvalidWeekday { weekday });
        }
        Ok(Self { excluded_weekdays, holidays: holidays.into_iter().collect() })
    }

    /// Policy from a course window's exclusions.
    pub fn from_window(window: &CourseWindow) -> ScheduleResult<Self> {
        Self::new(window.excluded_weekdays.iter().copied(), window.custom_holidays.iter().copied())
    }

    /// Excluded weekday numbers, 0 = Sunday.
    pub fn excluded_weekdays(&self) -> &BTreeSet<u8> {
        &self.excluded_weekdays
    }

    /// Custom holidays.
    pub fn holidays(&self) -> &BTreeSet<DateKey> {
        &self.holidays
    }

    /// Whether `date` falls on an excluded weekday.
    pub fn is_excluded_weekday(&self, date: DateKey) -> bool {
        self.excluded_weekdays.contains(&weekday_of(date))
    }

    /// Whether `date` is a custom holiday.
    pub fn is_holiday(&self, date: DateKey) -> bool {
        self.holidays.contains(&date)
    }

    /// Neither an excluded weekday nor a holiday.
    pub fn is_valid_day(&self, date: DateKey) -> bool {
        calendar::is_valid_day(date, self)
    }

    /// First valid day in `from..=until`.
    pub fn next_valid_day(&self, from: DateKey, until: DateKey) -> Option<DateKey> {
        days_between(from, until).find(|day| self.is_valid_day(*day))
    }
}

impl Default for HolidayPolicy {
    /// Sundays off, no holidays.
    fn default() -> Self {
        Self { excluded_weekdays: DEFAULT_EXCLUDED_WEEKDAYS.into_iter().collect(), holidays: BTreeSet::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn rejects_out_of_range_weekdays() {
        assert_eq!(HolidayPolicy::new([0, 7], []), Err(ScheduleError::InvalidWeekday { weekday: 7 }));
    }

    #[test]
    fn default_excludes_sunday_only() {
        let policy = HolidayPolicy::default();
        assert!(!policy.is_valid_day(key("2025-01-12")));
        assert!(policy.is_valid_day(key("2025-01-11")));
        assert!(policy.holidays().is_empty());
    }

    #[test]
    fn from_window_copies_exclusions() {
        let window =
            CourseWindow::new(key("2025-01-01"), key("2025-01-31"), [0, 6], [key("2025-01-15")])
                .unwrap();
        let policy = HolidayPolicy::from_window(&window).unwrap();

        assert_eq!(policy.excluded_weekdays().len(), 2);
        assert!(policy.is_holiday(key("2025-01-15")));
        assert!(policy.is_excluded_weekday(key("2025-01-18")));
    }

    #[test]
    fn next_valid_day_skips_weekend_and_holiday() {
        let policy = HolidayPolicy::new([0, 6], [key("2025-01-13")]).unwrap();
        // Sat 11th, Sun 12th, holiday Mon 13th
        assert_eq!(policy.next_valid_day(key("2025-01-11"), key("2025-01-31")), Some(key("2025-01-14")));
        assert_eq!(policy.next_valid_day(key("2025-01-11"), key("2025-01-13")), None);
        assert_eq!(policy.next_valid_day(key("2025-01-20"), key("2025-01-19")), None);
    }
}
