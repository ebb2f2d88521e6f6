//! Course-wide day numbering
//!
//! A day number is the 1-based chronological rank of a date among every date
//! scheduled anywhere in the course. Adding or removing a date in any module
//! can shift the numbers of unrelated topics; the index is always rebuilt
//! from the full date set rather than patched.

use std::collections::{BTreeMap, BTreeSet};

use curricula_domain::DateKey;
use serde::Serialize;

/// Snapshot mapping each scheduled date to its day number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScheduleIndex {
    day_numbers: BTreeMap<DateKey, u32>,
}

impl ScheduleIndex {
    /// Deduplicate, sort ascending, rank from 1.
    ///
    /// Pure in the input set: duplicates and input order do not matter.
    pub fn build<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = DateKey>,
    {
        let unique: BTreeSet<DateKey> = dates.into_iter().collect();
        Self { day_numbers: unique.into_iter().zip(1..).collect() }
    }

    /// 1-based course day of `date`, if anything is scheduled on it.
    pub fn day_number(&self, date: DateKey) -> Option<u32> {
        self.day_numbers.get(&date).copied()
    }

    /// Inverse lookup: the date ranked `day`.
    pub fn date_for_day(&self, day: u32) -> Option<DateKey> {
        let position = usize::try_from(day.checked_sub(1)?).ok()?;
        self.day_numbers.keys().nth(position).copied()
    }

    /// Number of distinct scheduled dates.
    pub fn len(&self) -> usize {
        self.day_numbers.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.day_numbers.is_empty()
    }

    /// `(date, day number)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (DateKey, u32)> + '_ {
        self.day_numbers.iter().map(|(date, day)| (*date, *day))
    }

    /// Date to day number map.
    pub fn as_map(&self) -> &BTreeMap<DateKey, u32> {
        &self.day_numbers
    }
}
