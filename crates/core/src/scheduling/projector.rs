//! Read-side course calendar
//!
//! Aggregates every module's saved schedule into a date-to-topics map with
//! course-wide day numbers, and slices it into Sunday-first month grids.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use curricula_domain::constants::DAYS_PER_WEEK;
use curricula_domain::{Course, CourseWindow, DateKey, ModuleId, ModuleSchedule, TopicId};
use serde::Serialize;
use tracing::debug;

use super::calendar::{days_in_month, weekday_of};
use super::error::{ScheduleError, ScheduleResult};
use super::index::ScheduleIndex;
use super::policy::HolidayPolicy;

/// One topic shown on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    /// Topic id.
    pub topic_id: TopicId,
    /// Topic display name.
    pub topic_name: String,
    /// Module id.
    pub module_id: ModuleId,
    /// Module display name.
    pub module_name: String,
    /// Course-wide day number of the cell's date.
    pub day_number: u32,
    /// Practice problems attached to the topic.
    pub problem_count: u32,
}

/// A day inside a month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    /// Calendar date.
    pub date: DateKey,
    /// 1-based day of the month.
    pub day_of_month: u32,
    /// Inside the course window.
    pub in_window: bool,
    /// Excluded weekday or custom holiday.
    pub is_excluded: bool,
    /// Topics scheduled on this day.
    pub entries: Vec<CalendarEntry>,
}

/// Sunday-first grid of one month, padded with blanks to whole weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    /// Calendar year.
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    /// Blank cells before the 1st.
    pub leading_blanks: usize,
    /// Row-major cells; `None` is padding.
    pub cells: Vec<Option<DayCell>>,
}

impl MonthView {
    /// Cells split into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> + '_ {
        self.cells.chunks(usize::from(DAYS_PER_WEEK))
    }

    /// Cell for a 1-based day of the month.
    pub fn cell(&self, day_of_month: u32) -> Option<&DayCell> {
        self.cells.iter().flatten().find(|cell| cell.day_of_month == day_of_month)
    }
}

/// Projected calendar of a whole course
#[derive(Debug, Clone)]
pub struct CourseCalendar {
    window: CourseWindow,
    policy: HolidayPolicy,
    index: ScheduleIndex,
    entries: BTreeMap<DateKey, Vec<CalendarEntry>>,
}

impl CourseCalendar {
    /// Day numbering the calendar was built with.
    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    /// Entries of every scheduled date.
    pub fn entries(&self) -> &BTreeMap<DateKey, Vec<CalendarEntry>> {
        &self.entries
    }

    /// What is scheduled on `date`.
    pub fn entries_on(&self, date: DateKey) -> &[CalendarEntry] {
        self.entries.get(&date).map_or(&[][..], Vec::as_slice)
    }

    /// What is scheduled on course day `day_number`.
    pub fn entries_on_day(&self, day_number: u32) -> &[CalendarEntry] {
        self.index.date_for_day(day_number).map_or(&[][..], |date| self.entries_on(date))
    }

    /// Month grid for `year`/`month`.
    pub fn month(&self, year: i32, month: u32) -> ScheduleResult<MonthView> {
        let days = days_in_month(year, month).ok_or(ScheduleError::InvalidMonth { year, month })?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .map(DateKey::from)
            .ok_or(ScheduleError::InvalidMonth { year, month })?;
        let leading_blanks = usize::from(weekday_of(first));

        let mut cells: Vec<Option<DayCell>> = vec![None; leading_blanks];
        let mut cursor = Some(first);
        for day_of_month in 1..=days {
            let Some(date) = cursor else { break };
            cells.push(Some(DayCell {
                date,
                day_of_month,
                in_window: self.window.contains(date),
                is_excluded: !self.policy.is_valid_day(date),
                entries: self.entries_on(date).to_vec(),
            }));
            cursor = date.next_day();
        }

        let week = usize::from(DAYS_PER_WEEK);
        let trailing = (week - cells.len() % week) % week;
        cells.extend(std::iter::repeat(None).take(trailing));

        Ok(MonthView { year, month, leading_blanks, cells })
    }
}

/// Builds [`CourseCalendar`] views from saved schedules
#[derive(Debug, Default, Clone, Copy)]
pub struct CourseCalendarProjector;

impl CourseCalendarProjector {
    /// Project every row of `schedules` onto the course calendar.
    ///
    /// Rows naming topics or modules the outline no longer lists are shown
    /// under their raw ids with no problem count.
    pub fn project<'a, I>(course: &Course, schedules: I) -> ScheduleResult<CourseCalendar>
    where
        I: IntoIterator<Item = &'a ModuleSchedule>,
    {
        let schedules: Vec<&ModuleSchedule> = schedules.into_iter().collect();
        let index = ScheduleIndex::build(schedules.iter().flat_map(|schedule| schedule.dates()));
        let policy = HolidayPolicy::from_window(&course.window)?;

        let mut entries: BTreeMap<DateKey, Vec<CalendarEntry>> = BTreeMap::new();
        for schedule in &schedules {
            let module = course.module(&schedule.module_id);
            for row in &schedule.rows {
                let Some(day_number) = index.day_number(row.date) else { continue };
                let on_day = entries.entry(row.date).or_default();
                if on_day.iter().any(|entry| {
                    entry.topic_id == row.topic_id && entry.module_id == schedule.module_id
                }) {
                    continue;
                }

                let topic = module.and_then(|m| m.topic(&row.topic_id));
                on_day.push(CalendarEntry {
                    topic_id: row.topic_id.clone(),
                    topic_name: topic.map_or_else(|| row.topic_id.to_string(), |t| t.name.clone()),
                    module_id: schedule.module_id.clone(),
                    module_name: module
                        .map_or_else(|| schedule.module_id.to_string(), |m| m.name.clone()),
                    day_number,
                    problem_count: topic.map_or(0, |t| t.problem_count),
                });
            }
        }

        debug!(
            course_id = %course.id,
            modules = schedules.len(),
            days = index.len(),
            "Projected course calendar"
        );
        Ok(CourseCalendar { window: course.window.clone(), policy, index, entries })
    }
}
