//! Course calendar commands

use curricula_core::scheduling::{CalendarEntry, MonthView};
use curricula_domain::{CourseId, DateKey};
use serde::Serialize;

use super::CommandResult;
use crate::context::AppContext;
use crate::utils::logging::timed;

/// Topics scheduled on one course day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTopicsView {
    /// Course-wide day number.
    pub day_number: u32,
    /// `None` when the course has fewer scheduled days.
    pub date: Option<DateKey>,
    /// Topics scheduled on the day.
    pub entries: Vec<CalendarEntry>,
}

/// Month grid of a course with every module's saved topics.
pub async fn get_course_calendar_month(
    ctx: &AppContext,
    course_id: &CourseId,
    year: i32,
    month: u32,
) -> CommandResult<MonthView> {
    timed("calendar::get_course_calendar_month", async {
        let calendar = ctx.scheduling.course_calendar(course_id).await?;
        Ok(calendar.month(year, month)?)
    })
    .await
}

/// What the course covers on day `day_number`.
pub async fn get_topics_on_day(
    ctx: &AppContext,
    course_id: &CourseId,
    day_number: u32,
) -> CommandResult<DayTopicsView> {
    timed("calendar::get_topics_on_day", async {
        let calendar = ctx.scheduling.course_calendar(course_id).await?;
        Ok(DayTopicsView {
            day_number,
            date: calendar.index().date_for_day(day_number),
            entries: calendar.entries_on_day(day_number).to_vec(),
        })
    })
    .await
}
