//! Course structure commands

use curricula_domain::constants::DAYS_PER_WEEK;
use curricula_domain::{Course, CourseId, CourseWindow, CurriculaError, DateKey};
use serde::Serialize;
use tracing::info;

use super::CommandResult;
use crate::context::AppContext;
use crate::utils::logging::timed;

/// Shape of a stored course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Course id.
    pub course_id: CourseId,
    /// Course title.
    pub title: String,
    /// First day of the window.
    pub start_date: DateKey,
    /// Last day of the window.
    pub end_date: DateKey,
    /// Number of modules.
    pub modules: usize,
    /// Number of topics across all modules.
    pub topics: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.id.clone(),
            title: course.title.clone(),
            start_date: course.window.start_date,
            end_date: course.window.end_date,
            modules: course.modules.len(),
            topics: course.modules.iter().map(|module| module.topics.len()).sum(),
        }
    }
}

/// Store a course outline and window, replacing any previous version.
///
/// Saved module schedules are left untouched.
pub async fn import_course(ctx: &AppContext, course: Course) -> CommandResult<CourseSummary> {
    timed("course::import_course", async {
        let store = ctx.course_store.as_ref().ok_or_else(|| {
            CurriculaError::Config("course import needs a database-backed context".to_string())
        })?;

        // Deserialised windows skip the constructor's checks.
        let window = &course.window;
        CourseWindow::new(
            window.start_date,
            window.end_date,
            window.excluded_weekdays.iter().copied(),
            window.custom_holidays.iter().copied(),
        )?;
        if let Some(weekday) = window.excluded_weekdays.iter().find(|day| **day >= DAYS_PER_WEEK) {
            return Err(CurriculaError::InvalidInput(format!(
                "excluded weekday {weekday} is outside 0 (Sunday) to 6 (Saturday)"
            ))
            .into());
        }

        store.save_course(&course).await?;
        info!(course_id = %course.id, modules = course.modules.len(), "Imported course");
        Ok(CourseSummary::from(&course))
    })
    .await
}

/// Summary of a stored course.
pub async fn get_course(ctx: &AppContext, course_id: &CourseId) -> CommandResult<CourseSummary> {
    timed("course::get_course", async {
        let course = ctx.scheduling.load_course(course_id).await?;
        Ok(CourseSummary::from(&course))
    })
    .await
}
