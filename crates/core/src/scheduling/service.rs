//! Scheduling service - entry point for editor sessions and calendar views

use std::sync::Arc;

use curricula_domain::{Course, CourseId, ModuleId};
use tracing::debug;

use super::editor::ModuleScheduleEditor;
use super::error::{ScheduleError, ScheduleResult};
use super::ports::{CourseCatalog, ScheduleRepository};
use super::projector::{CourseCalendar, CourseCalendarProjector};

/// Curriculum scheduling service
pub struct SchedulingService {
    repository: Arc<dyn ScheduleRepository>,
    catalog: Arc<dyn CourseCatalog>,
}

impl SchedulingService {
    /// Create a new scheduling service
    pub fn new(repository: Arc<dyn ScheduleRepository>, catalog: Arc<dyn CourseCatalog>) -> Self {
        Self { repository, catalog }
    }

    /// Load window and outline of a course
    pub async fn load_course(&self, course_id: &CourseId) -> ScheduleResult<Course> {
        let (window, outline) = tokio::try_join!(
            self.catalog.get_course_window(course_id),
            self.catalog.get_course_outline(course_id)
        )
        .map_err(ScheduleError::storage)?;
        Ok(Course::from_parts(course_id.clone(), outline, window))
    }

    /// Start an editing session for one module
    pub async fn open_editor(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> ScheduleResult<ModuleScheduleEditor> {
        ModuleScheduleEditor::open(
            Arc::clone(&self.repository),
            self.catalog.as_ref(),
            course_id,
            module_id,
        )
        .await
    }

    /// Project every saved module schedule of a course onto its calendar
    pub async fn course_calendar(&self, course_id: &CourseId) -> ScheduleResult<CourseCalendar> {
        let (course, schedules) = tokio::try_join!(self.load_course(course_id), async {
            self.repository.load_course_schedules(course_id).await.map_err(ScheduleError::storage)
        })?;
        debug!(course_id = %course_id, modules = schedules.len(), "Loaded course schedules");
        CourseCalendarProjector::project(&course, &schedules)
    }
}
