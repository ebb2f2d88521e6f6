//! Port interfaces for curriculum scheduling
//!
//! These traits define the boundaries between the scheduling engine and the
//! stores that hold course structure and persisted schedules.

use async_trait::async_trait;
use curricula_domain::{
    CourseId, CourseOutline, CourseWindow, ModuleId, ModuleSchedule, Result, TopicSchedule,
};

/// Trait for persisting per-module schedules
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Load the saved schedule of one module, if any was ever saved
    async fn load_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> Result<Option<ModuleSchedule>>;

    /// Replace the saved schedule of one module as a single unit
    async fn save_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
        rows: &[TopicSchedule],
        test_link: Option<&str>,
    ) -> Result<()>;

    /// Load the saved schedules of every module in a course
    async fn load_course_schedules(&self, course_id: &CourseId) -> Result<Vec<ModuleSchedule>>;
}

/// Trait for reading course structure
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Get the date window and holiday configuration of a course
    async fn get_course_window(&self, course_id: &CourseId) -> Result<CourseWindow>;

    /// Get the ordered modules and topics of a course
    async fn get_course_outline(&self, course_id: &CourseId) -> Result<CourseOutline>;
}
