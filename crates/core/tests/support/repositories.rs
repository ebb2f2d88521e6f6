//! Mock port implementations for testing
//!
//! In-memory stand-ins for the scheduling ports. Clones share state, so a
//! test can keep a handle while the editor owns another.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use curricula_core::scheduling::ports::{CourseCatalog, ScheduleRepository};
use curricula_domain::{
    Course, CourseId, CourseOutline, CourseWindow, CurriculaError, ModuleId, ModuleSchedule,
    Result as DomainResult, TopicSchedule,
};

/// In-memory mock for `ScheduleRepository`.
///
/// Saves can be switched to fail with a database error to exercise the
/// editor's recovery path.
#[derive(Default, Clone)]
pub struct MockScheduleRepository {
    schedules: Arc<Mutex<BTreeMap<(CourseId, ModuleId), ModuleSchedule>>>,
    fail_saves: Arc<AtomicBool>,
    save_calls: Arc<AtomicUsize>,
}

impl MockScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a saved schedule.
    pub fn with_schedule(self, schedule: ModuleSchedule) -> Self {
        self.insert(schedule);
        self
    }

    pub fn insert(&self, schedule: ModuleSchedule) {
        let key = (schedule.course_id.clone(), schedule.module_id.clone());
        self.schedules.lock().unwrap().insert(key, schedule);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of save calls that reached the repository, failed ones included.
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn saved(&self, course_id: &CourseId, module_id: &ModuleId) -> Option<ModuleSchedule> {
        self.schedules.lock().unwrap().get(&(course_id.clone(), module_id.clone())).cloned()
    }
}

#[async_trait]
impl ScheduleRepository for MockScheduleRepository {
    async fn load_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> DomainResult<Option<ModuleSchedule>> {
        Ok(self.saved(course_id, module_id))
    }

    async fn save_module_schedule(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
        rows: &[TopicSchedule],
        test_link: Option<&str>,
    ) -> DomainResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CurriculaError::Database("database is locked".to_string()));
        }

        let mut schedule = ModuleSchedule::empty(course_id.clone(), module_id.clone());
        schedule.rows = rows.to_vec();
        schedule.test_link = test_link.map(str::to_string);
        self.insert(schedule);
        Ok(())
    }

    async fn load_course_schedules(&self, course_id: &CourseId) -> DomainResult<Vec<ModuleSchedule>> {
        Ok(self
            .schedules
            .lock()
            .unwrap()
            .values()
            .filter(|schedule| &schedule.course_id == course_id)
            .cloned()
            .collect())
    }
}

/// In-memory mock for `CourseCatalog`.
#[derive(Default, Clone)]
pub struct MockCourseCatalog {
    courses: Arc<Mutex<HashMap<CourseId, Course>>>,
}

impl MockCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(self, course: Course) -> Self {
        self.courses.lock().unwrap().insert(course.id.clone(), course);
        self
    }

    fn course(&self, course_id: &CourseId) -> DomainResult<Course> {
        self.courses
            .lock()
            .unwrap()
            .get(course_id)
            .cloned()
            .ok_or_else(|| CurriculaError::NotFound(format!("course {course_id}")))
    }
}

#[async_trait]
impl CourseCatalog for MockCourseCatalog {
    async fn get_course_window(&self, course_id: &CourseId) -> DomainResult<CourseWindow> {
        Ok(self.course(course_id)?.window)
    }

    async fn get_course_outline(&self, course_id: &CourseId) -> DomainResult<CourseOutline> {
        let course = self.course(course_id)?;
        Ok(CourseOutline { title: course.title, modules: course.modules })
    }
}
