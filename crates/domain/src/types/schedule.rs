//! Persisted module schedules

use serde::{Deserialize, Serialize};

use super::date::DateKey;
use super::ids::{CourseId, ModuleId, TopicId};

/// One scheduled day for one topic. A multi-day topic owns several rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSchedule {
    /// Topic id.
    pub topic_id: TopicId,
    /// Calendar date.
    pub date: DateKey,
}

impl TopicSchedule {
    /// Row placing `topic_id` on `date`.
    pub fn new(topic_id: impl Into<TopicId>, date: DateKey) -> Self {
        Self { topic_id: topic_id.into(), date }
    }
}

/// The stored schedule of one module within one course.
///
/// Replaced wholesale on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSchedule {
    /// Course id.
    pub course_id: CourseId,
    /// Module id.
    pub module_id: ModuleId,
    /// One row per topic and day.
    pub rows: Vec<TopicSchedule>,
    /// Link to the module's end-of-module test.
    #[serde(default)]
    pub test_link: Option<String>,
}

impl ModuleSchedule {
    /// A schedule with no rows, used when a module is first opened.
    pub fn empty(course_id: CourseId, module_id: ModuleId) -> Self {
        Self { course_id, module_id, rows: Vec::new(), test_link: None }
    }

    /// Every date used by this module, in row order.
    pub fn dates(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.rows.iter().map(|row| row.date)
    }
}
