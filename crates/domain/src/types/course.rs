//! Course structure: window, modules and topics

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::date::DateKey;
use super::ids::{CourseId, ModuleId, TopicId};
use crate::errors::{CurriculaError, Result};

/// Inclusive date window of a course plus the days automatic allocation skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseWindow {
    /// First schedulable day.
    pub start_date: DateKey,
    /// Last schedulable day.
    pub end_date: DateKey,
    /// Weekday numbers, 0 = Sunday .. 6 = Saturday.
    pub excluded_weekdays: BTreeSet<u8>,
    /// Additional days allocation skips.
    pub custom_holidays: BTreeSet<DateKey>,
}

impl CourseWindow {
    /// Create a window, rejecting `start_date > end_date`.
    pub fn new(
        start_date: DateKey,
        end_date: DateKey,
        excluded_weekdays: impl IntoIterator<Item = u8>,
        custom_holidays: impl IntoIterator<Item = DateKey>,
    ) -> Result<Self> {
        if start_date > end_date {
            return Err(CurriculaError::InvalidInput(format!(
                "course window starts {start_date} after it ends {end_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            excluded_weekdays: excluded_weekdays.into_iter().collect(),
            custom_holidays: custom_holidays.into_iter().collect(),
        })
    }

    /// Whether `date` lies inside the inclusive window.
    pub fn contains(&self, date: DateKey) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A curriculum unit that receives calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable topic id.
    pub id: TopicId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of practice problems attached by the problem library.
    #[serde(default)]
    pub problem_count: u32,
}

impl Topic {
    /// Topic with no description or problems.
    pub fn new(id: impl Into<TopicId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), description: None, problem_count: 0 }
    }

    /// Set the attached problem count.
    pub fn with_problem_count(mut self, problem_count: u32) -> Self {
        self.problem_count = problem_count;
        self
    }
}

/// An ordered group of topics. Topic order drives sequential auto-assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Stable module id.
    pub id: ModuleId,
    /// Display name.
    pub name: String,
    /// Topics in declared order.
    pub topics: Vec<Topic>,
}

impl Module {
    /// Module with topics in the given order.
    pub fn new(id: impl Into<ModuleId>, name: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self { id: id.into(), name: name.into(), topics }
    }

    /// Look up a topic of this module.
    pub fn topic(&self, topic_id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| &topic.id == topic_id)
    }

    /// Position of a topic in declared order.
    pub fn position_of(&self, topic_id: &TopicId) -> Option<usize> {
        self.topics.iter().position(|topic| &topic.id == topic_id)
    }
}

/// Title and ordered modules of a course, as published by course authoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
    /// Course title.
    pub title: String,
    /// Modules in display order.
    pub modules: Vec<Module>,
}

/// A course with its scheduling window and module outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Stable course id.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Scheduling window.
    pub window: CourseWindow,
    /// Modules in display order.
    pub modules: Vec<Module>,
}

impl Course {
    /// Join an outline with its window.
    pub fn from_parts(id: CourseId, outline: CourseOutline, window: CourseWindow) -> Self {
        Self { id, title: outline.title, window, modules: outline.modules }
    }

    /// Look up a module of this course.
    pub fn module(&self, module_id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| &module.id == module_id)
    }

    /// Locate a topic anywhere in the course together with its module.
    pub fn find_topic(&self, topic_id: &TopicId) -> Option<(&Module, &Topic)> {
        self.modules
            .iter()
            .find_map(|module| module.topic(topic_id).map(|topic| (module, topic)))
    }
}
