//! Domain types and models

pub mod course;
pub mod date;
pub mod ids;
pub mod schedule;

pub use course::{Course, CourseOutline, CourseWindow, Module, Topic};
pub use date::DateKey;
pub use ids::{CourseId, ModuleId, TopicId};
pub use schedule::{ModuleSchedule, TopicSchedule};
