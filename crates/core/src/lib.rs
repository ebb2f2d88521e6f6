//! # Curricula Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Date utilities and the per-course holiday policy
//! - Allocation strategies, save-time validation and the editing session
//! - Course-wide day numbering and the calendar projection
//! - Port interfaces (traits) for course structure and schedule storage
//!
//! ## Architecture Principles
//! - Only depends on `curricula-common` and `curricula-domain`
//! - No database or platform code
//! - All external dependencies via traits

pub mod scheduling;

pub use scheduling::ports::{CourseCatalog, ScheduleRepository};
pub use scheduling::{
    CourseCalendar, CourseCalendarProjector, EditorState, HolidayPolicy, ModuleScheduleEditor,
    ScheduleError, ScheduleIndex, ScheduleResult, SchedulingService,
};
