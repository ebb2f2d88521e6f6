//! Curriculum date scheduling
//!
//! Pure allocation and validation over an in-memory candidate, with
//! persistence reached only through the [`ports`] traits.

pub mod allocation;
pub mod calendar;
pub mod candidate;
pub mod editor;
pub mod error;
pub mod index;
pub mod policy;
pub mod ports;
pub mod projector;
pub mod service;
pub mod validator;

pub use allocation::Allocator;
pub use calendar::{date_key, days_in_month, enumerate_range, is_valid_day, weekday_of, ToDateKey};
pub use candidate::{CandidateSchedule, TopicSlot};
pub use editor::{EditorState, ModuleScheduleEditor};
pub use error::{ScheduleError, ScheduleResult, TopicRef, WindowBounds};
pub use index::ScheduleIndex;
pub use policy::HolidayPolicy;
pub use ports::{CourseCatalog, ScheduleRepository};
pub use projector::{CalendarEntry, CourseCalendar, CourseCalendarProjector, DayCell, MonthView};
pub use service::SchedulingService;
pub use validator::validate;
