//! Database implementations

pub mod course_catalog;
pub mod manager;
pub mod schedule_repository;

pub use course_catalog::SqliteCourseCatalog;
pub use manager::{DbManager, SqliteConnection, SqlitePool};
pub use schedule_repository::SqliteScheduleRepository;
