//! # Curricula Infrastructure
//!
//! Infrastructure implementations of core scheduling ports.
//!
//! This crate contains:
//! - SQLite persistence for course structure and module schedules
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `curricula-core`
//! - Contains all "impure" code (I/O, blocking database access)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use database::{DbManager, SqliteCourseCatalog, SqliteScheduleRepository};
pub use errors::InfraError;
pub use observability::init_tracing;
