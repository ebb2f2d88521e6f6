//! # Curricula Domain
//!
//! Business domain types and models for curriculum scheduling.
//!
//! This crate contains:
//! - Course, module and topic models plus their persisted schedules
//! - The calendar-date key used at every boundary (`DateKey`)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Curricula crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
