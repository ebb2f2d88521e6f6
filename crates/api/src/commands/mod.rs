//! Application commands
//!
//! Each command takes the [`AppContext`](crate::context::AppContext), runs
//! one use case and returns a serialisable view. Failures keep their
//! structured form so the caller can render them without parsing messages.

pub mod calendar;
pub mod course;
pub mod schedule;

use curricula_core::ScheduleError;
use curricula_domain::CurriculaError;
use serde::Serialize;
use thiserror::Error;

pub use calendar::*;
pub use course::*;
pub use schedule::*;

/// Error returned by every command
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(untagged)]
pub enum CommandError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Domain(#[from] CurriculaError),
}

/// Result type alias for commands
pub type CommandResult<T> = std::result::Result<T, CommandError>;
