use std::time::{Duration, Instant};

use curricula_core::ScheduleError;
use curricula_domain::CurriculaError;
use tracing::{info, warn};

use crate::commands::CommandError;

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"schedule::auto_assign_dates"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Stable error label when the command failed.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&'static str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Await `future` and log its duration and outcome under `command`.
pub async fn timed<T, F>(command: &'static str, future: F) -> Result<T, CommandError>
where
    F: std::future::Future<Output = Result<T, CommandError>>,
{
    let start = Instant::now();
    let result = future.await;
    log_command_execution(command, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

/// Convert a `CommandError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CommandError) -> &'static str {
    match error {
        CommandError::Domain(err) => domain_label(err),
        CommandError::Schedule(err) => schedule_label(err),
    }
}

const fn domain_label(error: &CurriculaError) -> &'static str {
    match error {
        CurriculaError::Database(_) => "database",
        CurriculaError::Config(_) => "config",
        CurriculaError::NotFound(_) => "not_found",
        CurriculaError::InvalidInput(_) => "invalid_input",
        CurriculaError::Internal(_) => "internal",
    }
}

const fn schedule_label(error: &ScheduleError) -> &'static str {
    match error {
        ScheduleError::InvalidRange { .. } => "invalid_range",
        ScheduleError::NoValidDatesInRange { .. } => "no_valid_dates_in_range",
        ScheduleError::IncompleteAssignment { .. } => "incomplete_assignment",
        ScheduleError::WindowViolation { .. } => "window_violation",
        ScheduleError::DateCollision { .. } => "date_collision",
        ScheduleError::Storage { .. } => "storage",
        ScheduleError::UnknownTopic { .. } => "unknown_topic",
        ScheduleError::UnknownModule { .. } => "unknown_module",
        ScheduleError::InvalidWeekday { .. } => "invalid_weekday",
        ScheduleError::InvalidMonth { .. } => "invalid_month",
        ScheduleError::NotEditable { .. } => "not_editable",
    }
}
