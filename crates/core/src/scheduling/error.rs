//! Scheduling error taxonomy

use curricula_common::{ErrorClassification, ErrorSeverity};
use curricula_domain::{CurriculaError, DateKey, ModuleId, TopicId, TopicSchedule};
use serde::Serialize;
use thiserror::Error;

use super::editor::EditorState;

/// Result type alias for scheduling operations
pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;

/// A topic named in an error, with enough context to render a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRef {
    /// Topic id.
    pub topic_id: TopicId,
    /// Display name, or the raw id if the outline no longer lists it.
    pub topic_name: String,
    /// Module id.
    pub module_id: ModuleId,
    /// Display name, or the raw id if the outline no longer lists it.
    pub module_name: String,
}

/// Inclusive course window reported alongside window violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowBounds {
    /// First day of the window.
    pub start_date: DateKey,
    /// Last day of the window.
    pub end_date: DateKey,
}

/// Errors raised by allocation, validation and editor sessions.
///
/// Every variant carries structured detail so callers never parse messages.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScheduleError {
    /// Range end precedes its start.
    #[error("range start {start} is after range end {end}")]
    InvalidRange { start: DateKey, end: DateKey },

    /// Every day in the range is excluded.
    #[error("no schedulable day between {start} and {end} for topic {topic_id}")]
    #[serde(rename_all = "camelCase")]
    NoValidDatesInRange { topic_id: TopicId, start: DateKey, end: DateKey },

    /// Auto-assign reached the course end first. Topics in `assigned` keep
    /// their new dates; topics in `unplaced` were not touched.
    #[error(
        "ran past the course end {course_end}: {} topic(s) placed, {} left unscheduled",
        .assigned.len(),
        .unplaced.len()
    )]
    #[serde(rename_all = "camelCase")]
    IncompleteAssignment {
        assigned: Vec<TopicSchedule>,
        unplaced: Vec<TopicId>,
        course_end: DateKey,
    },

    /// A saved date lies outside the course window.
    #[error(
        "topic '{}' is scheduled on {date}, outside the course window {} to {}",
        .topic.topic_name,
        .window.start_date,
        .window.end_date
    )]
    WindowViolation { topic: TopicRef, date: DateKey, window: WindowBounds },

    /// Two different topics share a date.
    #[error(
        "topics '{}' and '{}' are both scheduled on {date}",
        .first.topic_name,
        .second.topic_name
    )]
    DateCollision { date: DateKey, first: TopicRef, second: TopicRef },

    /// A port failed; `retryable` marks transient failures.
    #[error("storage error: {message}")]
    Storage { message: String, retryable: bool },

    /// Topic is not in the module.
    #[error("topic {topic_id} is not part of module {module_id}")]
    #[serde(rename_all = "camelCase")]
    UnknownTopic { topic_id: TopicId, module_id: ModuleId },

    /// Module is not in the course.
    #[error("module {module_id} is not part of the course")]
    #[serde(rename_all = "camelCase")]
    UnknownModule { module_id: ModuleId },

    /// Weekday number outside `0..7`.
    #[error("weekday {weekday} is outside 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday { weekday: u8 },

    /// Month outside `1..=12` or an unrepresentable year.
    #[error("{year}-{month} is not a calendar month")]
    InvalidMonth { year: i32, month: u32 },

    /// The session is not in an editable state.
    #[error("editing session is {state}; changes are not accepted")]
    NotEditable { state: EditorState },
}

impl ScheduleError {
    /// Wrap a collaborator failure. Database failures are worth retrying;
    /// missing or malformed records are not.
    pub fn storage(err: CurriculaError) -> Self {
        let retryable = matches!(err, CurriculaError::Database(_));
        Self::Storage { message: err.to_string(), retryable }
    }

    /// Partial outcomes leave some changes applied.
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::IncompleteAssignment { .. })
    }
}

impl ErrorClassification for ScheduleError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { retryable: true, .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IncompleteAssignment { .. } => ErrorSeverity::Warning,
            Self::UnknownTopic { .. } | Self::UnknownModule { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn topic(id: &str, name: &str) -> TopicRef {
        TopicRef {
            topic_id: TopicId::new(id),
            topic_name: name.into(),
            module_id: ModuleId::new("m1"),
            module_name: "Basics".into(),
        }
    }

    #[test]
    fn collision_message_names_both_topics() {
        let err = ScheduleError::DateCollision {
            date: key("2025-01-20"),
            first: topic("t1", "Arrays"),
            second: topic("t2", "Strings"),
        };
        assert_eq!(
            err.to_string(),
            "topics 'Arrays' and 'Strings' are both scheduled on 2025-01-20"
        );
    }

    #[test]
    fn window_violation_message_includes_bounds() {
        let err = ScheduleError::WindowViolation {
            topic: topic("t1", "Arrays"),
            date: key("2025-02-03"),
            window: WindowBounds { start_date: key("2025-01-01"), end_date: key("2025-01-31") },
        };
        assert_eq!(
            err.to_string(),
            "topic 'Arrays' is scheduled on 2025-02-03, outside the course window 2025-01-01 to 2025-01-31"
        );
    }

    #[test]
    fn storage_retryability_follows_the_cause() {
        let busy = ScheduleError::storage(CurriculaError::Database("database is busy".into()));
        let missing = ScheduleError::storage(CurriculaError::NotFound("course c9".into()));

        assert!(busy.is_retryable());
        assert!(!missing.is_retryable());
        assert_eq!(busy.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn incomplete_assignment_is_a_partial_warning() {
        let err = ScheduleError::IncompleteAssignment {
            assigned: vec![TopicSchedule::new("t3", key("2025-01-30"))],
            unplaced: vec![TopicId::new("t5")],
            course_end: key("2025-01-31"),
        };
        assert!(err.is_partial());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "ran past the course end 2025-01-31: 1 topic(s) placed, 1 left unscheduled"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = ScheduleError::InvalidRange { start: key("2025-01-10"), end: key("2025-01-02") };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "invalidRange");
        assert_eq!(json["start"], "2025-01-10");
    }
}
