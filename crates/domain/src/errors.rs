//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Curricula
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CurriculaError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Curricula operations
pub type Result<T> = std::result::Result<T, CurriculaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_tagged_message() {
        let err = CurriculaError::NotFound("course c-1".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"NotFound","message":"course c-1"}"#);

        let back: CurriculaError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn display_includes_category() {
        let err = CurriculaError::Database("database is locked".into());
        assert_eq!(err.to_string(), "Database error: database is locked");
    }
}
