//! Error classification shared by every layer.
//!
//! Each crate owns its concrete error enums (`thiserror` in domain and core,
//! conversions in infra). What they share is a way to answer the questions a
//! caller asks before deciding what to do with a failure:
//!
//! - **`is_retryable()`**: can the same call succeed if attempted again?
//! - **`severity()`**: how loudly should this be reported?
//! - **`is_critical()`**: is data integrity at risk?
//! - **`retry_after()`**: suggested delay before retrying
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Unknown topic id, empty results |
//! | **Warning** | Partial success | Auto-assign ran out of days |
//! | **Error** | Failure requiring attention | Date collision, storage failure |
//! | **Critical** | System integrity at risk | Internal invariant violations |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use curricula_common::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum LoadError {
//!     Busy,
//!     Corrupt,
//! }
//!
//! impl ErrorClassification for LoadError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Busy => ErrorSeverity::Warning,
//!             Self::Corrupt => ErrorSeverity::Critical,
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         matches!(self, Self::Corrupt)
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         self.is_retryable().then(|| Duration::from_millis(250))
//!     }
//! }
//!
//! assert!(LoadError::Busy.is_retryable());
//! assert_eq!(LoadError::Corrupt.severity(), ErrorSeverity::Critical);
//! ```

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors by their characteristics.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient: a busy or locked database, a dropped
    /// connection to the document store.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and for choosing how the UI presents the message.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Unified severity level for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be surfaced but the operation partly succeeded
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
