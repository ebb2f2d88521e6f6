//! Common utilities shared across Curricula crates.
//!
//! Holds the error classification vocabulary every layer speaks, so retry
//! and reporting decisions do not depend on concrete error types.
//!
//! # Features
//!
//! - `serde`: serialize [`ErrorSeverity`] for transport to the UI

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;

pub use error::{ErrorClassification, ErrorSeverity};
