//! Observability infrastructure
//!
//! Structured logging through `tracing`, installed once per process.

pub mod logging;

pub use logging::init_tracing;
