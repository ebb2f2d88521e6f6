//! # Curricula App
//!
//! Application layer - commands, CLI and main entry point.
//!
//! This crate contains:
//! - Commands (one use case each, returning serialisable views)
//! - Application context (dependency injection)
//! - The `curricula` command-line interface
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
