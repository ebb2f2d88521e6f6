//! Shared test helpers for `curricula-core` integration tests.
//!
//! In-memory ports plus a small course fixture, so scenario tests can focus on
//! behaviour instead of setup.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
