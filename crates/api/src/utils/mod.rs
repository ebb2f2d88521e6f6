//! Command helpers shared across the application layer

pub mod logging;
