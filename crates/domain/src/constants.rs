//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Format of a calendar-date key (`YYYY-MM-DD`).
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Byte length of a formatted date key.
pub const DATE_KEY_LEN: usize = 10;

/// Weekdays skipped by automatic allocation when a course records none
/// (0 = Sunday).
pub const DEFAULT_EXCLUDED_WEEKDAYS: [u8; 1] = [0];

/// Number of days in a week; weekday numbers run `0..DAYS_PER_WEEK`.
pub const DAYS_PER_WEEK: u8 = 7;

// Database defaults
/// Database file used when none is configured.
pub const DEFAULT_DB_PATH: &str = "curricula.db";
/// Connection pool size used when none is configured.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

// Logging defaults
/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";
