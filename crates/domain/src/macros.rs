//! Macro for implementing Display and FromStr for status enums
//!
//! Status enums cross the rendering boundary as lowercase strings. The macro
//! keeps both directions of that conversion in one mapping table.
//!
//! # Example
//!
//! ```rust
//! use curricula_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SessionPhase {
//!     Open,
//!     Closed,
//! }
//!
//! impl_domain_status_conversions!(SessionPhase {
//!     Open => "open",
//!     Closed => "closed",
//! });
//!
//! assert_eq!(SessionPhase::Open.to_string(), "open");
//! assert_eq!("CLOSED".parse::<SessionPhase>(), Ok(SessionPhase::Closed));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// Parsing is case-insensitive; display always uses the mapped string.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
