//! Macro for implementing Display and FromStr for status enums
//!
//! This macro eliminates boilerplate for enum conversions by providing a
//! single implementation for both Display and FromStr traits. It handles
//! case-insensitive parsing and consistent string representation.
//!
//! # Example
//!
//! ```rust
//! use daybook_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SyncStatus {
//!     Idle,
//!     Streaming,
//! }
//!
//! impl_domain_status_conversions!(SyncStatus {
//!     Idle => "idle",
//!     Streaming => "streaming",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestMode {
        Month,
        Week,
        Day,
    }

    impl_domain_status_conversions!(TestMode {
        Month => "month",
        Week => "week",
        Day => "day",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestMode::Month.to_string(), "month");
        assert_eq!(TestMode::Week.to_string(), "week");
        assert_eq!(TestMode::Day.to_string(), "day");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestMode::from_str("MONTH").unwrap(), TestMode::Month);
        assert_eq!(TestMode::from_str("Week").unwrap(), TestMode::Week);
        assert_eq!(TestMode::from_str("dAy").unwrap(), TestMode::Day);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestMode::from_str("fortnight");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestMode: fortnight"));
    }
}
