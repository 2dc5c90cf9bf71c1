//! Macro for implementing Display and FromStr for wire-value enums
//!
//! ADT encodes many enumerations as fixed strings on the wire (session
//! types, check versions, program types). This macro gives each enum a
//! `Display` that emits the wire string and a case-insensitive `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use adtkit_domain::impl_wire_value_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Severity {
//!     Error,
//!     Warning,
//! }
//!
//! impl_wire_value_conversions!(Severity {
//!     Error => "E",
//!     Warning => "W",
//! });
//!
//! assert_eq!(Severity::Error.to_string(), "E");
//! assert_eq!("w".parse::<Severity>().unwrap(), Severity::Warning);
//! ```

/// Implements Display and FromStr traits for wire-value enums
///
/// This macro generates:
/// - Display trait: writes the exact wire string
/// - FromStr trait: parses ASCII case-insensitively
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
#[macro_export]
macro_rules! impl_wire_value_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
