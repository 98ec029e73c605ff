//! Macro for wire-level enum conversions
//!
//! The backend speaks lowercase strings (`"scheduled"`, `"recurring"`,
//! `"weekly"`). This macro generates `as_str`, `ALL`, `Display` and a
//! case-insensitive `FromStr` from one variant table, so CLI parsing and
//! display stay in step with the serde names.
//!
//! # Example
//!
//! ```rust
//! use agenda_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Sms,
//!     Whatsapp,
//! }
//!
//! impl_wire_enum_conversions!(Channel {
//!     Sms => "sms",
//!     Whatsapp => "whatsapp",
//! });
//!
//! assert_eq!(Channel::Whatsapp.as_str(), "whatsapp");
//! assert_eq!("SMS".parse::<Channel>(), Ok(Channel::Sms));
//! assert_eq!(Channel::ALL.len(), 2);
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum
///
/// Parsing is case-insensitive and surrounding whitespace is ignored. The
/// error lists the accepted values so it can be shown to a user directly.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Wire representation
            pub const fn as_str(&self) -> &'static str {
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

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    other => Err(format!(
                        "Invalid {} '{}': expected one of {}",
                        stringify!($enum_name),
                        other,
                        [$($str),+].join(", ")
                    )),
                }
            }
        }
    };
}
