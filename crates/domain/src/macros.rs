//! Macro for implementing Display and FromStr for status enums
//!
//! Meeting and participant statuses travel as lowercase strings on the wire
//! and in the local store. This macro keeps the enum and its string form in
//! one place so the mapping cannot drift between `Display` and `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use schoolhub_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum RoomState {
//!     Open,
//!     Locked,
//! }
//!
//! impl_domain_status_conversions!(RoomState {
//!     Open => "open",
//!     Locked => "locked",
//! });
//!
//! assert_eq!(RoomState::Locked.to_string(), "locked");
//! assert_eq!("OPEN".parse::<RoomState>().unwrap(), RoomState::Open);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// Parsing is case-insensitive; output is always the given lowercase string.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
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
    enum Attendance {
        Invited,
        Present,
    }

    impl_domain_status_conversions!(Attendance {
        Invited => "invited",
        Present => "present",
    });

    #[test]
    fn display_uses_lowercase_form() {
        assert_eq!(Attendance::Invited.to_string(), "invited");
        assert_eq!(Attendance::Present.to_string(), "present");
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!(Attendance::from_str("PRESENT").unwrap(), Attendance::Present);
        assert_eq!(Attendance::from_str("Invited").unwrap(), Attendance::Invited);
    }

    #[test]
    fn unknown_value_names_the_enum() {
        let err = Attendance::from_str("absent").unwrap_err();
        assert_eq!(err, "Invalid Attendance: absent");
        assert!(Attendance::from_str("").is_err());
    }

    mod with_domain_result_alias {
        use std::str::FromStr;

        #[allow(unused_imports)]
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Seat {
            Free,
            Taken,
        }

        impl_domain_status_conversions!(Seat {
            Free => "free",
            Taken => "taken",
        });

        #[test]
        fn expands_next_to_the_domain_result_alias() {
            assert_eq!(Seat::from_str("taken"), Ok(Seat::Taken));
            assert_eq!(Seat::Free.to_string(), "free");
        }
    }
}
