//! Macro for implementing string conversions for closed enums
//!
//! Issue status, priority and report enums all travel as display strings on
//! the wire ("In Progress", "High", "excel"). This macro generates `Display`,
//! `FromStr`, `Serialize` and `Deserialize` from one table so the four stay in
//! sync.
//!
//! # Example
//!
//! ```rust
//! use ticketboard_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Severity {
//!     Minor,
//!     Major,
//! }
//!
//! impl_domain_status_conversions!(Severity {
//!     Minor => "Minor" | "low",
//!     Major => "Major" | "high",
//! });
//!
//! assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::Major));
//! assert_eq!(Severity::Minor.to_string(), "Minor");
//! ```

/// Implements Display, FromStr, Serialize and Deserialize for string enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $display | $alias...` - The canonical string written on
///   output, followed by any extra spellings accepted on input
///
/// Parsing trims surrounding whitespace and compares ASCII case-insensitively
/// against the canonical string and every alias.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $display:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($display),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let candidate = s.trim();
                $(
                    if candidate.eq_ignore_ascii_case($display)
                        $(|| candidate.eq_ignore_ascii_case($alias))*
                    {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Open,
        Waiting,
        Done,
    }

    impl_domain_status_conversions!(TestStatus {
        Open => "Open",
        Waiting => "On Hold" | "on_hold" | "待處理",
        Done => "Done",
    });

    #[test]
    fn test_display() {
        assert_eq!(TestStatus::Open.to_string(), "Open");
        assert_eq!(TestStatus::Waiting.to_string(), "On Hold");
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(TestStatus::from_str("open").unwrap(), TestStatus::Open);
        assert_eq!(TestStatus::from_str("ON HOLD").unwrap(), TestStatus::Waiting);
        assert_eq!(TestStatus::from_str("  done ").unwrap(), TestStatus::Done);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(TestStatus::from_str("on_hold").unwrap(), TestStatus::Waiting);
        assert_eq!(TestStatus::from_str("待處理").unwrap(), TestStatus::Waiting);
    }

    #[test]
    fn test_invalid_value() {
        let err = TestStatus::from_str("archived").unwrap_err();
        assert!(err.contains("TestStatus"));
        assert!(err.contains("archived"));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&TestStatus::Waiting).unwrap();
        assert_eq!(json, "\"On Hold\"");
        let parsed: TestStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(parsed, TestStatus::Waiting);
    }

    mod with_crate_result_alias {
        #[allow(unused_imports)]
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Channel {
            Phone,
            Email,
        }

        impl_domain_status_conversions!(Channel {
            Phone => "Phone" | "電話",
            Email => "Email",
        });

        #[test]
        fn expands_next_to_one_argument_result() {
            assert_eq!("電話".parse::<Channel>(), Ok(Channel::Phone));
            let parsed: Channel = serde_json::from_str("\"email\"").unwrap();
            assert_eq!(parsed, Channel::Email);
            assert_eq!(serde_json::to_string(&Channel::Phone).unwrap(), "\"Phone\"");
        }
    }
}
