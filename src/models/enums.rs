use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a known enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Biological sex category used to pick a reference range.
    SexCategory {
        Male => "male",
        Female => "female",
        All => "all",
    }
);

str_enum!(
    /// Position of a value relative to its reference range.
    Status {
        Low => "low",
        Normal => "normal",
        High => "high",
        Unknown => "unknown",
    }
);

str_enum!(
    /// How far a value sits outside its range.
    Risk {
        None => "none",
        Low => "low",
        Moderate => "moderate",
        High => "high",
        Unknown => "unknown",
    }
);

str_enum!(
    /// How soon follow-up is advised. Independent of [`Risk`].
    Urgency {
        None => "none",
        Monitor => "monitor",
        Urgent => "urgent",
    }
);

impl Default for SexCategory {
    fn default() -> Self {
        Self::All
    }
}
