use serde::{Deserialize, Serialize};

use crate::db::StoreError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

        impl std::str::FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(StoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "M",
    Female => "F",
});

/// Ordered self-medication risk scale. `Ord` follows declaration order,
/// so `max()` across triggered rules is the aggregation primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No risk signal for this profile.
    Safe,
    /// Usable with precautions.
    Caution,
    /// Self-medication discouraged, professional advice needed.
    Avoid,
    /// Absolute contraindication.
    Contraindicated,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Caution => "CAUTION",
            Self::Avoid => "AVOID",
            Self::Contraindicated => "CONTRAINDICATED",
        }
    }

    /// The ordinal stored in the rule table (1..=4).
    pub fn ordinal(&self) -> i64 {
        match self {
            Self::Safe => 1,
            Self::Caution => 2,
            Self::Avoid => 3,
            Self::Contraindicated => 4,
        }
    }

    /// Decode the stored ordinal. Anything outside 1..=4 is a data error,
    /// surfaced as such rather than silently mapped to a level.
    pub fn from_ordinal(value: i64) -> Result<Self, StoreError> {
        match value {
            1 => Ok(Self::Safe),
            2 => Ok(Self::Caution),
            3 => Ok(Self::Avoid),
            4 => Ok(Self::Contraindicated),
            other => Err(StoreError::InvalidEnum {
                field: "risk_level".into(),
                value: other.to_string(),
            }),
        }
    }
}
