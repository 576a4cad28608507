//! Reset cadence
//!
//! The four supported reset frequencies. Cadence values are persisted as
//! lowercase text; anything outside the four literals is rejected at
//! configuration-write time, and rows that nevertheless carry an unknown
//! value are treated as never due by the sweep.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// The literal cadence values accepted on configuration writes.
pub const VALID_CADENCES: &[&str] = &["daily", "weekly", "monthly", "yearly"];

/// How often a dealership's report data is wiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Cadence {
    /// The persisted text form of this cadence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized cadence string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cadence '{0}'; expected one of daily, weekly, monthly, yearly")]
pub struct ParseCadenceError(pub String);

impl FromStr for Cadence {
    type Err = ParseCadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            "yearly" => Ok(Cadence::Yearly),
            other => Err(ParseCadenceError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_valid_cadences() {
        for value in VALID_CADENCES {
            let cadence: Cadence = value.parse().expect("valid cadence parses");
            assert_eq!(cadence.as_str(), *value);
        }
    }

    #[test]
    fn rejects_unknown_cadence() {
        let err = "hourly".parse::<Cadence>().unwrap_err();
        assert_eq!(err, ParseCadenceError("hourly".to_string()));
    }

    #[test]
    fn rejects_case_variants() {
        assert!("Daily".parse::<Cadence>().is_err());
        assert!("WEEKLY".parse::<Cadence>().is_err());
    }

    #[test]
    fn serde_round_trip_is_lowercase() {
        let json = serde_json::to_string(&Cadence::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");

        let parsed: Cadence = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(parsed, Cadence::Yearly);
    }
}
