use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wayfare_core::CoreError;

/// Lowercase, trim and fold `-`/space into `_` so "Exit", " exit " and "EXIT" all match.
fn normalise_key(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

/// Cabin classes that carry their own seat price rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CabinClass {
    #[default]
    Economy,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 3] = [CabinClass::Economy, CabinClass::Business, CabinClass::First];

    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

impl FromStr for CabinClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_key(s).as_str() {
            "economy" => Ok(CabinClass::Economy),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            _ => Err(CoreError::validation(format!("Unknown cabin class: {}", s))),
        }
    }
}

impl TryFrom<String> for CabinClass {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SeatCategory {
    Window,
    Aisle,
    Middle,
    Exit,
    Preferred,
}

impl SeatCategory {
    pub const ALL: [SeatCategory; 5] = [
        SeatCategory::Window,
        SeatCategory::Aisle,
        SeatCategory::Middle,
        SeatCategory::Exit,
        SeatCategory::Preferred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatCategory::Window => "window",
            SeatCategory::Aisle => "aisle",
            SeatCategory::Middle => "middle",
            SeatCategory::Exit => "exit",
            SeatCategory::Preferred => "preferred",
        }
    }
}

impl FromStr for SeatCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_key(s).as_str() {
            "window" => Ok(SeatCategory::Window),
            "aisle" => Ok(SeatCategory::Aisle),
            "middle" => Ok(SeatCategory::Middle),
            "exit" | "exit_row" => Ok(SeatCategory::Exit),
            "preferred" => Ok(SeatCategory::Preferred),
            _ => Err(CoreError::validation(format!("Unknown seat type: {}", s))),
        }
    }
}

impl TryFrom<String> for SeatCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InsuranceTier {
    Basic,
    Premium,
}

impl FromStr for InsuranceTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_key(s).as_str() {
            "basic" => Ok(InsuranceTier::Basic),
            "premium" => Ok(InsuranceTier::Premium),
            _ => Err(CoreError::validation(format!("Unknown insurance type: {}", s))),
        }
    }
}

impl TryFrom<String> for InsuranceTier {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for InsuranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceTier::Basic => f.write_str("basic"),
            InsuranceTier::Premium => f.write_str("premium"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Business".parse::<CabinClass>().unwrap(), CabinClass::Business);
        assert_eq!(" EXIT ".parse::<SeatCategory>().unwrap(), SeatCategory::Exit);
        assert_eq!("exit-row".parse::<SeatCategory>().unwrap(), SeatCategory::Exit);
        assert_eq!("Premium".parse::<InsuranceTier>().unwrap(), InsuranceTier::Premium);
    }

    #[test]
    fn test_unknown_keys_are_validation_errors() {
        let err = "bulkhead".parse::<SeatCategory>().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!("premium_economy".parse::<CabinClass>().is_err());
        assert!("gold".parse::<InsuranceTier>().is_err());
    }

    #[test]
    fn test_deserialize_goes_through_parser() {
        let cabin: CabinClass = serde_json::from_str("\"FIRST\"").unwrap();
        assert_eq!(cabin, CabinClass::First);
        assert!(serde_json::from_str::<SeatCategory>("\"bulkhead\"").is_err());
    }

    #[test]
    fn test_display_matches_serde_names() {
        for category in SeatCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
