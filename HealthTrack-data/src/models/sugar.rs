use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blood sugar test type, one dataset per variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SugarVariant {
    /// Random (non-fasting) test
    #[default]
    Random,

    /// Fasting test
    Fasting,
}

impl SugarVariant {
    /// Every variant, in selector order
    pub const ALL: [SugarVariant; 2] = [SugarVariant::Random, SugarVariant::Fasting];

    /// Label used in the selector and the table
    pub fn label(&self) -> &'static str {
        match self {
            SugarVariant::Random => "Random",
            SugarVariant::Fasting => "Fasting",
        }
    }
}

impl fmt::Display for SugarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SugarVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Random" => Ok(SugarVariant::Random),
            "Fasting" => Ok(SugarVariant::Fasting),
            other => Err(format!("Unknown sugar test type: {}", other)),
        }
    }
}

/// One blood sugar measurement as listed in the readings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SugarReading {
    /// Display date, e.g. `01-Oct-2024`
    pub date: String,

    /// Test type label
    #[serde(rename = "TestType")]
    pub test_type: String,

    /// Measured value as entered (numeric text)
    pub value: String,
}

impl SugarReading {
    pub fn new(date: &str, variant: SugarVariant, value: &str) -> Self {
        Self {
            date: date.to_string(),
            test_type: variant.label().to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse() {
        assert_eq!("Random".parse::<SugarVariant>(), Ok(SugarVariant::Random));
        assert_eq!("Fasting".parse::<SugarVariant>(), Ok(SugarVariant::Fasting));
        assert!("fasting".parse::<SugarVariant>().is_err());
        assert!("select".parse::<SugarVariant>().is_err());
    }

    #[test]
    fn test_reading_uses_variant_label() {
        let reading = SugarReading::new("01-Oct-2024", SugarVariant::Fasting, "70");
        assert_eq!(reading.test_type, "Fasting");
        assert_eq!(reading.value, "70");
    }
}
