use std::fmt;
use std::str::FromStr;

pub use healthtrack_data::models::sugar::{SugarReading, SugarVariant};

/// Legend shown on the sugar chart
pub const CHART_LEGEND: &str = "Blood Sugar";

/// Column headers of the readings table
pub const TABLE_HEADERS: [&str; 3] = ["Date", "TestType", "Sugar (mm/Hg)"];

/// Shown in place of the chart and table when there is nothing to list
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Entry of the test-type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOption {
    /// The inert "Select" entry
    Placeholder,

    /// A concrete test type
    Variant(SugarVariant),
}

impl SelectorOption {
    /// Selector entries in display order
    pub const ALL: [SelectorOption; 3] = [
        SelectorOption::Placeholder,
        SelectorOption::Variant(SugarVariant::Random),
        SelectorOption::Variant(SugarVariant::Fasting),
    ];

    /// Value submitted by the selector widget
    pub fn value(&self) -> &'static str {
        match self {
            SelectorOption::Placeholder => "select",
            SelectorOption::Variant(variant) => variant.label(),
        }
    }

    /// Label shown for the entry
    pub fn label(&self) -> &'static str {
        match self {
            SelectorOption::Placeholder => "Select",
            SelectorOption::Variant(variant) => variant.label(),
        }
    }
}

impl fmt::Display for SelectorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SelectorOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "select" {
            return Ok(SelectorOption::Placeholder);
        }
        s.parse::<SugarVariant>().map(SelectorOption::Variant)
    }
}

/// Line chart input: x labels and y values in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub legend: &'static str,
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub test_type: String,
    pub value: String,

    /// Odd rows get the alternate background
    pub alternate: bool,
}

/// Header plus rows of the readings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SugarTable {
    pub headers: [&'static str; 3],
    pub rows: Vec<TableRow>,
}

/// What the sugar screen body shows
#[derive(Debug, Clone, PartialEq)]
pub enum SugarDisplay {
    Readings { chart: ChartSeries, table: SugarTable },
    Empty { message: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_values_round_trip() {
        for option in SelectorOption::ALL {
            assert_eq!(option.value().parse::<SelectorOption>(), Ok(option));
        }
        assert_eq!(SelectorOption::Placeholder.label(), "Select");
        assert!("Select".parse::<SelectorOption>().is_err());
    }
}
