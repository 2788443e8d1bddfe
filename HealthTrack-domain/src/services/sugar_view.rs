//! Controller of the blood sugar readings screen

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::entities::sugar::{
    ChartSeries, SelectorOption, SugarDisplay, SugarReading, SugarTable, SugarVariant, TableRow,
    CHART_LEGEND, NO_DATA_MESSAGE, TABLE_HEADERS,
};
use crate::navigation::{Navigator, Route};
use healthtrack_data::repository::SugarReadingSource;

/// Sugar view errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SugarViewError {
    /// A stored value cannot be plotted
    #[error("Reading on {date} has a non-numeric value: {value}")]
    InvalidValue { date: String, value: String },
}

/// Blood sugar readings screen
pub struct SugarView {
    source: Arc<dyn SugarReadingSource + Send + Sync>,
    navigator: Arc<dyn Navigator>,
    selected: SelectorOption,
    active: SugarVariant,
    readings: Vec<SugarReading>,
    message: Option<String>,
}

impl SugarView {
    /// Mount the screen showing the random test readings
    pub fn mount(
        source: Arc<dyn SugarReadingSource + Send + Sync>,
        navigator: Arc<dyn Navigator>,
        message: Option<String>,
    ) -> Self {
        let active = SugarVariant::default();
        let readings = source.readings(active);

        Self {
            source,
            navigator,
            selected: SelectorOption::Variant(active),
            active,
            readings,
            message: message.filter(|m| !m.is_empty()),
        }
    }

    /// Apply a selector choice; the placeholder keeps the current readings
    pub fn select(&mut self, option: SelectorOption) {
        self.selected = option;
        if let SelectorOption::Variant(variant) = option {
            self.active = variant;
            self.readings = self.source.readings(variant);
            debug!(%variant, count = self.readings.len(), "Sugar readings replaced");
        }
    }

    /// Option currently shown in the selector
    pub fn selected(&self) -> SelectorOption {
        self.selected
    }

    /// Test type whose readings are displayed
    pub fn active_variant(&self) -> SugarVariant {
        self.active
    }

    pub fn readings(&self) -> &[SugarReading] {
        &self.readings
    }

    /// Chart series in insertion order
    pub fn chart(&self) -> Result<ChartSeries, SugarViewError> {
        let values = self
            .readings
            .iter()
            .map(|reading| {
                reading.value.trim().parse::<f64>().map_err(|_| SugarViewError::InvalidValue {
                    date: reading.date.clone(),
                    value: reading.value.clone(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(ChartSeries {
            labels: self.readings.iter().map(|r| r.date.clone()).collect(),
            values,
            legend: CHART_LEGEND,
        })
    }

    /// Table rows with alternating row flags
    pub fn table(&self) -> SugarTable {
        let rows = self
            .readings
            .iter()
            .enumerate()
            .map(|(index, reading)| TableRow {
                date: reading.date.clone(),
                test_type: reading.test_type.clone(),
                value: reading.value.clone(),
                alternate: index % 2 == 1,
            })
            .collect();

        SugarTable {
            headers: TABLE_HEADERS,
            rows,
        }
    }

    /// Body of the screen: chart and table, or the empty notice
    pub fn display(&self) -> Result<SugarDisplay, SugarViewError> {
        if self.readings.is_empty() {
            return Ok(SugarDisplay::Empty {
                message: NO_DATA_MESSAGE,
            });
        }
        Ok(SugarDisplay::Readings {
            chart: self.chart()?,
            table: self.table(),
        })
    }

    /// Inbound message, handed out once
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn go_back(&self) {
        self.navigator.go_back();
    }

    /// Open the add-reading screen
    pub fn add_reading(&self) {
        self.navigator.navigate(Route::AddSugar, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MockNavigator;
    use healthtrack_data::repository::FixedSugarReadings;

    struct EmptySource;

    impl SugarReadingSource for EmptySource {
        fn readings(&self, _variant: SugarVariant) -> Vec<SugarReading> {
            Vec::new()
        }
    }

    struct GarbledSource;

    impl SugarReadingSource for GarbledSource {
        fn readings(&self, variant: SugarVariant) -> Vec<SugarReading> {
            vec![SugarReading::new("02-Oct-2024", variant, "high")]
        }
    }

    fn view(message: Option<&str>) -> SugarView {
        SugarView::mount(
            Arc::new(FixedSugarReadings),
            Arc::new(MockNavigator::new()),
            message.map(str::to_string),
        )
    }

    fn values(view: &SugarView) -> Vec<&str> {
        view.readings().iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn test_mounts_with_random_readings() {
        let view = view(None);
        assert_eq!(view.active_variant(), SugarVariant::Random);
        assert_eq!(values(&view), ["90", "80", "135", "300"]);
    }

    #[test]
    fn test_selecting_fasting_replaces_readings() {
        let mut view = view(None);
        view.select(SelectorOption::Variant(SugarVariant::Fasting));

        assert_eq!(view.readings(), FixedSugarReadings::dataset(SugarVariant::Fasting));
        assert!(view.readings().iter().all(|r| r.test_type == "Fasting"));
        assert_eq!(values(&view), ["70", "80", "100", "85"]);
    }

    #[test]
    fn test_placeholder_is_inert() {
        let mut view = view(None);
        view.select(SelectorOption::Variant(SugarVariant::Fasting));
        view.select(SelectorOption::Placeholder);

        assert_eq!(view.selected(), SelectorOption::Placeholder);
        assert_eq!(view.active_variant(), SugarVariant::Fasting);
        assert_eq!(values(&view), ["70", "80", "100", "85"]);
    }

    #[test]
    fn test_switching_back_does_not_merge() {
        let mut view = view(None);
        view.select(SelectorOption::Variant(SugarVariant::Fasting));
        view.select(SelectorOption::Variant(SugarVariant::Random));
        assert_eq!(view.readings().len(), 4);
        assert_eq!(values(&view), ["90", "80", "135", "300"]);
    }

    #[test]
    fn test_chart_series() {
        let view = view(None);
        let chart = view.chart().unwrap();
        assert_eq!(chart.labels, ["01-Oct-2024", "03-Oct-2024", "05-Oct-2024", "07-Oct-2024"]);
        assert_eq!(chart.values, [90.0, 80.0, 135.0, 300.0]);
        assert_eq!(chart.legend, "Blood Sugar");
    }

    #[test]
    fn test_table_alternates_rows() {
        let table = view(None).table();
        assert_eq!(table.headers, ["Date", "TestType", "Sugar (mm/Hg)"]);
        let flags: Vec<bool> = table.rows.iter().map(|r| r.alternate).collect();
        assert_eq!(flags, [false, true, false, true]);
    }

    #[test]
    fn test_empty_source_shows_notice() {
        let view = SugarView::mount(Arc::new(EmptySource), Arc::new(MockNavigator::new()), None);
        assert_eq!(
            view.display().unwrap(),
            SugarDisplay::Empty { message: "No data available" }
        );
    }

    #[test]
    fn test_non_numeric_value_fails_chart() {
        let view = SugarView::mount(Arc::new(GarbledSource), Arc::new(MockNavigator::new()), None);
        assert!(matches!(view.chart(), Err(SugarViewError::InvalidValue { .. })));
        assert_eq!(view.table().rows.len(), 1);
    }

    #[test]
    fn test_message_is_shown_once() {
        let mut view = view(Some("Blood sugar added successfully!"));
        assert_eq!(view.take_message().as_deref(), Some("Blood sugar added successfully!"));
        assert_eq!(view.take_message(), None);

        let mut quiet = SugarView::mount(
            Arc::new(FixedSugarReadings),
            Arc::new(MockNavigator::new()),
            Some(String::new()),
        );
        assert_eq!(quiet.take_message(), None);
    }

    #[test]
    fn test_navigation_triggers() {
        let mut navigator = MockNavigator::new();
        navigator.expect_go_back().times(1).return_const(());
        navigator
            .expect_navigate()
            .withf(|route, message| *route == Route::AddSugar && message.is_none())
            .times(1)
            .return_const(());

        let view = SugarView::mount(Arc::new(FixedSugarReadings), Arc::new(navigator), None);
        view.add_reading();
        view.go_back();
    }
}
