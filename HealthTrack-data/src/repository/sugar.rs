use once_cell::sync::Lazy;

use crate::models::sugar::{SugarReading, SugarVariant};

/// Source of blood sugar readings keyed by test type
pub trait SugarReadingSource {
    /// Full, ordered dataset for one test type
    fn readings(&self, variant: SugarVariant) -> Vec<SugarReading>;
}

static RANDOM_READINGS: Lazy<Vec<SugarReading>> = Lazy::new(|| {
    vec![
        SugarReading::new("01-Oct-2024", SugarVariant::Random, "90"),
        SugarReading::new("03-Oct-2024", SugarVariant::Random, "80"),
        SugarReading::new("05-Oct-2024", SugarVariant::Random, "135"),
        SugarReading::new("07-Oct-2024", SugarVariant::Random, "300"),
    ]
});

static FASTING_READINGS: Lazy<Vec<SugarReading>> = Lazy::new(|| {
    vec![
        SugarReading::new("01-Oct-2024", SugarVariant::Fasting, "70"),
        SugarReading::new("03-Oct-2024", SugarVariant::Fasting, "80"),
        SugarReading::new("05-Oct-2024", SugarVariant::Fasting, "100"),
        SugarReading::new("07-Oct-2024", SugarVariant::Fasting, "85"),
    ]
});

/// Built-in sample readings, one constant dataset per test type
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSugarReadings;

impl FixedSugarReadings {
    /// Borrow the constant dataset for a test type
    pub fn dataset(variant: SugarVariant) -> &'static [SugarReading] {
        match variant {
            SugarVariant::Random => &RANDOM_READINGS,
            SugarVariant::Fasting => &FASTING_READINGS,
        }
    }
}

impl SugarReadingSource for FixedSugarReadings {
    fn readings(&self, variant: SugarVariant) -> Vec<SugarReading> {
        Self::dataset(variant).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_variant_has_four_dated_readings() {
        for variant in SugarVariant::ALL {
            let readings = FixedSugarReadings.readings(variant);
            let dates: Vec<&str> = readings.iter().map(|r| r.date.as_str()).collect();
            assert_eq!(dates, ["01-Oct-2024", "03-Oct-2024", "05-Oct-2024", "07-Oct-2024"]);
            assert!(readings.iter().all(|r| r.test_type == variant.label()));
        }
    }

    #[test]
    fn test_fasting_values() {
        let values: Vec<String> = FixedSugarReadings
            .readings(SugarVariant::Fasting)
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, ["70", "80", "100", "85"]);
    }

    #[test]
    fn test_random_values() {
        let values: Vec<&str> = FixedSugarReadings::dataset(SugarVariant::Random)
            .iter()
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(values, ["90", "80", "135", "300"]);
    }
}
