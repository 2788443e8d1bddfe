use tracing::debug;

use crate::entities::pressure::{
    FieldStates, DIASTOLIC_OUT_OF_RANGE, DIASTOLIC_REQUIRED, SYSTOLIC_OUT_OF_RANGE,
    SYSTOLIC_REQUIRED,
};

/// Exclusive bounds of an accepted pressure value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureBounds {
    /// Values at or below this are rejected
    pub floor: i64,
    /// Values at or above this are rejected
    pub ceiling: i64,
}

impl PressureBounds {
    pub const SYSTOLIC: PressureBounds = PressureBounds { floor: 30, ceiling: 305 };
    pub const DIASTOLIC: PressureBounds = PressureBounds { floor: 20, ceiling: 180 };

    pub fn contains(&self, value: i64) -> bool {
        value > self.floor && value < self.ceiling
    }
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit, so `"120mm"` reads as 120. Returns `None` when no digit leads.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Error for one pressure field, or `None` when the text is acceptable
fn check_pressure_text(
    text: &str,
    bounds: PressureBounds,
    required: &'static str,
    out_of_range: &'static str,
) -> Option<&'static str> {
    if text.is_empty() {
        return Some(required);
    }
    // No leading integer counts as out of range
    match parse_leading_int(text) {
        Some(value) if bounds.contains(value) => None,
        _ => Some(out_of_range),
    }
}

/// Inline errors produced by one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressureErrors {
    pub systolic: Option<&'static str>,
    pub diastolic: Option<&'static str>,
}

impl PressureErrors {
    pub fn is_valid(&self) -> bool {
        self.systolic.is_none() && self.diastolic.is_none()
    }
}

/// Check the systolic and diastolic texts of a draft
pub fn check_pressure(systolic: &str, diastolic: &str) -> PressureErrors {
    PressureErrors {
        systolic: check_pressure_text(
            systolic,
            PressureBounds::SYSTOLIC,
            SYSTOLIC_REQUIRED,
            SYSTOLIC_OUT_OF_RANGE,
        ),
        diastolic: check_pressure_text(
            diastolic,
            PressureBounds::DIASTOLIC,
            DIASTOLIC_REQUIRED,
            DIASTOLIC_OUT_OF_RANGE,
        ),
    }
}

/// Recompute every field error from scratch; returns true when the draft may be saved
pub fn validate_pressure(systolic: &str, diastolic: &str, fields: &mut FieldStates) -> bool {
    fields.clear_errors();

    let errors = check_pressure(systolic, diastolic);
    fields.systolic.error = errors.systolic.map(str::to_string);
    fields.diastolic.error = errors.diastolic.map(str::to_string);

    if !errors.is_valid() {
        debug!(?errors, "Blood pressure input rejected");
    }
    errors.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(systolic: &str, diastolic: &str) -> (bool, FieldStates) {
        let mut fields = FieldStates::default();
        let valid = validate_pressure(systolic, diastolic, &mut fields);
        (valid, fields)
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("120"), Some(120));
        assert_eq!(parse_leading_int("  95"), Some(95));
        assert_eq!(parse_leading_int("120mm"), Some(120));
        assert_eq!(parse_leading_int("120.7"), Some(120));
        assert_eq!(parse_leading_int("-40"), Some(-40));
        assert_eq!(parse_leading_int("+40"), Some(40));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_normal_reading_is_valid() {
        let (valid, fields) = run("120", "80");
        assert!(valid);
        assert!(!fields.has_errors());
    }

    #[test]
    fn test_empty_systolic_is_required() {
        let (valid, fields) = run("", "80");
        assert!(!valid);
        assert_eq!(fields.systolic.error.as_deref(), Some(SYSTOLIC_REQUIRED));
        assert_eq!(fields.diastolic.error, None);
    }

    #[test]
    fn test_both_empty() {
        let (valid, fields) = run("", "");
        assert!(!valid);
        assert_eq!(fields.systolic.error.as_deref(), Some(SYSTOLIC_REQUIRED));
        assert_eq!(fields.diastolic.error.as_deref(), Some(DIASTOLIC_REQUIRED));
    }

    #[test]
    fn test_both_out_of_range() {
        let (valid, fields) = run("400", "10");
        assert!(!valid);
        assert_eq!(fields.systolic.error.as_deref(), Some(SYSTOLIC_OUT_OF_RANGE));
        assert_eq!(fields.diastolic.error.as_deref(), Some(DIASTOLIC_OUT_OF_RANGE));
    }

    #[test]
    fn test_systolic_boundaries() {
        assert!(!run("30", "80").0);
        assert!(run("31", "80").0);
        assert!(run("304", "80").0);
        assert!(!run("305", "80").0);
    }

    #[test]
    fn test_diastolic_boundaries() {
        assert!(!run("120", "20").0);
        assert!(run("120", "21").0);
        assert!(run("120", "179").0);
        assert!(!run("120", "180").0);
    }

    #[test]
    fn test_non_numeric_text_is_out_of_range() {
        let (valid, fields) = run("abc", "80");
        assert!(!valid);
        assert_eq!(fields.systolic.error.as_deref(), Some(SYSTOLIC_OUT_OF_RANGE));
    }

    #[test]
    fn test_errors_recomputed_from_scratch() {
        let mut fields = FieldStates::default();
        assert!(!validate_pressure("", "", &mut fields));
        fields.notes.error = Some("stale".to_string());

        assert!(validate_pressure("120", "80", &mut fields));
        assert!(!fields.has_errors());
    }
}
