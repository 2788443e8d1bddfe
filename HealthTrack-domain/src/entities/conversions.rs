use chrono::{Local, NaiveDateTime, TimeZone};

use crate::entities::pressure::{PressureDraft, PressureReadingRequest};
use crate::services::validation::parse_leading_int;
use healthtrack_data::models::blood_pressure::NewPressureReading;

/// Conversion functions between drafts, domain requests and data models.
/// These follow the pattern convert_to_[target]_[model_name].

/// Convert a draft into a typed request.
///
/// Returns `None` when either pressure does not parse into a `u16`; callers
/// validate the draft first, so this only happens for drafts that skipped it.
pub fn convert_to_domain_request(draft: &PressureDraft) -> Option<PressureReadingRequest> {
    let systolic = u16::try_from(parse_leading_int(&draft.systolic)?).ok()?;
    let diastolic = u16::try_from(parse_leading_int(&draft.diastolic)?).ok()?;
    let notes = if draft.notes.trim().is_empty() {
        None
    } else {
        Some(draft.notes.clone())
    };

    Some(PressureReadingRequest {
        systolic,
        diastolic,
        notes,
        taken_at: draft.date_time,
    })
}

/// Convert from domain request to data model for storage
pub fn convert_to_data_new_reading(request: &PressureReadingRequest) -> NewPressureReading {
    NewPressureReading {
        systolic: request.systolic,
        diastolic: request.diastolic,
        notes: request.notes.clone(),
        timestamp: local_timestamp(&request.taken_at),
    }
}

/// RFC 3339 text for a wall-clock time in the local zone.
///
/// Times that do not exist locally (DST gaps) keep their naive form.
pub fn local_timestamp(taken_at: &NaiveDateTime) -> String {
    match Local.from_local_datetime(taken_at).earliest() {
        Some(local) => local.to_rfc3339(),
        None => taken_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
    }
}
