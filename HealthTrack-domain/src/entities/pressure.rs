use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::formatting::format_reading_time;

/// Shown under an empty systolic field
pub const SYSTOLIC_REQUIRED: &str = "Please enter systolic value";

/// Shown under an empty diastolic field
pub const DIASTOLIC_REQUIRED: &str = "Please enter diastolic value";

/// Shown when systolic falls outside the accepted range
pub const SYSTOLIC_OUT_OF_RANGE: &str =
    "Blood pressure systolic level should be in range of >=30 to <=305";

/// Shown when diastolic falls outside the accepted range
pub const DIASTOLIC_OUT_OF_RANGE: &str =
    "Blood pressure diastolic level should be in range of >=20 to <=180";

/// Message carried to the pressure readings screen after a completed save
pub const SAVE_SUCCESS_MESSAGE: &str = "Blood pressure added successfully!";

/// Input fields of the pressure entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureField {
    Date,
    Systolic,
    Diastolic,
    Notes,
}

impl PressureField {
    pub const ALL: [PressureField; 4] = [
        PressureField::Date,
        PressureField::Systolic,
        PressureField::Diastolic,
        PressureField::Notes,
    ];

    /// Field label as displayed above the input
    pub fn label(&self) -> &'static str {
        match self {
            PressureField::Date => "Date and Time *",
            PressureField::Systolic => "Systolic (mmHg)",
            PressureField::Diastolic => "Diastolic (mmHg)",
            PressureField::Notes => "Notes",
        }
    }
}

impl fmt::Display for PressureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PressureField::Date => "date",
            PressureField::Systolic => "systolic",
            PressureField::Diastolic => "diastolic",
            PressureField::Notes => "notes",
        };
        f.write_str(name)
    }
}

impl FromStr for PressureField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(PressureField::Date),
            "systolic" => Ok(PressureField::Systolic),
            "diastolic" => Ok(PressureField::Diastolic),
            "notes" => Ok(PressureField::Notes),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Focus flag and inline error of one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub focused: bool,
    pub error: Option<String>,
}

/// One `FieldState` per form field, always fully initialized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStates {
    pub date: FieldState,
    pub systolic: FieldState,
    pub diastolic: FieldState,
    pub notes: FieldState,
}

impl FieldStates {
    pub fn get(&self, field: PressureField) -> &FieldState {
        match field {
            PressureField::Date => &self.date,
            PressureField::Systolic => &self.systolic,
            PressureField::Diastolic => &self.diastolic,
            PressureField::Notes => &self.notes,
        }
    }

    pub fn get_mut(&mut self, field: PressureField) -> &mut FieldState {
        match field {
            PressureField::Date => &mut self.date,
            PressureField::Systolic => &mut self.systolic,
            PressureField::Diastolic => &mut self.diastolic,
            PressureField::Notes => &mut self.notes,
        }
    }

    /// Drop every inline error, keeping focus flags
    pub fn clear_errors(&mut self) {
        for field in PressureField::ALL {
            self.get_mut(field).error = None;
        }
    }

    pub fn has_errors(&self) -> bool {
        PressureField::ALL.iter().any(|f| self.get(*f).error.is_some())
    }
}

/// Unsaved state of one pressure entry screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressureDraft {
    /// When the reading was taken
    pub date_time: NaiveDateTime,

    /// Display form of `date_time`
    pub formatted_date: String,

    /// Raw systolic text as typed
    pub systolic: String,

    /// Raw diastolic text as typed
    pub diastolic: String,

    /// Free-text notes
    pub notes: String,

    /// Focus and error state per field
    pub fields: FieldStates,
}

impl PressureDraft {
    /// Fresh draft stamped with `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            date_time: now,
            formatted_date: format_reading_time(&now),
            systolic: String::new(),
            diastolic: String::new(),
            notes: String::new(),
            fields: FieldStates::default(),
        }
    }

    /// Whether the field currently holds a value
    pub fn has_value(&self, field: PressureField) -> bool {
        match field {
            PressureField::Date => true,
            PressureField::Systolic => !self.systolic.is_empty(),
            PressureField::Diastolic => !self.diastolic.is_empty(),
            PressureField::Notes => !self.notes.is_empty(),
        }
    }

    pub fn error(&self, field: PressureField) -> Option<&str> {
        self.fields.get(field).error.as_deref()
    }
}

/// Progress of the save flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    /// Form is editable
    Idle,

    /// Request in flight, interaction blocked
    Saving,

    /// Request succeeded, success indicator shown
    Success,

    /// Storage failed, retry offered
    Failed(String),
}

impl SaveState {
    /// Whether the blocking overlay should cover the form
    pub fn blocks_input(&self) -> bool {
        matches!(self, SaveState::Saving | SaveState::Success)
    }
}

/// Typed request built from a validated draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PressureReadingRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 31, max = 304, message = "Systolic must be between 31 and 304"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 21, max = 179, message = "Diastolic must be between 21 and 179"))]
    pub diastolic: u16,

    /// Optional notes about the reading, any length
    pub notes: Option<String>,

    /// When the reading was taken
    pub taken_at: NaiveDateTime,
}
