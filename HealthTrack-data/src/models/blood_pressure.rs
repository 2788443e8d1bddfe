use serde::{Deserialize, Serialize};

/// Storage model for a saved blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// When the reading was taken (RFC 3339)
    pub timestamp: String,
}

/// Input data for storing a new blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPressureReading {
    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// When the reading was taken (RFC 3339)
    pub timestamp: String,
}

impl NewPressureReading {
    /// Attach a storage identifier, producing the stored form
    pub fn into_reading(self, id: String) -> PressureReading {
        PressureReading {
            id,
            systolic: self.systolic,
            diastolic: self.diastolic,
            notes: self.notes,
            timestamp: self.timestamp,
        }
    }
}
