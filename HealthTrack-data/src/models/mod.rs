pub mod blood_pressure;
pub mod sugar;

pub use blood_pressure::{NewPressureReading, PressureReading};
pub use sugar::{SugarReading, SugarVariant};
