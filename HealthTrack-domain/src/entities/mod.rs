// Domain entities for the pressure form and sugar readings screens
pub mod pressure;
pub mod sugar;
pub mod conversions;
