// HealthTrack Domain
// Screen controllers and the rules behind them

// Services that implement the screen logic
pub mod services;

// Domain entities
pub mod entities;

// Navigation contract supplied by the host UI
pub mod navigation;

// Re-export the data layer for convenience
pub use healthtrack_data as data;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
