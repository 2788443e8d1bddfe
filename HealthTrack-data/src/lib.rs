// HealthTrack Data
// This crate holds storage models, the fixed sugar datasets and data access

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
