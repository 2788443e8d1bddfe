use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;
use validator::Validate;

use crate::entities::conversions;
use crate::entities::pressure::PressureReadingRequest;
use healthtrack_data::models::blood_pressure::PressureReading;
use healthtrack_data::repository::{PressureRepositoryTrait, RepositoryError};

/// Default time the simulated save takes
pub const DEFAULT_SAVE_LATENCY: Duration = Duration::from_secs(2);

/// Errors a save attempt can end with
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    /// The typed request failed the range rules
    #[error("Reading rejected: {0}")]
    Rejected(String),

    /// The store could not take the reading
    #[error("Could not save reading: {0}")]
    Storage(String),
}

impl From<RepositoryError> for SaveError {
    fn from(err: RepositoryError) -> Self {
        SaveError::Storage(err.to_string())
    }
}

/// Persists a validated blood pressure reading
#[async_trait]
pub trait PressureSaver: Send + Sync {
    /// Save one reading, returning the stored form
    async fn save(&self, request: PressureReadingRequest) -> Result<PressureReading, SaveError>;
}

/// Run the `validator` rules on a request, joining field messages
pub fn check_request(request: &PressureReadingRequest) -> Result<(), SaveError> {
    if let Err(validation_errors) = request.validate() {
        let mut messages: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect();
        messages.sort();

        return Err(SaveError::Rejected(messages.join("; ")));
    }

    Ok(())
}

/// Stand-in for a remote save: waits a fixed latency, then accepts
#[derive(Debug, Clone)]
pub struct SimulatedSaver {
    latency: Duration,
}

impl Default for SimulatedSaver {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_LATENCY)
    }
}

impl SimulatedSaver {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl PressureSaver for SimulatedSaver {
    async fn save(&self, request: PressureReadingRequest) -> Result<PressureReading, SaveError> {
        check_request(&request)?;

        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating blood pressure save");
        tokio::time::sleep(self.latency).await;

        let reading = conversions::convert_to_data_new_reading(&request)
            .into_reading(Uuid::new_v4().to_string());
        Ok(reading)
    }
}

/// Saves readings through a pressure repository
#[derive(Debug, Clone)]
pub struct RepositorySaver<R> {
    repository: R,
}

impl<R: PressureRepositoryTrait + Send + Sync> RepositorySaver<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: PressureRepositoryTrait + Send + Sync> PressureSaver for RepositorySaver<R> {
    async fn save(&self, request: PressureReadingRequest) -> Result<PressureReading, SaveError> {
        check_request(&request)?;

        let data_request = conversions::convert_to_data_new_reading(&request);
        self.repository.create(data_request).await.map_err(|e| {
            error!("Failed to store blood pressure reading: {}", e);
            SaveError::from(e)
        })
    }
}
