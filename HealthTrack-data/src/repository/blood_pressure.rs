use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::blood_pressure::{NewPressureReading, PressureReading};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Repository trait for blood pressure readings
#[async_trait]
pub trait PressureRepositoryTrait {
    /// Store a new blood pressure reading
    async fn create(&self, request: NewPressureReading) -> Result<PressureReading, RepositoryError>;

    /// Get all blood pressure readings in insertion order
    async fn get_all(&self) -> Result<Vec<PressureReading>, RepositoryError>;
}

/// Repository for blood pressure readings backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct PressureRepository {
    storage: InMemoryStorage,
}

impl PressureRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl PressureRepositoryTrait for PressureRepository {
    async fn create(&self, request: NewPressureReading) -> Result<PressureReading, RepositoryError> {
        let reading = request.into_reading(Uuid::new_v4().to_string());
        debug!("Storing blood pressure reading in memory: {}", reading.id);
        self.storage.store_reading(&reading).await
    }

    async fn get_all(&self) -> Result<Vec<PressureReading>, RepositoryError> {
        self.storage.get_all().await
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock repository that can be told to fail a number of writes before accepting
    #[derive(Debug, Default)]
    pub struct MockPressureRepository {
        readings: Mutex<Vec<PressureReading>>,
        failures_left: AtomicUsize,
    }

    impl MockPressureRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail the next `count` create calls with `RepositoryError::Unavailable`
        pub fn failing(count: usize) -> Self {
            Self {
                readings: Mutex::new(Vec::new()),
                failures_left: AtomicUsize::new(count),
            }
        }

        pub fn stored(&self) -> Vec<PressureReading> {
            self.readings.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PressureRepositoryTrait for MockPressureRepository {
        async fn create(&self, request: NewPressureReading) -> Result<PressureReading, RepositoryError> {
            let pending = self.failures_left.load(Ordering::SeqCst);
            if pending > 0 {
                self.failures_left.store(pending - 1, Ordering::SeqCst);
                return Err(RepositoryError::Unavailable("mock storage offline".to_string()));
            }

            let reading = request.into_reading(Uuid::new_v4().to_string());
            self.readings.lock()?.push(reading.clone());
            Ok(reading)
        }

        async fn get_all(&self) -> Result<Vec<PressureReading>, RepositoryError> {
            Ok(self.readings.lock()?.clone())
        }
    }
}

#[cfg(test)]
mod repository_tests {
    use super::*;
    use super::tests::MockPressureRepository;

    fn request(systolic: u16, diastolic: u16) -> NewPressureReading {
        NewPressureReading {
            systolic,
            diastolic,
            notes: Some("after walk".to_string()),
            timestamp: "2024-10-01T14:05:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = PressureRepository::new();
        let stored = repo.create(request(120, 80)).await.unwrap();

        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert_eq!(stored.notes.as_deref(), Some("after walk"));
        assert_eq!(repo.get_all().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_create_accepts_diastolic_above_systolic() {
        let repo = PressureRepository::new();
        let stored = repo.create(request(120, 150)).await.unwrap();
        assert_eq!((stored.systolic, stored.diastolic), (120, 150));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repo = PressureRepository::new();
        let first = repo.create(request(140, 90)).await.unwrap();
        let second = repo.create(request(118, 76)).await.unwrap();

        let ids: Vec<String> = repo.get_all().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_mock_fails_then_accepts() {
        let repo = MockPressureRepository::failing(1);
        assert!(matches!(
            repo.create(request(120, 80)).await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(repo.create(request(120, 80)).await.is_ok());
        assert_eq!(repo.stored().len(), 1);
    }
}
