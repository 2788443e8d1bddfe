use std::sync::{Arc, Mutex};

use crate::models::blood_pressure::PressureReading;
use super::errors::RepositoryError;

/// In-memory storage for blood pressure readings, kept in insertion order
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    readings: Arc<Mutex<Vec<PressureReading>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Store a reading in memory
    pub async fn store_reading(&self, reading: &PressureReading) -> Result<PressureReading, RepositoryError> {
        let mut store = self.readings.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        store.push(reading.clone());
        Ok(reading.clone())
    }

    /// Get all readings from memory
    pub async fn get_all(&self) -> Result<Vec<PressureReading>, RepositoryError> {
        let store = self.readings.lock().map_err(|e| RepositoryError::MutexLock(e.to_string()))?;
        Ok(store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: &str, timestamp: &str) -> PressureReading {
        PressureReading {
            id: id.to_string(),
            systolic: 120,
            diastolic: 80,
            notes: None,
            timestamp: timestamp.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_fetch() {
        let storage = InMemoryStorage::new();
        storage.store_reading(&reading("a", "2024-10-01T08:00:00")).await.unwrap();
        storage.store_reading(&reading("b", "2024-10-03T08:00:00")).await.unwrap();

        let all = storage.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "a");
        assert_eq!(all[1].id, "b");
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let storage = InMemoryStorage::new();
        let other = storage.clone();
        storage.store_reading(&reading("a", "2024-10-01T08:00:00")).await.unwrap();
        assert_eq!(other.get_all().await.unwrap().len(), 1);
    }
}
