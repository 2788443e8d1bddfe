// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use healthtrack_data::repository::tests::MockPressureRepository;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entities::pressure::PressureReadingRequest;
use crate::navigation::{Navigator, Route};
use crate::services::saver::{PressureSaver, SaveError, SimulatedSaver};
use healthtrack_data::models::blood_pressure::PressureReading;

/// A navigation call as recorded by `RecordingNavigator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCall {
    Back,
    Navigate(Route, Option<String>),
}

/// Navigator that records every call for later inspection
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_back(&self) {
        self.calls.lock().unwrap().push(NavigationCall::Back);
    }

    fn navigate(&self, route: Route, message: Option<String>) {
        self.calls
            .lock()
            .unwrap()
            .push(NavigationCall::Navigate(route, message));
    }
}

/// Saver that fails a fixed number of times, then behaves like `SimulatedSaver`
pub struct FailingSaver {
    failures_left: AtomicUsize,
    inner: SimulatedSaver,
}

impl FailingSaver {
    pub fn new(failures: usize, inner: SimulatedSaver) -> Self {
        Self {
            failures_left: AtomicUsize::new(failures),
            inner,
        }
    }

    pub fn failures_left(&self) -> usize {
        self.failures_left.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PressureSaver for FailingSaver {
    async fn save(&self, request: PressureReadingRequest) -> Result<PressureReading, SaveError> {
        let pending = self.failures_left.load(Ordering::SeqCst);
        if pending > 0 {
            self.failures_left.store(pending - 1, Ordering::SeqCst);
            tokio::time::sleep(self.inner.latency()).await;
            return Err(SaveError::Storage("network unreachable".to_string()));
        }
        self.inner.save(request).await
    }
}
