//! Controller of the blood pressure entry screen
//!
//! Holds the draft, the date picker visibility and the save flow
//! (`Idle -> Saving -> Success -> Idle`, or `Saving -> Failed` on a storage
//! error). A rejected request or draft always lands back in `Idle`. The save
//! flow races every wait against the screen teardown signal, so a dismantled
//! screen never gets a late state update or navigation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::entities::conversions;
use crate::entities::pressure::{PressureDraft, PressureField, SaveState, SAVE_SUCCESS_MESSAGE};
use crate::navigation::{Navigator, Route};
use crate::services::formatting::format_reading_time;
use crate::services::saver::{PressureSaver, SaveError};
use crate::services::validation::validate_pressure;
use healthtrack_data::models::blood_pressure::PressureReading;

/// Default time the success indicator stays up before leaving the screen
pub const DEFAULT_SUCCESS_HOLD: Duration = Duration::from_secs(2);

/// How a save attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Validation failed, field errors are set
    Rejected,
    /// A save is already running
    Busy,
    /// Saved and navigated to the readings screen
    Navigated(PressureReading),
    /// The saver reported an error; storage errors leave the form in `Failed`
    Failed(SaveError),
    /// The screen was torn down before the flow finished
    Cancelled,
    /// `retry` was called without a failed save
    NothingToRetry,
}

/// Handle the host fires when the screen is dismantled
#[derive(Debug, Clone)]
pub struct TeardownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl TeardownHandle {
    /// Abandon any pending save step
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Blood pressure entry screen
pub struct PressureForm {
    draft: PressureDraft,
    date_picker_visible: bool,
    state: watch::Sender<SaveState>,
    saver: Arc<dyn PressureSaver>,
    navigator: Arc<dyn Navigator>,
    success_hold: Duration,
    teardown: TeardownHandle,
    teardown_rx: watch::Receiver<bool>,
}

impl PressureForm {
    /// Mount the screen with a draft stamped at the current local time
    pub fn mount(saver: Arc<dyn PressureSaver>, navigator: Arc<dyn Navigator>) -> Self {
        Self::mount_at(saver, navigator, Local::now().naive_local())
    }

    /// Mount the screen with a draft stamped at `now`
    pub fn mount_at(
        saver: Arc<dyn PressureSaver>,
        navigator: Arc<dyn Navigator>,
        now: NaiveDateTime,
    ) -> Self {
        let (state, _) = watch::channel(SaveState::Idle);
        let (teardown_tx, teardown_rx) = watch::channel(false);

        Self {
            draft: PressureDraft::new(now),
            date_picker_visible: false,
            state,
            saver,
            navigator,
            success_hold: DEFAULT_SUCCESS_HOLD,
            teardown: TeardownHandle {
                tx: Arc::new(teardown_tx),
            },
            teardown_rx,
        }
    }

    /// Override how long the success indicator is held
    pub fn with_success_hold(mut self, hold: Duration) -> Self {
        self.success_hold = hold;
        self
    }

    pub fn draft(&self) -> &PressureDraft {
        &self.draft
    }

    pub fn state(&self) -> SaveState {
        self.state.borrow().clone()
    }

    /// Observe every save state transition
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state.subscribe()
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    pub fn set_systolic(&mut self, text: &str) {
        self.draft.systolic = text.to_string();
    }

    pub fn set_diastolic(&mut self, text: &str) {
        self.draft.diastolic = text.to_string();
    }

    pub fn set_notes(&mut self, text: &str) {
        self.draft.notes = text.to_string();
    }

    pub fn focus(&mut self, field: PressureField) {
        self.draft.fields.get_mut(field).focused = true;
    }

    pub fn blur(&mut self, field: PressureField) {
        self.draft.fields.get_mut(field).focused = false;
    }

    /// Label floats above the input while focused or filled
    pub fn is_label_raised(&self, field: PressureField) -> bool {
        self.draft.fields.get(field).focused || self.draft.has_value(field)
    }

    pub fn show_date_picker(&mut self) {
        self.date_picker_visible = true;
    }

    pub fn is_date_picker_visible(&self) -> bool {
        self.date_picker_visible
    }

    /// Store the picked time and its display form, then close the picker
    pub fn confirm_date(&mut self, picked: NaiveDateTime) {
        self.draft.date_time = picked;
        self.draft.formatted_date = format_reading_time(&picked);
        self.date_picker_visible = false;
    }

    /// Close the picker leaving the draft untouched
    pub fn cancel_date_picker(&mut self) {
        self.date_picker_visible = false;
    }

    /// Recompute field errors; true when the draft may be saved
    pub fn validate(&mut self) -> bool {
        validate_pressure(&self.draft.systolic, &self.draft.diastolic, &mut self.draft.fields)
    }

    /// Leave the screen without saving
    pub fn go_back(&self) {
        self.navigator.go_back();
    }

    /// Validate and, when valid, run the save flow to completion
    pub async fn save(&mut self) -> SaveOutcome {
        if self.teardown.is_fired() {
            return SaveOutcome::Cancelled;
        }
        if self.state().blocks_input() {
            debug!("Save ignored while another save is running");
            return SaveOutcome::Busy;
        }
        let request = if self.validate() {
            conversions::convert_to_domain_request(&self.draft)
        } else {
            None
        };
        let Some(request) = request else {
            self.settle_idle();
            return SaveOutcome::Rejected;
        };

        let saver = Arc::clone(&self.saver);
        let mut teardown = self.teardown_rx.clone();

        self.transition(SaveState::Saving);
        let result = tokio::select! {
            result = saver.save(request) => result,
            _ = teardown.wait_for(|down| *down) => {
                info!("Pressure screen torn down while saving");
                return SaveOutcome::Cancelled;
            }
        };

        let reading = match result {
            Ok(reading) => reading,
            Err(err @ SaveError::Rejected(_)) => {
                warn!("Blood pressure reading rejected: {}", err);
                self.transition(SaveState::Idle);
                return SaveOutcome::Failed(err);
            }
            Err(err) => {
                warn!("Blood pressure save failed: {}", err);
                self.transition(SaveState::Failed(err.to_string()));
                return SaveOutcome::Failed(err);
            }
        };

        self.transition(SaveState::Success);
        tokio::select! {
            _ = tokio::time::sleep(self.success_hold) => {}
            _ = teardown.wait_for(|down| *down) => {
                info!("Pressure screen torn down during success hold");
                return SaveOutcome::Cancelled;
            }
        }

        info!(id = %reading.id, "Blood pressure reading saved");
        self.navigator.navigate(
            Route::PressureReadings,
            Some(SAVE_SUCCESS_MESSAGE.to_string()),
        );
        self.transition(SaveState::Idle);
        SaveOutcome::Navigated(reading)
    }

    /// Run the save again after a failure
    pub async fn retry(&mut self) -> SaveOutcome {
        if !matches!(self.state(), SaveState::Failed(_)) {
            return SaveOutcome::NothingToRetry;
        }
        self.save().await
    }

    /// Drop a stale `Failed` state without notifying when already idle
    fn settle_idle(&self) {
        if self.state() != SaveState::Idle {
            self.transition(SaveState::Idle);
        }
    }

    fn transition(&self, next: SaveState) {
        debug!(?next, "Pressure save state");
        self.state.send_replace(next);
    }
}

impl Drop for PressureForm {
    fn drop(&mut self) {
        self.teardown.fire();
    }
}
