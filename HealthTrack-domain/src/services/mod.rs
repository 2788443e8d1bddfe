pub mod formatting;
pub mod validation;
pub mod saver;
pub mod pressure_form;
pub mod sugar_view;

// Domain services
// Screen controllers and the rules they apply.

// Re-export the controllers and their collaborators
pub use pressure_form::{PressureForm, SaveOutcome, TeardownHandle};
pub use saver::{PressureSaver, RepositorySaver, SaveError, SimulatedSaver};
pub use sugar_view::{SugarView, SugarViewError};
