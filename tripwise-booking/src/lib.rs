pub mod stage;
pub mod validation;
pub mod wizard;

pub use stage::{Stage, StepStatus};
pub use validation::validate_stage;
pub use wizard::{BookingWizard, WizardError, WizardState};
