use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info};
use tripwise_core::{BookingDraft, DraftUpdate, Field, GuestKind, Trip, TripStore, ValidationError};

use crate::stage::{Stage, StepStatus};
use crate::validation::validate_stage;

/// Progress through the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: Stage,
    pub errors: BTreeMap<Field, String>,
    pub confirmed: bool,
}

impl WizardState {
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Five-stage booking form. Independent of whatever renders it.
#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    draft: BookingDraft,
    state: WizardState,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.step
    }

    pub fn is_confirmed(&self) -> bool {
        self.state.confirmed
    }

    pub fn step_status(&self, stage: Stage) -> StepStatus {
        let current = self.state.step;
        if stage < current || (self.state.confirmed && stage.is_last()) {
            StepStatus::Completed
        } else if stage == current && !self.state.confirmed {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    /// Writes one field and drops any error recorded against it
    pub fn set_field(&mut self, update: DraftUpdate) -> Result<(), WizardError> {
        self.ensure_open()?;
        let field = update.field();
        self.draft.apply(update);
        self.state.errors.remove(&field);
        Ok(())
    }

    pub fn increment_guest_count(&mut self, kind: GuestKind) -> Result<u32, WizardError> {
        self.ensure_open()?;
        let count = self.draft.guests_mut(kind);
        *count = count.saturating_add(1);
        Ok(*count)
    }

    /// Lowers a counter, never below `floor` or the counter's own minimum
    pub fn decrement_guest_count(&mut self, kind: GuestKind, floor: u32) -> Result<u32, WizardError> {
        self.ensure_open()?;
        let floor = floor.max(kind.floor());
        let count = self.draft.guests_mut(kind);
        *count = count.saturating_sub(1).max(floor);
        Ok(*count)
    }

    /// Validates the current stage and moves forward on success.
    ///
    /// The error map is replaced by this stage's result either way.
    pub fn advance(&mut self) -> Result<Stage, WizardError> {
        self.ensure_open()?;
        let from = self.state.step;

        match validate_stage(from, &self.draft) {
            Ok(()) => {
                self.state.errors.clear();
                self.state.step = from.next();
                debug!("Wizard advanced from {} to {}", from.key(), self.state.step.key());
                Ok(self.state.step)
            }
            Err(errors) => {
                debug!("Wizard stage {} failed validation: {}", from.key(), errors);
                self.state.errors = errors.errors().clone();
                Err(WizardError::Validation(errors))
            }
        }
    }

    /// Steps back without validating or touching errors
    pub fn retreat(&mut self) -> Result<Stage, WizardError> {
        self.ensure_open()?;
        self.state.step = self.state.step.previous();
        Ok(self.state.step)
    }

    pub async fn confirm(&mut self, trips: &dyn TripStore) -> Result<Trip, WizardError> {
        self.confirm_on(trips, Local::now().date_naive()).await
    }

    /// Hands the draft to `trips` as a confirmed trip booked on `booking_date`
    pub async fn confirm_on(&mut self, trips: &dyn TripStore, booking_date: NaiveDate) -> Result<Trip, WizardError> {
        self.ensure_open()?;
        self.ensure_stage(Stage::Confirm, "confirm")?;

        let trip = Trip::from_draft(self.draft.clone(), booking_date);
        trips
            .save_trip(&trip)
            .await
            .map_err(|e| WizardError::Store(e.to_string()))?;

        self.state.confirmed = true;
        info!("Booking confirmed: trip {} for {}", trip.id, trip.draft.name);
        Ok(trip)
    }

    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.ensure_stage(Stage::Confirm, "cancel")?;
        self.reset();
        info!("Booking cancelled before confirmation");
        Ok(())
    }

    pub fn restart_for_new_booking(&mut self) -> Result<(), WizardError> {
        if !self.state.confirmed {
            return Err(WizardError::NotConfirmed);
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.state = WizardState::default();
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.state.confirmed {
            return Err(WizardError::AlreadyConfirmed);
        }
        Ok(())
    }

    fn ensure_stage(&self, expected: Stage, action: &'static str) -> Result<(), WizardError> {
        if self.state.step != expected {
            return Err(WizardError::InvalidTransition {
                stage: self.state.step,
                action,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot {action} from the {} stage", .stage.key())]
    InvalidTransition {
        stage: Stage,
        action: &'static str,
    },

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error("Booking has not been confirmed yet")]
    NotConfirmed,

    #[error("Trip could not be saved: {0}")]
    Store(String),
}
