use tripwise_core::{BookingDraft, Field, ValidationError};
use crate::stage::Stage;

/// Checks the fields owned by `stage`. Only the stage being left is checked.
pub fn validate_stage(stage: Stage, draft: &BookingDraft) -> Result<(), ValidationError> {
    let mut errors = ValidationError::new();

    match stage {
        Stage::Details => {
            if draft.name.trim().is_empty() {
                errors.insert(Field::Name, "Enter your name");
            }
            if draft.start_location.trim().is_empty() {
                errors.insert(Field::StartLocation, "Enter your start location");
            }
            if draft.end_location.trim().is_empty() {
                errors.insert(Field::EndLocation, "Enter your end location");
            }
        }
        Stage::Dates => {
            if draft.start_date.is_none() {
                errors.insert(Field::StartDate, "Select start date");
            }
            if draft.end_date.is_none() {
                errors.insert(Field::EndDate, "Select end date");
            }
            if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
                if end < start {
                    errors.insert(Field::EndDate, "End date cannot be before start date");
                }
            }
        }
        // Counters clamp themselves
        Stage::Guests => {}
        Stage::Assistance => {
            if draft.travel_assistance && draft.assistance_option.is_none() {
                errors.insert(Field::AssistanceOption, "Please choose a travel assistance option");
            }
        }
        Stage::Confirm => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
