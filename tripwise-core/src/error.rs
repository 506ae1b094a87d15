use std::collections::BTreeMap;
use crate::models::Field;

/// Message used when the auth service rejects a login without saying why
pub const DEFAULT_REJECTION: &str = "Login failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The auth service answered with a non-success status
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable answer
    #[error("Something went wrong. Try again.")]
    Transport,

    #[error("Session could not be saved: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.is_empty() => AuthError::Rejected(msg),
            _ => AuthError::Rejected(DEFAULT_REJECTION.to_string()),
        }
    }
}

/// Per-field messages produced when a wizard stage fails validation
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", list_fields(.errors))]
pub struct ValidationError {
    errors: BTreeMap<Field, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`, replacing any earlier one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }
}

fn list_fields(errors: &BTreeMap<Field, String>) -> String {
    errors
        .keys()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_falls_back_to_default() {
        assert_eq!(AuthError::rejected(None), AuthError::Rejected("Login failed".to_string()));
        assert_eq!(AuthError::rejected(Some(String::new())).to_string(), "Login failed");
        // Only an absent or empty message falls back to the default
        assert_eq!(AuthError::rejected(Some("  ".to_string())), AuthError::Rejected("  ".to_string()));
        assert_eq!(AuthError::rejected(Some("bad creds".to_string())).to_string(), "bad creds");
        assert_eq!(AuthError::Transport.to_string(), "Something went wrong. Try again.");
    }

    #[test]
    fn test_validation_error_overwrites_field() {
        let mut err = ValidationError::new();
        err.insert(Field::EndDate, "Select end date");
        err.insert(Field::EndDate, "End date cannot be before start date");
        err.insert(Field::Name, "Enter your name");

        assert_eq!(err.len(), 2);
        assert_eq!(err.get(Field::EndDate), Some("End date cannot be before start date"));
        assert_eq!(err.to_string(), "Validation failed: name, endDate");
    }
}
