pub mod models;
pub mod error;
pub mod pii;
pub mod repository;

pub use error::{AuthError, ValidationError};
pub use models::{AssistanceOption, BookingDraft, DraftUpdate, Field, GuestKind, Trip};
pub use pii::Masked;
pub use repository::{KeyValueStore, RepoResult, TripStore};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
}
