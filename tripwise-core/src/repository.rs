use async_trait::async_trait;
use uuid::Uuid;
use crate::models::Trip;

/// Slot holding the session token
pub const TOKEN_KEY: &str = "jwt_token";

/// Slot holding the JSON list of confirmed trips
pub const TRIPS_KEY: &str = "trips";

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Durable string slots addressed by key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> RepoResult<()>;
}

/// Receiver of confirmed trips
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save_trip(&self, trip: &Trip) -> RepoResult<()>;

    /// Trips in the order they were booked
    async fn list_trips(&self) -> RepoResult<Vec<Trip>>;

    /// Returns false when no trip had this id
    async fn delete_trip(&self, id: Uuid) -> RepoResult<bool>;
}
