use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;
use tripwise_core::repository::TRIPS_KEY;
use tripwise_core::{KeyValueStore, RepoResult, Trip, TripStore};

/// Trip list kept as a JSON array in one key-value slot
pub struct KvTripStore {
    store: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl KvTripStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> RepoResult<Vec<Trip>> {
        match self.store.get(TRIPS_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn persist(&self, trips: &[Trip]) -> RepoResult<()> {
        let raw = serde_json::to_string(trips)?;
        self.store.set(TRIPS_KEY, &raw).await
    }
}

#[async_trait]
impl TripStore for KvTripStore {
    async fn save_trip(&self, trip: &Trip) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut trips = self.load().await?;
        trips.push(trip.clone());
        self.persist(&trips).await?;
        info!("Trip saved: {} to {}", trip.id, trip.draft.end_location);
        Ok(())
    }

    async fn list_trips(&self) -> RepoResult<Vec<Trip>> {
        self.load().await
    }

    async fn delete_trip(&self, id: Uuid) -> RepoResult<bool> {
        let _guard = self.lock.lock().await;
        let mut trips = self.load().await?;
        let before = trips.len();
        trips.retain(|trip| trip.id != id);

        if trips.len() == before {
            return Ok(false);
        }

        self.persist(&trips).await?;
        info!("Trip cancelled: {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::NaiveDate;
    use tripwise_core::BookingDraft;

    fn trip_to(end_location: &str) -> Trip {
        let draft = BookingDraft {
            name: "Alice".to_string(),
            start_location: "NYC".to_string(),
            end_location: end_location.to_string(),
            ..BookingDraft::default()
        };
        Trip::from_draft(draft, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[tokio::test]
    async fn test_trips_listed_in_booking_order() {
        let trips = KvTripStore::new(Arc::new(MemoryStore::new()));
        assert!(trips.list_trips().await.unwrap().is_empty());

        let first = trip_to("LA");
        let second = trip_to("Paris");
        trips.save_trip(&first).await.unwrap();
        trips.save_trip(&second).await.unwrap();

        let listed = trips.list_trips().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let trips = KvTripStore::new(Arc::new(MemoryStore::new()));
        let keep = trip_to("LA");
        let cancel = trip_to("Rome");
        trips.save_trip(&keep).await.unwrap();
        trips.save_trip(&cancel).await.unwrap();

        assert!(trips.delete_trip(cancel.id).await.unwrap());
        assert!(!trips.delete_trip(cancel.id).await.unwrap());
        assert_eq!(trips.list_trips().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_token_slot_untouched() {
        let store = Arc::new(MemoryStore::with_slot("jwt_token", "abc"));
        let trips = KvTripStore::new(store.clone());
        trips.save_trip(&trip_to("LA")).await.unwrap();

        assert_eq!(store.get("jwt_token").await.unwrap().as_deref(), Some("abc"));
        assert!(store.get(TRIPS_KEY).await.unwrap().unwrap().starts_with('['));
    }
}
