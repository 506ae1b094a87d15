pub mod app_config;
pub mod file_store;
pub mod memory_store;
pub mod trip_repo;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use trip_repo::KvTripStore;
