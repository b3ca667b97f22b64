pub mod repositories;
pub mod storage;

pub mod mock;

use repositories::appointment::AppointmentStore;
use storage::MemoryStorage;

/// Wires an appointment store over the in-memory storage backend.
pub fn create_memory_store(collection_key: &str) -> AppointmentStore<MemoryStorage> {
    AppointmentStore::new(MemoryStorage::default(), collection_key)
}
