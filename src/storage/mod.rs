//! Persistence port
//!
//! Each logical record (learner, streak, lesson detail, credits, last
//! active) is stored as one serialized JSON document under a fixed key.
//! Writes are synchronous and fire-and-forget: a failed save is logged and
//! the in-memory state stays authoritative.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage keys, one per record
pub mod keys {
    pub const LEARNING: &str = "huzzlingo_learning";
    pub const STREAK: &str = "huzzlingo_streak";
    pub const LESSON_PROGRESS: &str = "huzzlingo_lesson_progress";
    pub const CREDITS: &str = "huzzlingo_hf_credits";
    pub const LAST_ACTIVE: &str = "huzzlingo_last_active";
}

/// Raw key/value persistence
pub trait Store {
    /// Read a record; `None` if absent or unreadable
    fn load(&self, key: &str) -> Option<String>;

    /// Write a record, replacing any previous value
    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()>;

    /// Drop a record
    fn remove(&mut self, key: &str) -> std::io::Result<()>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        (**self).remove(key)
    }
}

/// Read and decode a record, `None` when absent or corrupt
pub fn load_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let raw = store.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding unreadable record '{}': {}", key, e);
            None
        }
    }
}

/// Read and decode a record, falling back to `T::default()`
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn Store, key: &str) -> T {
    load_json(store, key).unwrap_or_default()
}

/// Encode and write a record; failures are logged, not returned
pub fn save_json<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize record '{}': {}", key, e);
            return;
        }
    };

    if let Err(e) = store.save(key, &json) {
        tracing::error!("Failed to save record '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "counter", &Counter { value: 7 });

        let loaded: Counter = load_or_default(&store, "counter");
        assert_eq!(loaded, Counter { value: 7 });
    }

    #[test]
    fn test_missing_record_defaults() {
        let store = MemoryStore::new();
        let loaded: Counter = load_or_default(&store, "counter");
        assert_eq!(loaded, Counter::default());
    }

    #[test]
    fn test_corrupt_record_defaults() {
        let mut store = MemoryStore::new();
        store.save("counter", "{not json").unwrap();

        let loaded: Option<Counter> = load_json(&store, "counter");
        assert!(loaded.is_none());
        let loaded: Counter = load_or_default(&store, "counter");
        assert_eq!(loaded.value, 0);
    }
}
