use super::Store;
use std::collections::HashMap;

/// In-memory store, used by tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::io::Result<()> {
        self.records.remove(key);
        Ok(())
    }
}
