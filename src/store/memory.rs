use super::KeyValueStorage;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory storage, used for tests and embedding.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .inner
            .read()
            .map_err(|_| anyhow!("Storage lock poisoned"))?;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Storage HIT for key: {}", key);
        } else {
            debug!("Storage MISS for key: {}", key);
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow!("Storage lock poisoned"))?;
        debug!("Storage PUT for key: {}", key);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_get_set() {
        let storage = MemoryStorage::new();

        assert!(storage.get("key1").unwrap().is_none());

        storage.set("key1", "123").unwrap();
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("123"));

        storage.set("key1", "456").unwrap();
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("456"));
    }
}
