use super::KeyValueStorage;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "local-storage";

/// Storage backed by a fjall keyspace on disk.
pub struct DiskStorage {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStorage {
    pub fn open(data_path: &Path) -> Result<Self> {
        let path = data_path.join("storage");
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(&path)
            .open()
            .with_context(|| format!("Failed to open storage at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open storage partition")?;
        debug!("Opened storage at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl KeyValueStorage for DiskStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key)? {
            Some(bytes) => {
                debug!("Storage HIT for key: {}", key);
                let value = String::from_utf8(bytes.to_vec())
                    .with_context(|| format!("Stored value for {key} is not UTF-8"))?;
                Ok(Some(value))
            }
            None => {
                debug!("Storage MISS for key: {}", key);
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Storage PUT for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_storage_get_set() {
        let dir = tempdir().unwrap();
        let storage = DiskStorage::open(dir.path()).unwrap();

        // Initially, storage is empty
        assert!(storage.get("key1").unwrap().is_none());

        storage.set("key1", "[\"USD\"]").unwrap();
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("[\"USD\"]"));

        // Overwrite
        storage.set("key1", "[]").unwrap();
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("[]"));

        assert!(storage.get("key2").unwrap().is_none());
    }

    #[test]
    fn test_disk_storage_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = DiskStorage::open(dir.path()).unwrap();
            storage.set("key1", "persisted").unwrap();
        }

        let storage = DiskStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("persisted"));
    }
}
