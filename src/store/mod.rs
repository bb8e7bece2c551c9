pub mod disk;
pub mod memory;

use anyhow::Result;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;

/// Durable string-keyed storage. Writes are applied immediately.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
