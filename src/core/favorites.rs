//! Favorite currencies, persisted on every change

use super::error::FxError;
use crate::store::KeyValueStorage;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const FAVORITES_KEY: &str = "currency-favorites";
pub const DEFAULT_FAVORITES: [&str; 4] = ["USD", "EUR", "GBP", "JPY"];

/// Ordered, duplicate-free list of currency codes.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    codes: Vec<String>,
}

impl FavoritesStore {
    /// Reads persisted favorites, falling back to the default seed when
    /// nothing is stored or the stored value cannot be parsed.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let codes = match read_codes(storage.as_ref()) {
            Ok(Some(codes)) => dedup(codes),
            Ok(None) => {
                debug!("No stored favorites, using defaults");
                default_codes()
            }
            Err(e) => {
                warn!(error = %e, "Falling back to default favorites");
                default_codes()
            }
        };
        Self { storage, codes }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Appends `code` unless it is already a favorite.
    pub fn add(&mut self, code: &str) -> &[String] {
        if !self.contains(code) {
            self.codes.push(code.to_string());
            self.persist();
        }
        &self.codes
    }

    /// Removes `code`; absent codes are ignored.
    pub fn remove(&mut self, code: &str) -> &[String] {
        let before = self.codes.len();
        self.codes.retain(|c| c != code);
        if self.codes.len() != before {
            self.persist();
        }
        &self.codes
    }

    pub fn toggle(&mut self, code: &str) -> &[String] {
        if self.contains(code) {
            self.remove(code)
        } else {
            self.add(code)
        }
    }

    fn persist(&self) {
        let res = serde_json::to_string(&self.codes)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.storage.set(FAVORITES_KEY, &json));
        if let Err(e) = res {
            error!(error = %e, "Failed to persist favorites");
        }
    }
}

fn read_codes(storage: &dyn KeyValueStorage) -> Result<Option<Vec<String>>, FxError> {
    let raw = storage.get(FAVORITES_KEY).map_err(|e| FxError::Parse {
        key: FAVORITES_KEY.to_string(),
        message: e.to_string(),
    })?;
    raw.map(|json| {
        serde_json::from_str(&json).map_err(|e| FxError::Parse {
            key: FAVORITES_KEY.to_string(),
            message: e.to_string(),
        })
    })
    .transpose()
}

fn default_codes() -> Vec<String> {
    DEFAULT_FAVORITES.iter().map(|c| c.to_string()).collect()
}

fn dedup(codes: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        if !unique.contains(&code) {
            unique.push(code);
        }
    }
    unique
}
