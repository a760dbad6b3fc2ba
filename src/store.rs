//! Persistence boundary for the score record.
//!
//! Hosts provide raw string access to one key; encoding lives here so every
//! backend treats corrupt data the same way.

use std::collections::HashMap;

use tracing::warn;

use crate::error::StoreError;
use crate::score::ScoreRecord;

pub trait ScoreStore {
    /// Key the record is stored under.
    fn key(&self) -> &str;

    fn read_raw(&self) -> Option<String>;

    fn write_raw(&mut self, raw: &str) -> Result<(), StoreError>;

    /// The stored record, or `None` when nothing is stored or it can't be decoded.
    fn read(&self) -> Option<ScoreRecord> {
        let raw = self.read_raw()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = self.key(), "discarding unreadable score record: {e}");
                None
            }
        }
    }

    /// Refuses records with NaN or infinite points, which would be encoded as
    /// `null` and make the whole stored record unreadable.
    fn write(&mut self, record: &ScoreRecord) -> Result<(), StoreError> {
        if let Some((key, _)) = record.iter().find(|(_, v)| !v.is_finite()) {
            return Err(StoreError::NonFinite {
                key: key.to_string(),
            });
        }
        let raw = serde_json::to_string(record)?;
        self.write_raw(&raw)
    }
}

/// Map-backed store. Several keys may live side by side, as in a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
            writes: 0,
        }
    }

    pub fn with_raw(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut store = Self::new(key);
        store.entries.insert(store.key.clone(), raw.into());
        store
    }

    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }

    /// Number of writes performed through this store.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn read_raw(&self) -> Option<String> {
        self.entries.get(&self.key).cloned()
    }

    fn write_raw(&mut self, raw: &str) -> Result<(), StoreError> {
        self.entries.insert(self.key.clone(), raw.to_string());
        self.writes += 1;
        Ok(())
    }
}
