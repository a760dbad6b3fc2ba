use bookquiz::{ScoreStore, StoreError};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(super) fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Score record kept under one `localStorage` key.
pub(super) struct LocalStorageScoreStore {
    key: String,
}

impl LocalStorageScoreStore {
    pub(super) fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ScoreStore for LocalStorageScoreStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn read_raw(&self) -> Option<String> {
        local_storage_get_string(&self.key)
    }

    fn write_raw(&mut self, raw: &str) -> Result<(), StoreError> {
        let storage = local_storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(&self.key, raw)
            .map_err(|e| StoreError::Backend {
                key: self.key.clone(),
                reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
            })
    }
}
