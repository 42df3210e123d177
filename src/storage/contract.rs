use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait KeyValueStore: Send + Sync {
    /// Raw value for `key`, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and decode a JSON blob.
///
/// Absent keys, unreadable storage, and unparseable content all come back as
/// `None`; the latter two are logged so the caller can fall back to defaults.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored document, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored document is corrupt, using default");
            None
        }
    }
}

/// Encode `value` as JSON and replace the blob stored under `key`.
pub fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).map_err(|e| {
        tracing::error!(key, error = %e, "Failed to persist document");
        e
    })
}
