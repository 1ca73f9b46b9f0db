use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing;

use crate::error::StoreError;

/// Guard serializing read-modify-write sequences on one storage key.
pub type KeyGuard = OwnedMutexGuard<()>;

/// Durable, string-keyed storage for JSON-encoded records.
///
/// Single-key writes are atomic: a write either replaces the whole value or
/// leaves the previous one in place, so cancellation at an await point never
/// exposes a partially applied record.
pub struct KvStore {
    db: sled::Db,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KvStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "opened key-value store");

        Ok(KvStore {
            db,
            locks: DashMap::new(),
        })
    }

    /// Value stored under `key`, or `None` if it was never set.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corruption {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Durably persist `value` under `key`, replacing any prior value.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.db.insert(key.as_bytes(), bytes)?;
        self.db.flush_async().await?;
        Ok(())
    }

    /// Delete the value under `key`. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.db.remove(key.as_bytes())?;
        self.db.flush_async().await?;
        Ok(())
    }

    /// Take the write lock for `key`.
    ///
    /// Callers that read, inspect, and conditionally write a key must hold
    /// this guard across the whole sequence; `get`/`set`/`remove` themselves
    /// do not lock.
    pub async fn lock_key(&self, key: &str) -> KeyGuard {
        let lock = {
            let entry = self.locks.entry(key.to_string()).or_default();
            Arc::clone(entry.value())
        };
        lock.lock_owned().await
    }

    /// Atomically read, transform, and write back the value under `key`.
    ///
    /// The closure receives `None` when the key is absent; a corrupt stored
    /// value is logged and likewise passed as `None`. Returns the value that
    /// was written.
    pub async fn update<T, F>(&self, key: &str, f: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> T,
    {
        let _guard = self.lock_key(key).await;

        let current = match self.get::<T>(key).await {
            Ok(value) => value,
            Err(err @ StoreError::Corruption { .. }) => {
                tracing::warn!(key, error = %err, "discarding corrupt value");
                None
            }
            Err(err) => return Err(err),
        };

        let next = f(current);
        self.set(key, &next).await?;
        Ok(next)
    }
}
