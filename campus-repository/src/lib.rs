//! Durable domain records for the campus events app.
//!
//! [`Repository`] is the only component that reads or writes the four
//! persisted record kinds (registrations, comments, feedback, preferences).
//! Everything else goes through it: the auth service and UI layer call its
//! operations, the recommendation engine reads preferences through it.

pub mod comments;
pub mod error;
pub mod feedback;
pub mod preferences;
pub mod registrations;

pub use comments::{CommentMap, MAX_COMMENT_LEN, SOCIAL_FEED_EVENT_ID};
pub use error::RepositoryError;

use serde::de::DeserializeOwned;

use campus_core::{CampusContext, KvStore, StoreError};

/// Sole owner of the persisted registration, comment, feedback, and
/// preference records.
#[derive(Clone)]
pub struct Repository {
    ctx: CampusContext,
}

impl Repository {
    pub fn new(ctx: CampusContext) -> Self {
        Self { ctx }
    }

    pub(crate) fn store(&self) -> &KvStore {
        &self.ctx.store
    }

    /// Read path for plain getters: any storage failure degrades to the
    /// default value and is logged, so the UI layer never sees an error
    /// from a read.
    pub(crate) async fn read_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.ctx.store.get(key).await {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(key, error = %err, "read failed, falling back to default");
                T::default()
            }
        }
    }

    /// Read path inside a mutation: corruption counts as missing data, but a
    /// backend failure propagates so the write is not attempted over lost
    /// state. Callers must hold the key's write lock.
    pub(crate) async fn read_for_write<T>(&self, key: &str) -> Result<T, RepositoryError>
    where
        T: DeserializeOwned + Default,
    {
        match self.ctx.store.get(key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(T::default()),
            Err(err @ StoreError::Corruption { .. }) => {
                tracing::warn!(key, error = %err, "discarding corrupt record");
                Ok(T::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use campus_core::config::{Config, RecommendConfig, StorageConfig};
    use campus_core::types::User;
    use campus_core::CampusContext;

    use crate::Repository;

    pub async fn repository() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage: StorageConfig {
                path: dir.path().join("db"),
            },
            recommend: RecommendConfig { top_n: 3 },
        };
        let ctx = CampusContext::new(config).await.unwrap();
        (dir, Repository::new(ctx))
    }

    pub fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            full_name: format!("Student {id}"),
            email: format!("{id}@student.university.edu"),
        }
    }
}
