use std::sync::Arc;

use crate::config::Config;
use crate::store::KvStore;

/// Shared handles constructed once per process and passed to every service.
#[derive(Clone)]
pub struct CampusContext {
    pub config: Arc<Config>,
    pub store: Arc<KvStore>,
}

impl CampusContext {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = KvStore::open(&config.storage.path)?;

        Ok(CampusContext {
            config: Arc::new(config),
            store: Arc::new(store),
        })
    }
}
