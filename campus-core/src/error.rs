use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The bytes under `key` no longer decode as the expected record shape.
    /// Callers outside a mutation treat this as missing data and log it.
    #[error("corrupt value under key '{key}': {source}")]
    Corruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),
}
