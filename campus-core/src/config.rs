use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub recommend: RecommendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the on-device key-value database.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub top_n: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        Config {
            storage: StorageConfig {
                path: env::var("CAMPUS_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_data_dir()),
            },
            recommend: RecommendConfig {
                top_n: env::var("CAMPUS_RECOMMEND_TOP_N")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("campus-connect"))
        .unwrap_or_else(|| PathBuf::from("campus-data"))
}
