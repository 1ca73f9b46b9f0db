pub mod config;
pub mod context;
pub mod error;
pub mod keys;
pub mod store;
pub mod types;

pub use config::Config;
pub use context::CampusContext;
pub use error::StoreError;
pub use store::KvStore;
