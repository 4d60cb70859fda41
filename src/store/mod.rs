//! Injected key-value abstraction the dynamic registry reads bidder
//! configs from. Production uses the redis-backed implementation; tests
//! and ops tooling use the in-memory one.

mod memory;
mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Hash of bidder code -> JSON-serialized `BidderConfig`.
pub const BIDDERS_KEY: &str = "tne_catalyst:bidders";

/// Optional set of active codes consulted by ops tooling.
pub const ACTIVE_BIDDERS_KEY: &str = "tne_catalyst:bidders:active";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// The three operations the registry and its ops tooling need. Only
/// `hash_get_all` sits on the hot reload path; the others exist for
/// targeted inspection.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError>;

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;
}
