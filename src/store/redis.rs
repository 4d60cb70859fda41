use crate::store::{ConfigStore, StoreError};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use tracing::debug;

/// Production store backed by redis. The connection manager reconnects
/// on its own; a cloned handle is cheap, so each call works on a clone
/// and the store itself stays shareable by reference.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects eagerly so a bad address fails at startup.
    pub async fn connect(url: &str) -> Result<Self, anyhow::Error> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        debug!("Connected config store at {}", url);
        Ok(Self { conn })
    }

    fn backend(e: redis::RedisError) -> StoreError {
        StoreError::Backend(anyhow::Error::new(e))
    }
}

#[async_trait]
impl ConfigStore for RedisStore {
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.hgetall(key).await.map_err(Self::backend)
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.smembers(key).await.map_err(Self::backend)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.hget(key, field).await.map_err(Self::backend)
    }
}
