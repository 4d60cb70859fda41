use crate::store::{ConfigStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// In-process store double. Mirrors the redis shape closely enough for
/// registry tests and local tooling.
#[derive(Default)]
pub struct MemoryStore {
    hashes: Mutex<HashMap<String, HashMap<String, String>>>,
    sets: Mutex<HashMap<String, HashSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hash_field(&self, key: &str, field: &str, value: impl Into<String>) {
        self.hashes
            .lock()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
    }

    pub fn remove_hash_field(&self, key: &str, field: &str) {
        if let Some(hash) = self.hashes.lock().get_mut(key) {
            hash.remove(field);
        }
    }

    pub fn add_set_member(&self, key: &str, member: impl Into<String>) {
        self.sets
            .lock()
            .entry(key.to_string())
            .or_default()
            .insert(member.into());
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        Ok(self.hashes.lock().get(key).cloned().unwrap_or_default())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .sets
            .lock()
            .get(key)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .hashes
            .lock()
            .get(key)
            .and_then(|hash| hash.get(field).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BIDDERS_KEY;

    #[tokio::test]
    async fn test_hash_round_trip() {
        let store = MemoryStore::new();
        store.set_hash_field(BIDDERS_KEY, "nimbus", "{}");

        let all = store.hash_get_all(BIDDERS_KEY).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(
            store.hash_get(BIDDERS_KEY, "nimbus").await.unwrap(),
            Some("{}".to_string())
        );

        store.remove_hash_field(BIDDERS_KEY, "nimbus");
        assert!(store.hash_get_all(BIDDERS_KEY).await.unwrap().is_empty());
        assert_eq!(store.hash_get(BIDDERS_KEY, "nimbus").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_keys_read_as_empty() {
        let store = MemoryStore::new();
        assert!(store.hash_get_all("nope").await.unwrap().is_empty());
        assert!(store.set_members("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_members() {
        let store = MemoryStore::new();
        store.add_set_member("k", "a");
        store.add_set_member("k", "b");

        let mut members = store.set_members("k").await.unwrap();
        members.sort();
        assert_eq!(members, vec!["a", "b"]);
    }
}
