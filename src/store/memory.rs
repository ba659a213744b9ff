//! Memory Store Module
//!
//! In-process TTL key-value map. Backs the development server and doubles as
//! an injectable store for tests and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::{Result, StoreError};
use crate::store::entry::current_timestamp_ms;
use crate::store::{GlobPattern, KvStore, StoredEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Memory Store ==
/// Shared in-memory store with passive and swept expiry.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a value, replacing any previous value and deadline.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The serialized value
    /// * `ttl` - Optional TTL in seconds; `None` never expires
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        validate_key(key)?;

        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidRequest(format!(
                "ERR value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if ttl == Some(0) {
            return Err(StoreError::InvalidRequest(
                "ERR invalid expire time".to_string(),
            ));
        }

        let entry = StoredEntry::new(value.to_string(), ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`, dropping it if it has expired.
    pub async fn get_value(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a concurrent set may have refreshed it
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(StoredEntry::is_expired) {
            entries.remove(key);
        }
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes keys, returning how many live entries were removed.
    pub async fn delete(&self, keys: &[String]) -> u64 {
        let mut entries = self.entries.write().await;
        keys.iter()
            .filter_map(|key| entries.remove(key))
            .filter(|entry| !entry.is_expired())
            .count() as u64
    }

    // == Exists ==
    /// Counts how many of the given keys hold live entries.
    pub async fn exists(&self, keys: &[String]) -> u64 {
        let entries = self.entries.read().await;
        keys.iter()
            .filter(|key| entries.get(*key).is_some_and(|entry| !entry.is_expired()))
            .count() as u64
    }

    // == TTL ==
    /// Remaining seconds for `key`: `-2` when absent, `-1` when it never expires.
    pub async fn ttl(&self, key: &str) -> i64 {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => entry
                .ttl_remaining()
                .map_or(-1, |secs| i64::try_from(secs).unwrap_or(i64::MAX)),
            _ => -2,
        }
    }

    // == Keys ==
    /// Lists live keys matching `pattern`, sorted.
    pub async fn matching_keys(&self, pattern: &GlobPattern) -> Vec<String> {
        let now = current_timestamp_ms();

        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired_at(now) && pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        trace!(pattern = pattern.as_str(), matched = keys.len(), "key scan");
        keys
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of held entries, expired ones not yet swept included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidRequest(
            "ERR key cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(StoreError::InvalidRequest(format!(
            "ERR key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_value(key).await)
    }

    async fn setex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()> {
        self.set(key, value, Some(ttl_seconds)).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self.matching_keys(&GlobPattern::new(pattern)?).await)
    }

    async fn del(&self, keys: &[String]) -> Result<u64> {
        Ok(self.delete(keys).await)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("match:42", "{\"score\":2}", Some(300)).await.unwrap();

        assert_eq!(
            store.get_value("match:42").await.as_deref(),
            Some("{\"score\":2}")
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert!(store.get_value("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrite_resets_value() {
        let store = MemoryStore::new();

        store.set("team:7", "\"old\"", Some(60)).await.unwrap();
        store.set("team:7", "\"new\"", None).await.unwrap();

        assert_eq!(store.get_value("team:7").await.as_deref(), Some("\"new\""));
        assert_eq!(store.ttl("team:7").await, -1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_ttl_expiration() {
        let store = MemoryStore::new();

        store.setex("live:1", 1, "\"1-0\"").await.unwrap();
        assert!(store.get_value("live:1").await.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store.get_value("live:1").await.is_none());
        assert!(store.is_empty().await, "expired entry removed on read");
    }

    #[tokio::test]
    async fn test_store_delete_counts_existing_only() {
        let store = MemoryStore::new();

        store.set("a:1", "1", None).await.unwrap();
        store.set("a:2", "2", None).await.unwrap();

        let removed = store.delete(&keys(&["a:1", "a:2", "a:3"])).await;
        assert_eq!(removed, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_exists_and_ttl() {
        let store = MemoryStore::new();

        store.set("seasons:all", "[]", Some(86_400)).await.unwrap();

        assert_eq!(store.exists(&keys(&["seasons:all", "missing"])).await, 1);
        let ttl = store.ttl("seasons:all").await;
        assert!((86_399..=86_400).contains(&ttl));
        assert_eq!(store.ttl("missing").await, -2);
    }

    #[tokio::test]
    async fn test_store_matching_keys() {
        let store = MemoryStore::new();

        for key in ["fixtures:today", "fixtures:tomorrow", "stats:x"] {
            store.set(key, "{}", Some(60)).await.unwrap();
        }

        let glob = |pattern: &str| GlobPattern::new(pattern).unwrap();

        assert_eq!(
            store.matching_keys(&glob("fixtures:*")).await,
            keys(&["fixtures:today", "fixtures:tomorrow"])
        );
        assert_eq!(store.matching_keys(&glob("*")).await.len(), 3);
        assert!(store.matching_keys(&glob("nothing:*")).await.is_empty());
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let store = MemoryStore::new();

        store.set("short", "1", Some(1)).await.unwrap();
        store.set("long", "2", Some(10)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let removed = store.cleanup_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get_value("long").await.is_some());
    }

    #[tokio::test]
    async fn test_store_rejects_bad_input() {
        let store = MemoryStore::new();

        let empty = store.set("", "v", None).await;
        assert!(matches!(empty, Err(StoreError::InvalidRequest(_))));

        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        let too_long = store.set(&long_key, "v", None).await;
        assert!(matches!(too_long, Err(StoreError::InvalidRequest(_))));

        let large_value = "x".repeat(MAX_VALUE_SIZE + 1);
        let too_large = store.set("k", &large_value, None).await;
        assert!(matches!(too_large, Err(StoreError::InvalidRequest(_))));

        let zero_ttl = store.setex("k", 0, "v").await;
        assert!(matches!(zero_ttl, Err(StoreError::InvalidRequest(_))));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set("article:derby-recap", "{}", None).await.unwrap();
        assert!(clone.get_value("article:derby-recap").await.is_some());
    }
}
