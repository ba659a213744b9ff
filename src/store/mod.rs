//! Store Module
//!
//! The key-value protocol the cache consumes, plus its two bindings:
//! a REST client for managed stores and an in-process TTL map.

mod entry;
mod memory;
mod pattern;
mod rest;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use pattern::{escape_glob, GlobPattern};
pub use rest::RestStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key-Value Protocol ==
/// Minimal point-to-point protocol of a TTL key-value store.
///
/// Values are opaque serialized strings; expiry is enforced by the store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the stored value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    async fn setex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()>;

    /// Lists live keys matching a `*` glob pattern.
    ///
    /// `*` is the only wildcard; every other character, `?` and `[` included,
    /// matches itself.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Deletes the given keys, returning how many existed.
    async fn del(&self, keys: &[String]) -> Result<u64>;
}
