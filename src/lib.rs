//! Matchday Cache - cache-aside reads for sports content accessors
//!
//! Wraps slow backend queries (teams, matches, standings, articles, moments)
//! in a read-through cache over a TTL key-value store, falling back to the
//! query itself whenever the store is missing or failing. Ships a local
//! development server that speaks the same REST command protocol.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheAccessor, CacheCategory, CacheStatsSnapshot, StoreProvider, TtlPolicy};
pub use config::Config;
pub use error::StoreError;
pub use store::{KvStore, MemoryStore, RestStore};
pub use tasks::spawn_cleanup_task;
