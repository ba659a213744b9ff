//! Cache Module
//!
//! Cache-aside reads over a key-value store, with pattern invalidation,
//! prefix statistics and the per-category TTL/key table.

mod accessor;
mod invalidation;
mod provider;
mod single_flight;
mod stats;
pub mod strategy;


// Re-export public types
pub use accessor::{CacheAccessor, DEFAULT_STORE_TIMEOUT, DEFAULT_TTL_SECONDS};
pub use provider::StoreProvider;
pub use single_flight::KeyLocks;
pub use stats::{key_prefix, CacheStatsSnapshot};
pub use strategy::{keys, CacheCategory, CacheStrategy, TtlPolicy};
