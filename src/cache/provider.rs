//! Store handle acquisition.
//!
//! A provider builds the store client on first use and hands out the same
//! handle afterwards. Missing settings or a failed build leave the cache in
//! passthrough mode rather than failing the caller.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::config::Config;
use crate::store::{KvStore, RestStore};

enum Source {
    Rest { url: String, token: String },
    Injected(Arc<dyn KvStore>),
    Disabled,
}

/// Lazily initialized, memoized store handle.
pub struct StoreProvider {
    source: Source,
    handle: OnceLock<Option<Arc<dyn KvStore>>>,
}

impl StoreProvider {
    /// Provider for the REST store named by `KV_REST_API_URL` and
    /// `KV_REST_API_TOKEN`; disabled when either is absent.
    pub fn from_config(config: &Config) -> Self {
        match (&config.kv_rest_url, &config.kv_rest_token) {
            (Some(url), Some(token)) => Self::rest(url.clone(), token.clone()),
            _ => Self::disabled(),
        }
    }

    /// Provider for a REST store, built on first use.
    pub fn rest(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::from_source(Source::Rest {
            url: url.into(),
            token: token.into(),
        })
    }

    /// Provider around an already constructed store.
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self::from_source(Source::Injected(store))
    }

    /// Provider that never yields a store.
    pub fn disabled() -> Self {
        Self::from_source(Source::Disabled)
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            handle: OnceLock::new(),
        }
    }

    /// Returns the store handle, or `None` when caching is unavailable.
    pub fn handle(&self) -> Option<Arc<dyn KvStore>> {
        self.handle.get_or_init(|| self.connect()).clone()
    }

    /// True when a handle is (or would be) available.
    pub fn is_enabled(&self) -> bool {
        self.handle().is_some()
    }

    fn connect(&self) -> Option<Arc<dyn KvStore>> {
        match &self.source {
            Source::Rest { url, token } => match RestStore::new(url, token) {
                Ok(store) => {
                    info!(url = %store.url(), "cache store connected");
                    Some(Arc::new(store))
                }
                Err(error) => {
                    warn!(%error, "cache store unavailable, reads go straight to the fetcher");
                    None
                }
            },
            Source::Injected(store) => Some(Arc::clone(store)),
            Source::Disabled => {
                info!("cache store not configured, caching disabled");
                None
            }
        }
    }
}

impl fmt::Debug for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Rest { url, .. } => format!("Rest({url})"),
            Source::Injected(_) => "Injected".to_string(),
            Source::Disabled => "Disabled".to_string(),
        };
        f.debug_struct("StoreProvider")
            .field("source", &source)
            .field("initialized", &self.handle.get().is_some())
            .finish()
    }
}
