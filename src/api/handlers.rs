//! API Handlers
//!
//! HTTP request handlers for the development key-value server.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheAccessor, CacheStatsSnapshot};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{Command, CommandResponse, HealthResponse, InvalidateRequest, InvalidateResponse};
use crate::store::{GlobPattern, MemoryStore};

/// Application state shared across all handlers.
///
/// The accessor is bound to the served store, so the admin routes report on
/// and invalidate the same entries the command endpoint serves.
#[derive(Clone)]
pub struct AppState {
    /// Served key-value store
    pub store: MemoryStore,
    /// Accessor over `store`, used by the admin routes
    pub cache: Arc<CacheAccessor>,
    /// Bearer token required on the command endpoint, if any
    pub auth_token: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new AppState serving the given store without authentication.
    pub fn new(store: MemoryStore) -> Self {
        let cache = CacheAccessor::with_store(Arc::new(store.clone()));
        Self {
            store,
            cache: Arc::new(cache),
            auth_token: None,
        }
    }

    /// Requires `Authorization: Bearer <token>` on the command endpoint.
    pub fn with_auth_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let state = Self::new(MemoryStore::new());
        match &config.server_token {
            Some(token) => state.with_auth_token(token.as_str()),
            None => state,
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<()> {
        let Some(token) = &self.auth_token else {
            return Ok(());
        };

        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match presented {
            Some(presented) if presented == &**token => Ok(()),
            _ => Err(StoreError::Unauthorized),
        }
    }
}

/// Handler for POST /
///
/// Executes one key-value command given as a JSON array.
pub async fn command_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(args): Json<Vec<Value>>,
) -> Result<Json<CommandResponse>> {
    state.authorize(&headers)?;

    let command = Command::parse(args)?;
    debug!(?command, "executing command");

    let store = &state.store;
    let response = match command {
        Command::Ping => CommandResponse::new("PONG"),
        Command::Get { key } => {
            CommandResponse::new(store.get_value(&key).await.map_or(Value::Null, Value::String))
        }
        Command::Set { key, value, ttl } => {
            store.set(&key, &value, ttl).await?;
            CommandResponse::ok()
        }
        Command::SetEx { key, ttl, value } => {
            store.set(&key, &value, Some(ttl)).await?;
            CommandResponse::ok()
        }
        Command::Keys { pattern } => {
            CommandResponse::new(store.matching_keys(&GlobPattern::from_escaped(&pattern)?).await)
        }
        Command::Del { keys } => CommandResponse::new(store.delete(&keys).await),
        Command::Exists { keys } => CommandResponse::new(store.exists(&keys).await),
        Command::Ttl { key } => CommandResponse::new(store.ttl(&key).await),
    };

    Ok(Json(response))
}

/// Handler for GET /stats
///
/// Returns the served store's keys grouped by prefix.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<CacheStatsSnapshot>> {
    state
        .cache
        .cache_stats()
        .await
        .map(Json)
        .ok_or_else(|| StoreError::Server("cache statistics unavailable".to_string()))
}

/// Handler for POST /invalidate
///
/// Invalidates a glob pattern or a single key.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let target = if let Some(pattern) = req.pattern {
        state.cache.invalidate_cache(&pattern).await;
        pattern
    } else {
        let key = req.key.unwrap_or_default();
        state.cache.invalidate_cache_key(&key).await;
        key
    };

    Ok(Json(InvalidateResponse::new(target)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
