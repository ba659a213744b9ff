//! REST key-value binding.
//!
//! Talks to an Upstash-compatible command endpoint: every command is a JSON
//! array `POST`ed to the store URL with a bearer token, answered by
//! `{"result": ...}` on success or `{"error": "..."}` on failure.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::trace;

use crate::error::{Result, StoreError};
use crate::store::{escape_glob, KvStore};

/// HTTP client for a REST key-value store.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    url: Url,
}

impl RestStore {
    /// Builds a client for `url`, authenticating with `token`.
    ///
    /// Fails with [`StoreError::InvalidConfig`] when the URL does not parse or
    /// the token is not a valid header value.
    pub fn new(url: &str, token: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| StoreError::InvalidConfig(format!("store URL '{url}': {e}")))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| StoreError::InvalidConfig(format!("store token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self { http, url })
    }

    /// Store endpoint this client talks to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends one command and returns its `result` field.
    pub async fn command(&self, args: &[&str]) -> Result<Value> {
        trace!(command = args.first().copied().unwrap_or_default(), "store command");

        let response = self.http.post(self.url.clone()).json(args).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(StoreError::Unauthorized);
        }

        let reply: Value = serde_json::from_str(&text)
            .map_err(|_| StoreError::InvalidResponse(format!("HTTP {status}: {text}")))?;

        if let Some(message) = reply.get("error").and_then(Value::as_str) {
            return Err(StoreError::Server(message.to_string()));
        }
        if !status.is_success() {
            return Err(StoreError::Server(format!("HTTP {status}")));
        }

        match reply {
            Value::Object(mut fields) => fields
                .remove("result")
                .ok_or_else(|| StoreError::InvalidResponse("missing 'result' field".to_string())),
            other => Err(StoreError::InvalidResponse(format!(
                "expected an object, got {other}"
            ))),
        }
    }
}

#[async_trait]
impl KvStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(value) => Ok(Some(value)),
            other => Err(StoreError::InvalidResponse(format!(
                "GET returned {other}"
            ))),
        }
    }

    async fn setex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()> {
        let ttl = ttl_seconds.to_string();
        self.command(&["SETEX", key, &ttl, value]).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = escape_glob(pattern);
        let result = self.command(&["KEYS", &pattern]).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn del(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut args = Vec::with_capacity(keys.len() + 1);
        args.push("DEL");
        args.extend(keys.iter().map(String::as_str));

        self.command(&args)
            .await?
            .as_u64()
            .ok_or_else(|| StoreError::InvalidResponse("DEL returned a non-integer".to_string()))
    }
}
