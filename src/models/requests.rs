//! Request DTOs for the development server
//!
//! Parses REST command arrays and admin request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, StoreError};

/// One key-value command, decoded from a JSON array such as
/// `["SETEX", "match:42", "300", "{...}"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Get { key: String },
    Set { key: String, value: String, ttl: Option<u64> },
    SetEx { key: String, ttl: u64, value: String },
    Keys { pattern: String },
    Del { keys: Vec<String> },
    Exists { keys: Vec<String> },
    Ttl { key: String },
}

impl Command {
    /// Decodes a command array. Names are case-insensitive; numbers and
    /// booleans are accepted where strings are expected.
    pub fn parse(args: Vec<Value>) -> Result<Self> {
        let mut args = args
            .into_iter()
            .map(|arg| match arg {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(StoreError::InvalidRequest(format!(
                    "ERR invalid argument {other}"
                ))),
            })
            .collect::<Result<Vec<String>>>()?
            .into_iter();

        let name = args
            .next()
            .ok_or_else(|| StoreError::InvalidRequest("ERR empty command".to_string()))?
            .to_ascii_uppercase();
        let rest: Vec<String> = args.collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("PING", []) => Command::Ping,
            ("GET", [key]) => Command::Get { key: key.clone() },
            ("SET", [key, value]) => Command::Set {
                key: key.clone(),
                value: value.clone(),
                ttl: None,
            },
            ("SET", [key, value, option, secs]) if option.eq_ignore_ascii_case("EX") => {
                Command::Set {
                    key: key.clone(),
                    value: value.clone(),
                    ttl: Some(parse_seconds(secs)?),
                }
            }
            ("SET", [_, _, ..]) => {
                return Err(StoreError::InvalidRequest("ERR syntax error".to_string()))
            }
            ("SETEX", [key, secs, value]) => Command::SetEx {
                key: key.clone(),
                ttl: parse_seconds(secs)?,
                value: value.clone(),
            },
            ("KEYS", [pattern]) => Command::Keys {
                pattern: pattern.clone(),
            },
            ("DEL", keys) if !keys.is_empty() => Command::Del {
                keys: keys.to_vec(),
            },
            ("EXISTS", keys) if !keys.is_empty() => Command::Exists {
                keys: keys.to_vec(),
            },
            ("TTL", [key]) => Command::Ttl { key: key.clone() },
            ("PING" | "GET" | "SET" | "SETEX" | "KEYS" | "DEL" | "EXISTS" | "TTL", _) => {
                return Err(StoreError::InvalidRequest(format!(
                    "ERR wrong number of arguments for '{}' command",
                    name.to_ascii_lowercase()
                )))
            }
            _ => {
                return Err(StoreError::InvalidRequest(format!(
                    "ERR unknown command '{name}'"
                )))
            }
        };

        Ok(command)
    }
}

fn parse_seconds(raw: &str) -> Result<u64> {
    raw.parse().map_err(|_| {
        StoreError::InvalidRequest("ERR value is not an integer or out of range".to_string())
    })
}

/// Request body for POST /invalidate
///
/// Exactly one of `pattern` or `key` must be given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    /// Glob pattern, e.g. `fixtures:*`
    #[serde(default)]
    pub pattern: Option<String>,
    /// Single key, e.g. `match:42`
    #[serde(default)]
    pub key: Option<String>,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match (&self.pattern, &self.key) {
            (Some(_), Some(_)) => Some("Provide either 'pattern' or 'key', not both".to_string()),
            (None, None) => Some("Provide 'pattern' or 'key'".to_string()),
            (Some(p), None) if p.is_empty() => Some("Pattern cannot be empty".to_string()),
            (None, Some(k)) if k.is_empty() => Some("Key cannot be empty".to_string()),
            _ => None,
        }
    }
}
