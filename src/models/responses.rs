//! Response DTOs for the development server
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

/// Successful reply of the command endpoint (POST /)
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    /// Command result: string, integer, array or null
    pub result: Value,
}

impl CommandResponse {
    /// Creates a new CommandResponse
    pub fn new(result: impl Into<Value>) -> Self {
        Self {
            result: result.into(),
        }
    }

    /// The `"OK"` reply of write commands
    pub fn ok() -> Self {
        Self::new("OK")
    }
}

/// Response body for POST /invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The pattern or key that was invalidated
    pub target: String,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            message: format!("Invalidated '{}'", target),
            target,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_response_shapes() {
        let ok = serde_json::to_value(CommandResponse::ok()).unwrap();
        assert_eq!(ok, json!({"result": "OK"}));

        let null = serde_json::to_value(CommandResponse::new(Value::Null)).unwrap();
        assert_eq!(null, json!({"result": null}));

        let keys = serde_json::to_value(CommandResponse::new(vec!["a:1", "a:2"])).unwrap();
        assert_eq!(keys, json!({"result": ["a:1", "a:2"]}));

        let count = serde_json::to_value(CommandResponse::new(2u64)).unwrap();
        assert_eq!(count, json!({"result": 2}));
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("fixtures:*");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("fixtures:*"));
        assert!(json.contains("Invalidated"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
