//! API Module
//!
//! HTTP handlers and routing for the development key-value server.
//!
//! # Endpoints
//! - `POST /` - Execute a key-value command
//! - `GET /stats` - Keys grouped by prefix
//! - `POST /invalidate` - Invalidate a pattern or a key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
