//! Request and Response models for the development server
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Command, InvalidateRequest};
pub use responses::{CommandResponse, HealthResponse, InvalidateResponse};
