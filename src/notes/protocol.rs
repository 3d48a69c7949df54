//! Notes HTTP Protocol
//!
//! Endpoint paths and the Data Transfer Objects (DTOs) exchanged with clients.

use serde::{Deserialize, Serialize};

/// Greeting endpoint.
pub const ENDPOINT_ROOT: &str = "/";
/// Create (`POST`) and list (`GET`) endpoint for notes.
pub const ENDPOINT_NOTE: &str = "/note";

/// Fixed body returned by `GET /`.
pub const GREETING: &str = "Hello world";

/// Payload of `POST /note`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub body: String,
}

/// Acknowledgement returned after a successful write.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            message: "ok".to_string(),
        }
    }
}

/// Envelope used by `GET /note` when the store cannot be read.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
