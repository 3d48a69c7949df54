//! Notes HTTP Module
//!
//! Exposes the note create/list API on top of a `NoteStore`.
//!
//! ## Submodules
//! - **`handlers`**: Axum request handlers and the router that wires them.
//! - **`protocol`**: Endpoint paths and request/response DTOs.
//! - **`types`**: The persisted `Note` record and id generation.

pub mod handlers;
pub mod protocol;
pub mod types;
