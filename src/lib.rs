//! Notes API Library
//!
//! Core modules of the notes service. The binary (`main.rs`) only wires them
//! together.
//!
//! ## Architecture Modules
//! - **`config`**: Startup settings from defaults, environment variables and flags.
//! - **`notes`**: The HTTP surface: routes, handlers, DTOs and the `Note` record.
//! - **`storage`**: The `NoteStore` trait plus its ScyllaDB and in-memory adapters.

pub mod config;
pub mod notes;
pub mod storage;
