//! Note Storage Module
//!
//! Separates the HTTP layer from the database behind the `NoteStore` trait.
//!
//! ## Core Concepts
//! - **Port**: `NoteStore` offers append and list. Implementations assign note ids and timestamps.
//! - **ScyllaDB adapter**: `ScyllaNoteStore` maps both operations onto CQL statements
//!   against a single `notes` table.
//! - **In-memory adapter**: `MemoryNoteStore` keeps notes in a `DashMap`, for tests and
//!   database-less runs.

pub mod memory;
pub mod scylla;
pub mod store;
