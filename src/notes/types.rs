//! Note Data Types
//!
//! The persisted `Note` record and its identifier scheme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// A stored note.
///
/// `id` and `created_at` are assigned by the storage layer when the note is
/// appended; notes are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Version-1 (time-based) UUID.
    pub id: Uuid,
    pub body: String,
    /// Write time, as observed by the storage layer.
    pub created_at: DateTime<Utc>,
}

/// Generates a new time-ordered note id.
///
/// The node part is random and fixed for the lifetime of the process.
pub fn new_note_id() -> Uuid {
    static NODE_ID: OnceLock<[u8; 6]> = OnceLock::new();
    let node_id = NODE_ID.get_or_init(rand::random::<[u8; 6]>);
    Uuid::now_v1(node_id)
}
