use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::store::NoteStore;
use crate::notes::types::{Note, new_note_id};

/// Process-local `NoteStore` backed by a concurrent map.
///
/// Follows the same identity rules as the database adapter. Contents are
/// lost on restart.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: DashMap<Uuid, Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn append(&self, body: String) -> anyhow::Result<()> {
        let note = Note {
            id: new_note_id(),
            body,
            created_at: Utc::now(),
        };
        tracing::debug!("Stored note {} in memory", note.id);
        self.notes.insert(note.id, note);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(notes)
    }
}
