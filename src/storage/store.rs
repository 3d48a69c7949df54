use async_trait::async_trait;

use crate::notes::types::Note;

/// Persistence capability consumed by the HTTP layer.
///
/// Implementations own note identity and creation time: callers only ever
/// hand over the body text.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persists a new note with a freshly generated id and `created_at`.
    async fn append(&self, body: String) -> anyhow::Result<()>;

    /// Returns every stored note.
    ///
    /// Order is whatever the backend produces. A failure partway through the
    /// scan fails the whole call.
    async fn list(&self) -> anyhow::Result<Vec<Note>>;
}
