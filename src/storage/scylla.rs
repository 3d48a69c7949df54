use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{Stream, TryStreamExt};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::prepared::PreparedStatement;
use scylla::value::CqlTimeuuid;
use tokio::sync::OnceCell;

use super::store::NoteStore;
use crate::config::validate_keyspace;
use crate::notes::types::{Note, new_note_id};

/// Name of the table holding notes inside the configured keyspace.
pub const NOTES_TABLE: &str = "notes";

/// `NoteStore` backed by a ScyllaDB (or Cassandra) cluster.
///
/// One session is opened at startup and shared by every request; the driver
/// handles connection pooling and concurrent use internally. Statements are
/// prepared on first use, so a missing table shows up as a failed request
/// rather than a failed startup.
pub struct ScyllaNoteStore {
    session: Session,
    keyspace: String,
    insert_note: OnceCell<PreparedStatement>,
    select_notes: OnceCell<PreparedStatement>,
}

impl ScyllaNoteStore {
    /// Opens a session against `uri`.
    ///
    /// With `init_schema` set the keyspace and table are created first.
    /// Otherwise the schema is not checked here at all.
    pub async fn connect(uri: &str, keyspace: &str, init_schema: bool) -> Result<Self> {
        validate_keyspace(keyspace)?;

        let session = SessionBuilder::new()
            .known_node(uri)
            .build()
            .await
            .with_context(|| format!("Failed to connect to ScyllaDB at {}", uri))?;
        tracing::info!("Connected to ScyllaDB at {}", uri);

        if init_schema {
            ensure_schema(&session, keyspace).await?;
        }

        Ok(Self {
            session,
            keyspace: keyspace.to_string(),
            insert_note: OnceCell::new(),
            select_notes: OnceCell::new(),
        })
    }

    async fn insert_statement(&self) -> Result<&PreparedStatement> {
        self.insert_note
            .get_or_try_init(|| async {
                self.session
                    .prepare(format!(
                        "INSERT INTO {}.{} (id, body, created_at) VALUES (?, ?, ?)",
                        self.keyspace, NOTES_TABLE
                    ))
                    .await
                    .context("Failed to prepare note insert")
            })
            .await
    }

    async fn select_statement(&self) -> Result<&PreparedStatement> {
        self.select_notes
            .get_or_try_init(|| async {
                self.session
                    .prepare(format!(
                        "SELECT id, body, created_at FROM {}.{}",
                        self.keyspace, NOTES_TABLE
                    ))
                    .await
                    .context("Failed to prepare note scan")
            })
            .await
    }
}

/// Creates the keyspace and notes table if they do not exist yet.
///
/// Uses `SimpleStrategy` with a single replica, which suits a local node.
/// Production clusters are expected to provision the keyspace themselves.
pub async fn ensure_schema(session: &Session, keyspace: &str) -> Result<()> {
    validate_keyspace(keyspace)?;

    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                keyspace
            ),
            (),
        )
        .await
        .with_context(|| format!("Failed to create keyspace {}", keyspace))?;

    session
        .query_unpaged(
            format!(
                "CREATE TABLE IF NOT EXISTS {}.{} (\
                 id timeuuid PRIMARY KEY, \
                 body text, \
                 created_at timestamp)",
                keyspace, NOTES_TABLE
            ),
            (),
        )
        .await
        .with_context(|| format!("Failed to create table {}.{}", keyspace, NOTES_TABLE))?;

    tracing::info!("Schema ready: {}.{}", keyspace, NOTES_TABLE);
    Ok(())
}

#[async_trait]
impl NoteStore for ScyllaNoteStore {
    async fn append(&self, body: String) -> Result<()> {
        let id = new_note_id();
        let created_at = Utc::now();

        let insert = self.insert_statement().await?;
        self.session
            .execute_unpaged(
                insert,
                (CqlTimeuuid::from(id), body, created_at),
            )
            .await
            .context("Failed to insert note")?;

        tracing::debug!("Inserted note {}", id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let select = self.select_statement().await?;
        let rows = self
            .session
            .execute_iter(select.clone(), ())
            .await
            .context("Failed to scan notes")?
            .rows_stream::<NoteRow>()
            .context("Unexpected notes table layout")?;

        collect_notes(rows).await
    }
}

type NoteRow = (CqlTimeuuid, String, DateTime<Utc>);

/// Drains a row stream into notes. The first bad row fails the whole scan and
/// nothing read before it is returned.
async fn collect_notes<S, E>(mut rows: S) -> Result<Vec<Note>>
where
    S: Stream<Item = std::result::Result<NoteRow, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut notes = Vec::new();
    while let Some((id, body, created_at)) =
        rows.try_next().await.context("Failed to read note row")?
    {
        notes.push(Note {
            id: id.into(),
            body,
            created_at,
        });
    }

    Ok(notes)
}
