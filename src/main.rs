use notes_api::config::{Backend, Config};
use notes_api::notes::handlers::router;
use notes_api::storage::memory::MemoryNoteStore;
use notes_api::storage::scylla::ScyllaNoteStore;
use notes_api::storage::store::NoteStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::load()?;

    // 1. Storage:
    let store: Arc<dyn NoteStore> = match config.backend {
        Backend::Scylla => {
            tracing::info!(
                "Using ScyllaDB at {} (keyspace {})",
                config.scylla_uri,
                config.keyspace
            );
            Arc::new(
                ScyllaNoteStore::connect(&config.scylla_uri, &config.keyspace, config.init_schema)
                    .await?,
            )
        }
        Backend::Memory => {
            tracing::warn!("Using in-memory store, notes will not survive a restart");
            Arc::new(MemoryNoteStore::new())
        }
    };

    // 2. HTTP Router:
    let app = router(store);

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
