use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::protocol::{
    CreateNoteRequest, ENDPOINT_NOTE, ENDPOINT_ROOT, ErrorResponse, GREETING, MessageResponse,
};
use crate::storage::store::NoteStore;

/// Builds the HTTP router over the given store.
pub fn router(store: Arc<dyn NoteStore>) -> Router {
    Router::new()
        .route(ENDPOINT_ROOT, get(handle_root))
        .route(
            ENDPOINT_NOTE,
            get(handle_list_notes).post(handle_create_note),
        )
        .layer(Extension(store))
}

pub async fn handle_root() -> &'static str {
    GREETING
}

/// `POST /note`
///
/// A body that fails to decode never reaches this function: axum answers with
/// the extractor's own rejection. Storage failures are logged and reported as
/// a bare 500 without the underlying message.
pub async fn handle_create_note(
    Extension(store): Extension<Arc<dyn NoteStore>>,
    Json(req): Json<CreateNoteRequest>,
) -> Response {
    match store.append(req.body).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::ok())).into_response(),
        Err(e) => {
            tracing::error!("Failed to append note: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// `GET /note`
///
/// Read failures are reported with a 200 status and an `error` field, unlike
/// write failures.
pub async fn handle_list_notes(Extension(store): Extension<Arc<dyn NoteStore>>) -> Response {
    match store.list().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::warn!("Failed to list notes: {:#}", e);
            (
                StatusCode::OK,
                Json(ErrorResponse {
                    error: format!("{:#}", e),
                }),
            )
                .into_response()
        }
    }
}
