//! Document listing and upload

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::models::{AppState, DocumentListResponse};
use crate::render;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app", get(index))
        .route("/upload", post(upload))
        .route("/api/documents", get(list_documents))
        .with_state(state)
}

/// GET / - render the document list page
async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let documents = state.store.list().await?;
    Ok(Html(render::index_page(&documents, None)))
}

/// GET /api/documents - JSON listing of stored documents
async fn list_documents(
    State(state): State<AppState>,
) -> AppResult<Json<DocumentListResponse>> {
    let documents = state.store.list().await?;
    Ok(Json(DocumentListResponse { documents }))
}

/// POST /upload - store a single multipart file and redirect to the listing
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("failed to read multipart field: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::InvalidRequest("upload is missing a filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("failed to read upload: {e}")))?;

        let stored = state.store.save(&filename, &data).await?;
        info!(original = %filename, stored = %stored, "document uploaded");
    }

    Ok(Redirect::to("/"))
}
