//! HTTP routes
//!
//! - `GET /` (and `/app`) - document list page
//! - `POST /upload` - multipart file upload
//! - `POST /ask` - question submission, renders the answer
//! - `GET /api/documents` - JSON listing
//! - `GET /api/health` - health check

pub mod ask;
pub mod documents;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(documents::router(state.clone()))
        .merge(ask::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
}
