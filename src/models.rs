use std::sync::Arc;

use crate::config::Config;
use crate::llm::ChatApi;
use crate::store::DocumentStore;

/// Shared application state, owned by the process entry point and cloned
/// into each handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,
    pub llm: Arc<dyn ChatApi>,
}

// API Request/Response types

/// Form posted to `/ask`. Field names match the browser form.
#[derive(Debug, serde::Deserialize)]
pub struct AskForm {
    #[serde(rename = "documentName")]
    pub document_name: String,
    pub question: String,
}

#[derive(Debug, serde::Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
