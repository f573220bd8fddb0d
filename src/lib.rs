// Askdoc - document question-answering web service

pub mod answer;
pub mod chunk;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod render;
pub mod routes;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use store::DocumentStore;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
