use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use askdoc::llm::OpenAiClient;
use askdoc::{create_router, AppState, Config, DocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Prepare the upload directory
    let store = DocumentStore::new(&config.storage.upload_dir);
    store.ensure_dir().await?;
    info!(dir = %store.root().display(), "upload directory ready");

    // Completion endpoint client
    let llm = OpenAiClient::new(&config.llm.api_key, &config.llm.model)
        .with_base_url(&config.llm.base_url);

    // Create shared state
    let state = AppState {
        config: config.clone(),
        store,
        llm: Arc::new(llm),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
