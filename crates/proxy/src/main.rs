//! Graph RAG Workbench chat proxy

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use workbench_proxy::{router, AppState, ProxyConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env();
    let addr: std::net::SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;

    tracing::info!("Forwarding chat requests to {}", config.backend_base_url);
    tracing::info!("Listening on http://{}", addr);

    let app = router(AppState::new(config.backend_base_url));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
