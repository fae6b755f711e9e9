//! Same-origin relay for the backend chat endpoint
//!
//! Exists so a browser-facing origin never needs to know the backend's
//! location or credentials. POST /api/chat is a pure pass-through: the
//! body is forwarded unchanged and the upstream status, content-type,
//! and body are mirrored verbatim. No retries, no validation.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Content type asserted when the upstream omits the header. A literal
/// default, not inferred from the body.
const FALLBACK_CONTENT_TYPE: &str = "application/json";

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Proxy configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the backend chat service
    pub backend_base_url: String,
    /// Address the proxy listens on
    pub listen_addr: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            backend_base_url: env_or_default("BACKEND_API_BASE_URL", DEFAULT_BACKEND_BASE_URL),
            listen_addr: env_or_default("PROXY_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    backend_base_url: String,
}

impl AppState {
    pub fn new(backend_base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_base_url: backend_base_url.into(),
        }
    }
}

/// Build the proxy router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(forward_chat))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health - liveness probe
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/chat - forward the body unchanged and mirror the upstream
/// response. Never propagates an error past this boundary.
async fn forward_chat(State(state): State<AppState>, body: Bytes) -> Response {
    let url = format!("{}/api/chat", state.backend_base_url);

    debug!("Forwarding {} byte chat request", body.len());

    let upstream = match state
        .client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!("Failed to forward chat request: {}", e);
            return bad_gateway();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string();

    match upstream.bytes().await {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => {
            warn!("Failed to read upstream response body: {}", e);
            bad_gateway()
        }
    }
}

fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "message": "Unable to reach backend chat service"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        std::env::remove_var("BACKEND_API_BASE_URL");
        std::env::remove_var("PROXY_LISTEN_ADDR");

        let config = ProxyConfig::from_env();
        assert_eq!(config.backend_base_url, "http://localhost:8000");
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
    }
}
