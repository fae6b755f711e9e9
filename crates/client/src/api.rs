//! HTTP client for the backend chat and ingest endpoints

use crate::{ClientError, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use workbench_core::{ChatMessage, ChatRequest, ChatResult, IngestRequest, IngestResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Client for the graph RAG backend service
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Default client: base URL from API_BASE_URL, or localhost
    pub fn default_local() -> Self {
        Self::new(env_or_default("API_BASE_URL", DEFAULT_API_BASE_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat message. The history must already include the user
    /// message being sent (the backend sees the full conversation).
    #[instrument(skip(self, history))]
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<ChatResult> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
        };

        debug!("Sending chat request with {} history turns", request.history.len());

        let response = self.client.post(&url).json(&request).send().await?;
        handle_response(response).await
    }

    /// Ingest free text into the knowledge graph
    #[instrument(skip(self, text))]
    pub async fn ingest(&self, text: &str, source: Option<String>) -> Result<IngestResult> {
        let url = format!("{}/api/ingest", self.base_url);
        let request = IngestRequest::new(text, source);

        debug!("Ingesting {} chars", request.text.len());

        let response = self.client.post(&url).json(&request).send().await?;
        handle_response(response).await
    }

    /// Health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        Ok(response.status().is_success())
    }
}

/// Shared success/failure contract: non-success statuses surface the
/// response body text verbatim; success bodies must parse as T.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = if body.trim().is_empty() {
            "Request failed".to_string()
        } else {
            body
        };
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
