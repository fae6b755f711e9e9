//! Ingestion types - payloads sent to the backend's ingest endpoint
//! and the summary it returns

use serde::{Deserialize, Serialize};

/// Body of an ingest request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Unstructured text to feed into the graph
    pub text: String,

    /// Optional provenance label, e.g. "Wikipedia: Kubernetes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl IngestRequest {
    /// Create a request, treating a blank source label as absent
    pub fn new(text: impl Into<String>, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            source: source.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// What the backend reports after an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResult {
    pub message: String,
    #[serde(default)]
    pub entities: Vec<String>,
}

impl IngestResult {
    /// Comma-joined entity list for display, or "None" when empty
    pub fn entities_display(&self) -> String {
        if self.entities.is_empty() {
            "None".to_string()
        } else {
            self.entities.join(", ")
        }
    }
}
