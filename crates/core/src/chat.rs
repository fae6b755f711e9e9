//! Chat types - messages exchanged with the backend and the graph
//! context cited alongside replies

use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person typing into the workbench
    User,
    /// The backend's reply
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn in the conversation, held only in session memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One graph edge the backend cites as justification for a reply.
/// Display data only, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdgeContext {
    /// Source node name (the "from" side)
    pub source: String,

    /// Target node name (the "to" side)
    pub target: String,

    /// Relationship label, e.g. COMPETES_WITH
    pub relationship: String,

    /// Optional one-line summary of the fact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl std::fmt::Display for GraphEdgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source, self.target)
    }
}

/// Body of a chat request. The history includes the user message that
/// triggered the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

/// A reply from the backend plus the graph edges that justify it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    pub reply: String,
    #[serde(default)]
    pub context: Vec<GraphEdgeContext>,
}
