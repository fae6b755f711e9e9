//! Panel state machines for the workbench console
//!
//! Each panel is a plain struct with explicit transitions: idle →
//! sending → idle, or idle → sending → error-shown. The in-flight flag
//! is the single-flight guard; while it is set the trigger is a no-op.

use workbench_core::{ChatMessage, ChatResult, GraphEdgeContext, IngestRequest, IngestResult};

/// Conversation state for the chat panel
#[derive(Debug, Default)]
pub struct ChatPanel {
    pub history: Vec<ChatMessage>,
    pub context: Vec<GraphEdgeContext>,
    pub sending: bool,
    pub error: Option<String>,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a send. Whitespace-only input or an in-flight request is a
    /// no-op. Otherwise the trimmed user message joins the history and
    /// is returned for submission.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() || self.sending {
            return None;
        }

        self.history.push(ChatMessage::user(message));
        self.sending = true;
        self.error = None;
        Some(message.to_string())
    }

    /// Record a successful reply: the assistant message joins the
    /// history and the context list is replaced, not appended.
    pub fn complete(&mut self, result: ChatResult) {
        self.history.push(ChatMessage::assistant(result.reply));
        self.context = result.context;
        self.sending = false;
    }

    /// Record a failed send. The unanswered user message stays in the
    /// history and the context is left as it was.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.sending = false;
    }

    /// Clear history, context, and error unconditionally
    pub fn reset(&mut self) {
        self.history.clear();
        self.context.clear();
        self.error = None;
        self.sending = false;
    }
}

/// Input state for the ingestion form
#[derive(Debug, Default)]
pub struct IngestForm {
    pub text: String,
    pub source: String,
    pub submitting: bool,
    pub result: Option<IngestResult>,
    pub error: Option<String>,
}

impl IngestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submit. Whitespace-only text or an in-flight request is
    /// a no-op. A blank source label is sent as absent.
    pub fn begin_submit(&mut self) -> Option<IngestRequest> {
        if self.text.trim().is_empty() || self.submitting {
            return None;
        }

        self.submitting = true;
        self.error = None;
        Some(IngestRequest::new(
            self.text.trim(),
            Some(self.source.clone()),
        ))
    }

    /// Record a successful ingest and clear both inputs
    pub fn complete(&mut self, result: IngestResult) {
        self.result = Some(result);
        self.text.clear();
        self.source.clear();
        self.submitting = false;
    }

    /// Record a failed ingest, preserving the inputs for retry
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.submitting = false;
    }
}
