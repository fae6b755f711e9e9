//! Core domain types for the Graph RAG Workbench
//!
//! This crate defines the data exchanged with the backend service:
//! chat messages, graph edge context, and ingestion results. Everything
//! here is ephemeral display data scoped to a single session.

pub mod chat;
pub mod ingest;

pub use chat::{ChatMessage, ChatRequest, ChatResult, ChatRole, GraphEdgeContext};
pub use ingest::{IngestRequest, IngestResult};
