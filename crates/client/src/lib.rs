//! HTTP client for the Graph RAG backend
//!
//! Thin request helpers only: every call is a single best-effort POST
//! with pass-through error surfacing. Reasoning, entity resolution, and
//! graph storage all live in the backend service.

pub mod api;
pub mod error;

pub use api::ApiClient;
pub use error::{ClientError, Result};
