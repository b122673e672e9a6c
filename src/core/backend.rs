//! The seam between the renderer and whatever produces text.

use crate::error::BackendError;

/// One generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    /// Model identifier understood by the backend
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

/// A generative text backend.
///
/// Any error is treated the same way by the renderer: the scenario falls back
/// to its template.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
