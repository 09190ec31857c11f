//! LLM Gateway port
//!
//! Defines the interface for requesting one completion from an LLM provider.
//! The raw HTTP client is an adapter concern; the brain only sees this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Gateway for LLM communication
///
/// Timeouts are applied by the caller, so implementations should not add
/// their own deadline shorter than the configured generation timeout.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the raw response text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
