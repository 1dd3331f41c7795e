//! Core LLM client types and trait definitions

use std::time::Duration;

use async_trait::async_trait;

/// Stateless generation client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single generation request (blocking until complete)
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Everything needed for one generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from a generation request
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Raw text content, expected to be a campaign JSON document
    pub content: String,

    /// Token usage as reported by the provider, zero if unreported
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Errors that can occur during LLM operations.
///
/// The orchestrator never retries; [`LlmError::is_retryable`] classifies
/// failures as transient vs fatal so outer callers can.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

impl LlmError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::MissingApiKey { .. } => false,
        }
    }
}

/// Rough token estimation (actual tokenization varies)
/// ~4 characters per token on average for English text
pub fn estimate_tokens(text: &str) -> u64 {
    (text.len() / 4) as u64
}
