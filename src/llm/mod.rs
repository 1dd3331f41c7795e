//! Generation collaborator boundary
//!
//! This module provides:
//! - Request/response types for one generation call
//! - LlmClient trait for API abstraction
//! - OpenAiClient implementation
//! - MockLlmClient for offline runs and tests

pub mod client;
pub mod mock;
pub mod openai;

pub use client::{
    GenerationRequest, GenerationResponse, LlmClient, LlmError, TokenUsage, estimate_tokens,
};
pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, OpenAiConfig};
