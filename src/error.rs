//! Error types for Planr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::llm::LlmError;
use crate::validation::Violation;

/// All error types that can occur in Planr
#[derive(Debug, Error)]
pub enum PlanrError {
    /// Input brief failed validation
    #[error("Invalid brief: {0}")]
    Brief(String),

    /// Generated campaign contradicts its brief
    #[error("Consistency check failed: {0}")]
    Consistency(Violation),

    /// Generation output could not be parsed as a campaign
    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Prompt template rendering error
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Planr operations
pub type Result<T> = std::result::Result<T, PlanrError>;
