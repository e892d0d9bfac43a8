//! Error types for sentiment analysis operations

use thiserror::Error;

/// Sentiment analysis specific errors
#[derive(Debug, Error)]
pub enum SentifyError {
    /// Backend request failed or returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generative model call failed
    #[error("LLM error: {0}")]
    Llm(#[from] sentify_llm::LLMError),

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown time range code
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    /// Unknown sentiment label
    #[error("Invalid sentiment label: {0}")]
    InvalidSentiment(String),

    /// A model answered, but not in the expected shape
    #[error("Malformed response from {model}: {reason}")]
    MalformedResponse {
        model: String,
        reason: String,
    },

    /// Results belong to a run that has since been superseded
    #[error("Run {ticket} is stale (current run is {current})")]
    StaleRun {
        ticket: u64,
        current: u64,
    },
}

/// Result type alias for sentiment operations
pub type Result<T> = std::result::Result<T, SentifyError>;
