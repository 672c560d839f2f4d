use std::fmt;

use async_trait::async_trait;

use super::types::{Difficulty, QuestionBatch};

/// Errors that can occur while fetching a question batch.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Provider returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response. Not retryable.
    Parse(String),
    /// Provider answered but declined the request, e.g. too few questions
    /// exist for the requested category at that difficulty. Not retryable
    /// without changing the selection.
    Rejected(String),
    /// Provider returned fewer questions than requested.
    Insufficient { requested: usize, received: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
            SourceError::Rejected(msg) => write!(f, "request rejected: {msg}"),
            SourceError::Insufficient { requested, received } => {
                write!(f, "short batch: asked for {requested} questions, got {received}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Everything a source needs to assemble one question batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Number of questions to fetch. Always > 0.
    pub amount: usize,
    pub difficulty: Difficulty,
    /// Provider id from the static category table.
    pub category_id: u16,
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetches exactly `request.amount` questions, or fails.
    async fn fetch(&self, request: FetchRequest) -> Result<QuestionBatch, SourceError>;
}
