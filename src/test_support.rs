//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::trivia::source::{FetchRequest, QuestionSource, SourceError};
use crate::trivia::types::{Question, QuestionBatch};

/// Builds a deterministic batch of `n` questions. Question `i` is answered
/// correctly with `"right {i}"`.
pub fn sample_batch(n: usize) -> QuestionBatch {
    let questions = (0..n)
        .map(|i| Question {
            text: format!("Question {i}?"),
            correct_answer: format!("right {i}"),
            options: vec![
                format!("wrong {i}a"),
                format!("right {i}"),
                format!("wrong {i}b"),
                format!("wrong {i}c"),
            ],
        })
        .collect();
    QuestionBatch::new(questions)
}

/// A source that serves the same canned batch on every fetch.
pub struct CannedSource {
    pub batch: QuestionBatch,
}

#[async_trait]
impl QuestionSource for CannedSource {
    fn name(&self) -> &str {
        "canned"
    }

    async fn fetch(&self, _request: FetchRequest) -> Result<QuestionBatch, SourceError> {
        Ok(self.batch.clone())
    }
}
