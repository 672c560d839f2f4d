//! Open Trivia DB source implementation.
//!
//! Talks to the opentdb.com JSON API:
//! `GET /api.php?amount=10&difficulty=easy&category=9&type=multiple`.
//!
//! The provider HTML-encodes payload text and splits each question's
//! choices into `correct_answer` and `incorrect_answers`; both quirks are
//! flattened here so the session only ever sees plain [`Question`]s.

use async_trait::async_trait;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::core::config::DEFAULT_OPENTDB_BASE_URL;
use crate::trivia::source::{FetchRequest, QuestionSource, SourceError};
use crate::trivia::types::{Question, QuestionBatch};

// ============================================================================
// Open Trivia DB API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct ApiResponse {
    /// Zero means success; every other code is a rejection of the request.
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Deserialize, Debug)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl ApiQuestion {
    /// Decodes entities and assembles the shuffled option list.
    fn into_question(self) -> Question {
        let correct = decode_entities(&self.correct_answer);
        let mut options: Vec<String> = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_entities(answer))
            .collect();
        options.push(correct.clone());
        options.shuffle(&mut rand::rng());
        Question {
            text: decode_entities(&self.question),
            correct_answer: correct,
            options,
        }
    }
}

/// Response codes documented by the provider.
fn rejection_message(code: u8) -> String {
    match code {
        1 => "not enough questions exist for this category and difficulty".to_string(),
        2 => "the provider rejected the request parameters".to_string(),
        3 | 4 => "the provider session token is missing or exhausted".to_string(),
        other => format!("unknown provider response code {other}"),
    }
}

// ============================================================================
// Entity Decoding
// ============================================================================

/// Replaces the HTML entities the provider emits with plain characters.
/// Covers the common named entities plus numeric escapes like `&#039;`;
/// anything unrecognized is left as-is.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        // Entities are short; a ';' further out than 9 bytes is unrelated.
        let semicolon = rest.find(';').filter(|&end| end <= 9);
        let decoded = semicolon.and_then(|end| decode_entity(&rest[1..end]).map(|d| (d, end)));
        match decoded {
            Some((decoded, end)) => {
                out.push_str(&decoded);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "quot" => "\"",
        "apos" => "'",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "nbsp" => " ",
        "lsquo" | "rsquo" => "'",
        "ldquo" | "rdquo" => "\"",
        "hellip" => "...",
        "ndash" | "mdash" => "--",
        _ => "",
    };
    if !named.is_empty() {
        return Some(named.to_string());
    }
    let code = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))?;
    char::from_u32(code).map(|c| c.to_string())
}

// ============================================================================
// Source Implementation
// ============================================================================

/// Question source backed by the Open Trivia DB API.
pub struct OpenTdbSource {
    base_url: String,
    client: reqwest::Client,
}

impl OpenTdbSource {
    /// Creates a new Open Trivia DB source.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to opentdb.com)
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENTDB_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Sends the request and returns the raw response once the HTTP status
    /// checks out.
    async fn send_request(&self, request: &FetchRequest) -> Result<reqwest::Response, SourceError> {
        info!(
            "Open Trivia DB request: amount={}, difficulty={}, category={}",
            request.amount, request.difficulty, request.category_id
        );

        let response = self
            .client
            .get(format!("{}/api.php", self.base_url))
            .query(&[
                ("amount", request.amount.to_string()),
                ("difficulty", request.difficulty.as_str().to_string()),
                ("category", request.category_id.to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("Open Trivia DB response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Open Trivia DB API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    async fn fetch(&self, request: FetchRequest) -> Result<QuestionBatch, SourceError> {
        let response = self.send_request(&request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let payload: ApiResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        if payload.response_code != 0 {
            warn!(
                "Open Trivia DB rejected the request: code {}",
                payload.response_code
            );
            return Err(SourceError::Rejected(rejection_message(payload.response_code)));
        }
        if payload.results.len() != request.amount {
            return Err(SourceError::Insufficient {
                requested: request.amount,
                received: payload.results.len(),
            });
        }

        let questions: Vec<Question> = payload
            .results
            .into_iter()
            .map(ApiQuestion::into_question)
            .collect();
        info!("Fetched {} questions from Open Trivia DB", questions.len());
        Ok(QuestionBatch::new(questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode_entities("&quot;Hello&quot; isn&#039;t &amp; &lt;tag&gt;"),
            "\"Hello\" isn't & <tag>"
        );
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("caf&#233;"), "café");
        assert_eq!(decode_entities("caf&#xE9;"), "café");
    }

    #[test]
    fn test_unrecognized_entities_pass_through() {
        assert_eq!(decode_entities("AT&T & &bogus; &"), "AT&T & &bogus; &");
    }

    #[test]
    fn test_typographic_entities_become_ascii() {
        assert_eq!(decode_entities("it&rsquo;s &ldquo;fine&rdquo;"), "it's \"fine\"");
    }

    #[test]
    fn test_into_question_contains_correct_answer_once() {
        let api = ApiQuestion {
            question: "What is 2+2?".to_string(),
            correct_answer: "4".to_string(),
            incorrect_answers: vec!["3".to_string(), "5".to_string(), "22".to_string()],
        };
        let question = api.into_question();
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.options.iter().filter(|o| *o == "4").count(), 1);
        let mut sorted = question.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["22", "3", "4", "5"]);
    }

    #[test]
    fn test_rejection_messages_are_specific() {
        assert!(rejection_message(1).contains("not enough questions"));
        assert!(rejection_message(99).contains("99"));
    }
}
