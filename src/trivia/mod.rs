//! # Question Fetching
//!
//! The external collaborator boundary: a [`QuestionSource`] asynchronously
//! turns a category/difficulty pair into a fixed-size [`QuestionBatch`].
//! The session core never talks HTTP itself; it only hands out fetch
//! requests and consumes their outcomes.

pub mod opentdb;
pub mod source;
pub mod types;

pub use opentdb::OpenTdbSource;
pub use source::{FetchRequest, QuestionSource, SourceError};
pub use types::{Difficulty, Question, QuestionBatch};
