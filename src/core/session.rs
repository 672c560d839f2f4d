//! # Session State Machine
//!
//! `SessionController` owns the authoritative session state and is the
//! single entry point for every game event. UI adapters send events in,
//! read a [`Snapshot`] back out, and never mutate session data directly.
//!
//! ```text
//! ┌──────┐ select   ┌───────────┐  start   ┌─────────┐  batch ok  ┌────────┐
//! │ Idle │─────────▶│ Selecting │─────────▶│ Loading │───────────▶│ Active │
//! └──────┘          └───────────┘          └─────────┘            └───┬────┘
//!                         ▲                     │          answer/advance │
//!                         └──── fetch failed ───┘                   ┌────▼─────┐
//!                                   start (new game) ◀──────────────│ Complete │
//!                                                                   └──────────┘
//! ```
//!
//! The fetch itself happens outside the controller: `start()` hands back a
//! [`FetchTicket`] and the caller drives a
//! [`QuestionSource`](crate::trivia::QuestionSource), reporting the outcome
//! through `finish_loading()`. Every ticket carries an epoch; an outcome
//! whose epoch no longer matches is dropped, so an abandoned fetch can
//! never clobber a newer session.

use log::{debug, info, warn};

use crate::core::answers::{AnswerLog, AnswerRecord};
use crate::core::categories;
use crate::core::state::Selection;
use crate::trivia::source::{FetchRequest, SourceError};
use crate::trivia::types::{Difficulty, Question, QuestionBatch};

/// Where the session currently stands. The batch and log only exist while
/// a game is underway, so stale combinations (a finished game that is
/// also loading, say) cannot be expressed.
#[derive(Debug)]
enum Phase {
    Idle,
    Selecting,
    Loading,
    Active {
        index: usize,
        batch: QuestionBatch,
        log: AnswerLog,
    },
    Complete {
        batch: QuestionBatch,
        log: AnswerLog,
    },
}

/// Discriminant of the session phase, exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTag {
    Idle,
    Selecting,
    Loading,
    Active,
    Complete,
}

/// Read-only view of the session for rendering. Borrowed, never stored.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub tag: PhaseTag,
    pub selection: &'a Selection,
    pub error: Option<&'a str>,
    pub total_questions: usize,
    /// 1-based display number of the current question; 0 outside a game.
    pub question_number: usize,
    pub question: Option<&'a Question>,
    /// The record for the current question, once it has been answered.
    pub answered: Option<&'a AnswerRecord>,
    pub log: Option<&'a AnswerLog>,
    pub score: usize,
}

/// Instruction to run one fetch on behalf of the controller. The epoch
/// must be echoed back through [`SessionController::finish_loading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub request: FetchRequest,
}

pub struct SessionController {
    phase: Phase,
    selection: Selection,
    error: Option<String>,
    total_questions: usize,
    /// Bumped on every accepted start; fetch outcomes carrying an older
    /// value are discarded.
    epoch: u64,
}

impl SessionController {
    pub fn new(total_questions: usize) -> Self {
        Self {
            phase: Phase::Idle,
            selection: Selection::default(),
            error: None,
            total_questions,
            epoch: 0,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn phase(&self) -> PhaseTag {
        match self.phase {
            Phase::Idle => PhaseTag::Idle,
            Phase::Selecting => PhaseTag::Selecting,
            Phase::Loading => PhaseTag::Loading,
            Phase::Active { .. } => PhaseTag::Active,
            Phase::Complete { .. } => PhaseTag::Complete,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The answer log of the running or finished game, if any.
    pub fn answer_log(&self) -> Option<&AnswerLog> {
        match &self.phase {
            Phase::Active { log, .. } | Phase::Complete { log, .. } => Some(log),
            _ => None,
        }
    }

    /// Current score: the number of correct records in the log. Zero
    /// outside a game.
    pub fn score(&self) -> usize {
        self.answer_log().map(AnswerLog::correct_count).unwrap_or(0)
    }

    /// Records a category choice. Ignored while a fetch is in flight or a
    /// game is underway; names missing from the category table are
    /// ignored outright.
    pub fn select_category(&mut self, name: &str) {
        if !self.selectable() {
            return;
        }
        if categories::category_id(name).is_none() {
            warn!("Ignoring unknown category {name:?}");
            return;
        }
        self.selection.category = Some(name.to_string());
        self.touch_selecting();
    }

    /// Records a difficulty choice. Ignored while a fetch is in flight or
    /// a game is underway.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if !self.selectable() {
            return;
        }
        self.selection.difficulty = Some(difficulty);
        self.touch_selecting();
    }

    fn selectable(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Selecting | Phase::Complete { .. })
    }

    /// First selector touch promotes Idle to Selecting. Complete stays
    /// Complete: starting a new game is its only exit.
    fn touch_selecting(&mut self) {
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Selecting;
        }
    }

    /// Handles a start request, returning the fetch to run when the
    /// request is accepted.
    ///
    /// An incomplete selection sets the user-facing error and leaves the
    /// phase alone. A start while a fetch is already in flight or a game
    /// is underway is ignored.
    pub fn start(&mut self) -> Option<FetchTicket> {
        match self.phase {
            Phase::Loading => {
                debug!("Ignoring start request: fetch already in flight");
                return None;
            }
            Phase::Active { .. } => {
                debug!("Ignoring start request: game in progress");
                return None;
            }
            Phase::Idle | Phase::Selecting | Phase::Complete { .. } => {}
        }

        let (category, difficulty) = match self.selection.validate() {
            Ok(pair) => pair,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };
        let category_id = match categories::category_id(&category) {
            Some(id) => id,
            None => {
                warn!("Selected category {category:?} vanished from the table");
                self.error = Some(format!("Unknown category: {category}"));
                return None;
            }
        };

        self.epoch += 1;
        self.phase = Phase::Loading;
        self.selection = Selection::default();
        info!(
            "Starting game: category={category:?} ({category_id}), difficulty={difficulty}, questions={}",
            self.total_questions
        );
        Some(FetchTicket {
            epoch: self.epoch,
            request: FetchRequest {
                amount: self.total_questions,
                difficulty,
                category_id,
            },
        })
    }

    /// Applies the outcome of the fetch issued by [`start`](Self::start).
    /// Outcomes from an abandoned fetch (epoch mismatch, or the controller
    /// already left Loading) are dropped.
    pub fn finish_loading(&mut self, epoch: u64, outcome: Result<QuestionBatch, SourceError>) {
        if epoch != self.epoch || !matches!(self.phase, Phase::Loading) {
            debug!("Dropping stale fetch outcome (epoch {epoch}, current {})", self.epoch);
            return;
        }

        // A batch shorter than the session can hold is as useless as no
        // batch at all.
        let outcome = outcome.and_then(|batch| {
            if batch.len() == self.total_questions {
                Ok(batch)
            } else {
                Err(SourceError::Insufficient {
                    requested: self.total_questions,
                    received: batch.len(),
                })
            }
        });

        match outcome {
            Ok(batch) => {
                info!("Batch of {} questions ready", batch.len());
                self.error = None;
                self.phase = Phase::Active {
                    index: 0,
                    batch,
                    log: AnswerLog::new(),
                };
            }
            Err(e) => {
                warn!("Question fetch failed: {e}");
                self.error = Some(format!("Could not load questions: {e}"));
                self.phase = Phase::Selecting;
            }
        }
    }

    /// Records the answer for the current question. A question that
    /// already has a record keeps its first answer; later submissions are
    /// no-ops.
    pub fn submit_answer(&mut self, option: &str) {
        let Phase::Active { index, batch, log } = &mut self.phase else {
            return;
        };
        if log.is_answered(*index) {
            debug!("Ignoring repeat answer for question {}", index);
            return;
        }
        let Some(question) = batch.get(*index) else {
            return;
        };
        let record = AnswerRecord {
            question_index: *index,
            question: question.text.clone(),
            given_answer: option.to_string(),
            is_correct: option == question.correct_answer,
            correct_answer: question.correct_answer.clone(),
        };
        debug!(
            "Question {} answered {}",
            index,
            if record.is_correct { "correctly" } else { "incorrectly" }
        );
        if let Err(e) = log.append(record) {
            warn!("Answer for question {} not recorded: {e}", index);
        }
    }

    /// Moves to the next question, or ends the game after the last one.
    /// Ignored until the current question has been answered.
    pub fn advance(&mut self) {
        let Phase::Active { index, batch, log } = &mut self.phase else {
            return;
        };
        if !log.is_answered(*index) {
            debug!("Ignoring advance: question {} is unanswered", index);
            return;
        }
        if *index + 1 < batch.len() {
            *index += 1;
            return;
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Active { batch, log, .. } => {
                info!("Game complete: {}/{} correct", log.correct_count(), batch.len());
                self.phase = Phase::Complete { batch, log };
            }
            _ => unreachable!("advance only runs in Active"),
        }
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let (question, answered, question_number) = match &self.phase {
            Phase::Active { index, batch, log } => {
                (batch.get(*index), log.get(*index), *index + 1)
            }
            _ => (None, None, 0),
        };
        Snapshot {
            tag: self.phase(),
            selection: &self.selection,
            error: self.error.as_deref(),
            total_questions: self.total_questions,
            question_number,
            question,
            answered,
            log: self.answer_log(),
            score: self.score(),
        }
    }
}
