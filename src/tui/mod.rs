//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! and translates keyboard events into session controller calls.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! question fetch runs on a background tokio task; its outcome comes back
//! over a channel tagged with the ticket epoch, so the controller can
//! drop results that belong to an abandoned game.

mod event;
mod ui;

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use log::info;

use crate::core::categories;
use crate::core::config::ResolvedConfig;
use crate::core::session::{FetchTicket, PhaseTag, SessionController, Snapshot};
use crate::trivia::types::{Difficulty, QuestionBatch};
use crate::trivia::{OpenTdbSource, QuestionSource, SourceError};
use crate::tui::event::{TuiEvent, poll_event};

/// Which selector list has keyboard focus on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Difficulty,
    Category,
}

/// TUI-specific presentation state (not part of core session logic)
pub struct TuiState {
    pub focus: Focus,
    pub difficulty_row: usize,
    pub category_row: usize,
    pub option_row: usize,
    /// Question number last seen, used to reset `option_row` when the
    /// session moves on.
    last_question: usize,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Difficulty,
            difficulty_row: 0,
            category_row: 0,
            option_row: 0,
            last_question: 0,
        }
    }

    fn sync(&mut self, snapshot: &Snapshot<'_>) {
        if snapshot.question_number != self.last_question {
            self.last_question = snapshot.question_number;
            self.option_row = 0;
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one background fetch, tagged with its ticket epoch.
struct FetchOutcome {
    epoch: u64,
    result: Result<QuestionBatch, SourceError>,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn QuestionSource> =
        Arc::new(OpenTdbSource::new(Some(config.opentdb_base_url.clone())));
    run_with_source(config, source)
}

fn run_with_source(config: ResolvedConfig, source: Arc<dyn QuestionSource>) -> std::io::Result<()> {
    let mut controller = SessionController::new(config.total_questions);
    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();

    // Channel for fetch outcomes from background tasks
    let (tx, rx) = mpsc::channel::<FetchOutcome>();

    let start_time = std::time::Instant::now();
    let mut should_quit = false;

    while !should_quit {
        for outcome in rx.try_iter() {
            controller.finish_loading(outcome.epoch, outcome.result);
        }

        let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
        {
            let snapshot = controller.snapshot();
            tui.sync(&snapshot);
            terminal.draw(|f| ui::draw_ui(f, &snapshot, &tui, spinner_frame))?;
        }

        // Short timeout while the spinner animates, relaxed otherwise
        let timeout = if controller.phase() == PhaseTag::Loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let Some(event) = poll_event(timeout) else {
            continue;
        };
        match event {
            TuiEvent::Quit => should_quit = true,
            TuiEvent::Resize => {}
            other => handle_event(other, &mut controller, &mut tui, &source, &tx),
        }
    }

    ratatui::restore();
    info!("Happy Hour Trivia shutting down");
    Ok(())
}

fn handle_event(
    event: TuiEvent,
    controller: &mut SessionController,
    tui: &mut TuiState,
    source: &Arc<dyn QuestionSource>,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    match controller.phase() {
        PhaseTag::Idle | PhaseTag::Selecting | PhaseTag::Complete => {
            handle_selection_event(event, controller, tui, source, tx);
        }
        PhaseTag::Active => handle_question_event(event, controller, tui),
        // Keys do nothing while the fetch is in flight
        PhaseTag::Loading => {}
    }
}

fn handle_selection_event(
    event: TuiEvent,
    controller: &mut SessionController,
    tui: &mut TuiState,
    source: &Arc<dyn QuestionSource>,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    let category_names = categories::sorted_names();
    match event {
        TuiEvent::SwitchFocus => {
            tui.focus = match tui.focus {
                Focus::Difficulty => Focus::Category,
                Focus::Category => Focus::Difficulty,
            };
        }
        TuiEvent::Up => match tui.focus {
            Focus::Difficulty => tui.difficulty_row = tui.difficulty_row.saturating_sub(1),
            Focus::Category => tui.category_row = tui.category_row.saturating_sub(1),
        },
        TuiEvent::Down => match tui.focus {
            Focus::Difficulty => {
                tui.difficulty_row = (tui.difficulty_row + 1).min(Difficulty::ALL.len() - 1);
            }
            Focus::Category => {
                tui.category_row = (tui.category_row + 1).min(category_names.len() - 1);
            }
        },
        TuiEvent::Confirm => match tui.focus {
            Focus::Difficulty => {
                controller.select_difficulty(Difficulty::ALL[tui.difficulty_row]);
            }
            Focus::Category => {
                if let Some(name) = category_names.get(tui.category_row).copied() {
                    controller.select_category(name);
                }
            }
        },
        TuiEvent::Start => {
            if let Some(ticket) = controller.start() {
                spawn_fetch(ticket, Arc::clone(source), tx.clone());
            }
        }
        _ => {}
    }
}

fn handle_question_event(event: TuiEvent, controller: &mut SessionController, tui: &mut TuiState) {
    let option_count = controller
        .snapshot()
        .question
        .map(|q| q.options.len())
        .unwrap_or(0);
    match event {
        TuiEvent::Up => tui.option_row = tui.option_row.saturating_sub(1),
        TuiEvent::Down if option_count > 0 => {
            tui.option_row = (tui.option_row + 1).min(option_count - 1);
        }
        TuiEvent::Confirm => {
            let picked = controller
                .snapshot()
                .question
                .and_then(|q| q.options.get(tui.option_row))
                .cloned();
            if let Some(option) = picked {
                controller.submit_answer(&option);
            }
        }
        TuiEvent::Next => controller.advance(),
        _ => {}
    }
}

fn spawn_fetch(ticket: FetchTicket, source: Arc<dyn QuestionSource>, tx: mpsc::Sender<FetchOutcome>) {
    tokio::spawn(async move {
        let result = source.fetch(ticket.request).await;
        // The receiver is gone only when the TUI already shut down
        let _ = tx.send(FetchOutcome {
            epoch: ticket.epoch,
            result,
        });
    });
}
