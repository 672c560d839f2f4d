//! # Core Session Logic
//!
//! This module contains the trivia session's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SessionController    │
//!                    │  • AnswerLog / score    │
//!                    │  • Selection guard      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Question  │      │    Web     │
//!     │  Adapter   │      │   Source   │      │  (future)  │
//!     │ (ratatui)  │      │ (opentdb)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`]: the `SessionController` state machine
//! - [`state`]: the category/difficulty selection and its guard
//! - [`answers`]: the append-only answer log and scoring
//! - [`categories`]: the static provider category table
//! - [`config`]: user configuration

pub mod answers;
pub mod categories;
pub mod config;
pub mod session;
pub mod state;
