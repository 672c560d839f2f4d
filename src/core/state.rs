//! # Selection State
//!
//! The pre-game choice of category and difficulty, plus the guard that
//! keeps a game from starting until both are set. The selection lives on
//! the controller and resets the moment a batch request goes out.

use std::fmt;

use crate::trivia::types::Difficulty;

/// The pre-game category and difficulty choice. Both fields start unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl Selection {
    /// Checks that both fields are chosen, returning the pair so the start
    /// path never touches an unchecked `Option`.
    pub fn validate(&self) -> Result<(String, Difficulty), SelectionError> {
        match (&self.category, self.difficulty) {
            (Some(category), Some(difficulty)) => Ok((category.clone(), difficulty)),
            _ => Err(SelectionError::MissingSelection),
        }
    }
}

/// Rejection of a start request with an incomplete selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    MissingSelection,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::MissingSelection => {
                write!(f, "Please select a difficulty and a category before starting game")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_fails() {
        assert_eq!(
            Selection::default().validate(),
            Err(SelectionError::MissingSelection)
        );
    }

    #[test]
    fn test_either_missing_field_fails() {
        let only_category = Selection {
            category: Some("History".to_string()),
            difficulty: None,
        };
        assert!(only_category.validate().is_err());

        let only_difficulty = Selection {
            category: None,
            difficulty: Some(Difficulty::Hard),
        };
        assert!(only_difficulty.validate().is_err());
    }

    #[test]
    fn test_complete_selection_returns_the_pair() {
        let selection = Selection {
            category: Some("History".to_string()),
            difficulty: Some(Difficulty::Medium),
        };
        assert_eq!(
            selection.validate(),
            Ok(("History".to_string(), Difficulty::Medium))
        );
    }

    #[test]
    fn test_error_message_is_user_facing() {
        assert_eq!(
            SelectionError::MissingSelection.to_string(),
            "Please select a difficulty and a category before starting game"
        );
    }
}
