//! Error types for the game engine.
//!
//! Nothing in the engine is fatal. Every variant here is a domain-level
//! rejection: the action is refused, state is left untouched, and the
//! `Display` text doubles as the feedback message shown to the player.

use thiserror::Error;

use crate::catalog::GameKind;
use crate::session::Lifecycle;

/// Rejections raised by engines, rules and the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Action or tick arrived while the game is not running.
    #[error("game is not running (currently {0})")]
    NotRunning(Lifecycle),

    /// `start()` called on a game that is already in progress.
    #[error("game is already running")]
    AlreadyRunning,

    /// The instance has been closed and cannot be restarted.
    #[error("game has been closed")]
    Closed,

    /// Input arrived during a feedback window or a reveal phase.
    #[error("input is not accepted right now")]
    InputBlocked,

    /// Chosen index is outside the offered options.
    #[error("choice {index} is out of range (0..{len})")]
    InvalidChoice { index: usize, len: usize },

    /// Not enough budget for the chosen action.
    #[error("not enough budget: need {cost}, have {budget}")]
    InsufficientBudget { cost: u32, budget: u32 },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A game kind was registered twice in a catalog.
    #[error("game {0} is already registered")]
    DuplicateGame(GameKind),
}

impl GameError {
    /// Shorthand for [`GameError::InvalidConfig`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_read_as_feedback() {
        let err = GameError::InsufficientBudget { cost: 6, budget: 4 };
        assert_eq!(err.to_string(), "not enough budget: need 6, have 4");

        let err = GameError::InvalidChoice { index: 5, len: 4 };
        assert_eq!(err.to_string(), "choice 5 is out of range (0..4)");

        let err = GameError::NotRunning(Lifecycle::Ended);
        assert_eq!(err.to_string(), "game is not running (currently ended)");
    }

    #[test]
    fn test_config_shorthand() {
        assert_eq!(
            GameError::config("grid must not be empty"),
            GameError::InvalidConfig("grid must not be empty".to_string())
        );
    }
}
