//! Engine-wide error type.
//!
//! All public entry points surface failures through [`EngineError`]. Every
//! variant is structural: a well-formed game never produces one, so callers
//! should treat them as bugs rather than recoverable conditions.

use thiserror::Error;

use crate::domain::state::GamePhase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown seat {0}")]
    UnknownSeat(u8),

    #[error("operation requires phase {expected:?}, game is in {actual:?}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("kitty swap requires a hand of {expected} cards, seat holds {actual}")]
    WrongHandSize { expected: usize, actual: usize },

    #[error("selected card is not in the seat's hand")]
    SelectionNotInHand,

    #[error("selection has {actual} cards, expected {expected}")]
    SelectionSizeMismatch { expected: usize, actual: usize },

    #[error("hand has cards but no legal play was found")]
    NoLegalPlay,

    #[error("invalid game state: {0}")]
    InvalidState(String),
}

impl EngineError {
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }
}
