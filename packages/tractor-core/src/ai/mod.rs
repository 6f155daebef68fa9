//! AI decision pipeline.
//!
//! Three entry points, each taking a full game state plus the acting seat:
//!
//! - [`AiEngine::choose_play`]: the seat's next lead or follow.
//! - [`AiEngine::choose_kitty_swap`]: the eight cards to bury.
//! - [`AiEngine::evaluate_declaration`]: whether to call trump while
//!   dealing.
//!
//! The pipeline is stateless across invocations apart from the memory
//! cache, which only ever holds derived data and can be dropped at will.
//! [`AiEngine`] owns that cache per session; the free functions build a
//! throwaway engine for one-shot calls.

mod config;
pub mod context;
pub mod declaration;
pub mod following;
pub mod kitty;
pub mod leading;
pub mod memory;
mod plays;

mod tests_positions;
mod tests_props_selectors;
mod tests_scenarios;

use std::sync::Mutex;

use tracing::warn;

use crate::domain::cards::{Card, Suit};
use crate::domain::follow;
use crate::domain::state::{GamePhase, GameState, Seat, HAND_SIZE, KITTY_SIZE};
use crate::error::EngineError;

pub use config::AiConfig;
pub use memory::{CardMemory, MemoryCache};

pub struct AiEngine {
    config: AiConfig,
    cache: Mutex<MemoryCache>,
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

impl AiEngine {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(MemoryCache::new()),
        }
    }

    /// Pick the seat's next play: 1..n cards to lead or follow with.
    ///
    /// An empty hand returns an empty selection (and logs); callers are
    /// expected not to ask an exhausted seat to play.
    pub fn choose_play(&self, state: &GameState, seat: Seat) -> Result<Vec<Card>, EngineError> {
        state.require_phase(GamePhase::Playing)?;
        let hand = state.hand(seat)?;
        if hand.is_empty() {
            warn!(seat, "play requested from an exhausted seat");
            return Ok(Vec::new());
        }

        let memory = match self.cache.lock() {
            Ok(mut cache) => cache.memory_for(state),
            // A poisoned cache only costs the rebuild.
            Err(_) => CardMemory::from_state(state),
        };
        let ctx = context::build_context(state, seat)?;

        let play = match &state.current_trick {
            None => leading::choose_lead(state, seat, &ctx, &memory)?,
            Some(trick) => {
                let play = following::choose_follow(state, seat, &ctx, &memory, &self.config)?;
                if !follow::is_legal_play(&trick.lead_play().cards, hand, &play, &state.trump) {
                    return Err(EngineError::NoLegalPlay);
                }
                play
            }
        };

        if play.is_empty() {
            return Err(EngineError::NoLegalPlay);
        }
        Ok(play)
    }

    /// Pick exactly eight cards to bury from the 33-card post-deal hand.
    pub fn choose_kitty_swap(
        &self,
        state: &GameState,
        seat: Seat,
    ) -> Result<Vec<Card>, EngineError> {
        state.require_phase(GamePhase::KittySwap)?;
        let hand = state.hand(seat)?;
        if hand.len() != HAND_SIZE + KITTY_SIZE {
            return Err(EngineError::WrongHandSize {
                expected: HAND_SIZE + KITTY_SIZE,
                actual: hand.len(),
            });
        }

        let selection = kitty::select_kitty(hand, &state.trump);

        if selection.len() != KITTY_SIZE {
            return Err(EngineError::invalid_state(format!(
                "kitty selection has {} cards",
                selection.len()
            )));
        }
        let mut remaining = hand.to_vec();
        for card in &selection {
            match remaining.iter().position(|c| c == card) {
                Some(idx) => {
                    remaining.swap_remove(idx);
                }
                None => {
                    return Err(EngineError::invalid_state(
                        "kitty selection includes a card not in hand",
                    ))
                }
            }
        }
        if remaining.len() != HAND_SIZE {
            return Err(EngineError::invalid_state(
                "kitty swap does not leave a 25-card hand",
            ));
        }
        Ok(selection)
    }

    /// Whether the seat should declare trump right now, and with which
    /// suit. Valid in any phase; abstains outside the declaration window.
    pub fn evaluate_declaration(
        &self,
        state: &GameState,
        seat: Seat,
    ) -> Result<Option<Suit>, EngineError> {
        state.player(seat)?;
        if !matches!(state.phase, GamePhase::Dealing | GamePhase::Declaring) {
            return Ok(None);
        }
        declaration::evaluate_declaration(state, seat)
    }
}

/// One-shot [`AiEngine::choose_play`] without a persistent cache.
pub fn choose_play(state: &GameState, seat: Seat) -> Result<Vec<Card>, EngineError> {
    AiEngine::default().choose_play(state, seat)
}

/// One-shot [`AiEngine::choose_kitty_swap`].
pub fn choose_kitty_swap(state: &GameState, seat: Seat) -> Result<Vec<Card>, EngineError> {
    AiEngine::default().choose_kitty_swap(state, seat)
}

/// One-shot [`AiEngine::evaluate_declaration`].
pub fn evaluate_declaration(
    state: &GameState,
    seat: Seat,
) -> Result<Option<Suit>, EngineError> {
    AiEngine::default().evaluate_declaration(state, seat)
}
