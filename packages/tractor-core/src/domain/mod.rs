//! Domain layer: pure rules of the game, no strategy.

pub mod cards;
pub mod combos;
pub mod dealing;
pub mod follow;
pub mod scoring;
pub mod state;
pub mod tricks;
pub mod trump;

mod test_gens;
mod tests_props_cards;
mod tests_props_follow;
mod tests_props_round;
mod tests_props_tricks;

// Re-exports for ergonomics
pub use cards::{double_deck, Card, CommonId, JokerKind, Rank, Suit};
pub use combos::{Combo, ComboType};
pub use scoring::{score_round, RoundOutcome, ATTACK_TARGET};
pub use state::{
    partner, team_of, GamePhase, GameState, Player, Seat, Team, TeamId, HAND_SIZE, KITTY_SIZE,
};
pub use tricks::{Play, Trick, TrickEnded};
pub use trump::{EffectiveSuit, TrumpInfo};
