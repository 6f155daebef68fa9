//! Deck shuffling and dealing.
//!
//! Shuffling is a Fisher–Yates pass over an injected RNG so games replay
//! exactly from a seed. Dealing splits the double deck into four 25-card
//! hands plus the 8-card kitty.

use rand::Rng;

use super::cards::{double_deck, Card};
use super::state::{sort_hand, GameState, GamePhase, HAND_SIZE, KITTY_SIZE, Seat};
use crate::error::EngineError;

/// Fisher–Yates shuffle.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// A freshly shuffled double deck.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = double_deck();
    shuffle(&mut deck, rng);
    deck
}

/// Deal the whole deck into the state: 25 cards per seat dealt one at a
/// time starting from the round starter, last 8 to the kitty. Leaves the
/// state in the declaring window.
pub fn deal_round(state: &mut GameState, deck: &mut Vec<Card>) -> Result<(), EngineError> {
    state.require_phase(GamePhase::Dealing)?;
    if deck.len() != 108 {
        return Err(EngineError::invalid_state(format!(
            "dealing from a deck of {} cards",
            deck.len()
        )));
    }

    for i in 0..(HAND_SIZE * 4) {
        let seat: Seat = ((state.round_starter as usize + i) % 4) as Seat;
        let card = deck.pop().expect("deck size checked above");
        state.player_mut(seat)?.hand.push(card);
    }
    state.kitty = std::mem::take(deck);
    debug_assert_eq!(state.kitty.len(), KITTY_SIZE);

    let trump = state.trump;
    for player in &mut state.players {
        sort_hand(&mut player.hand, &trump);
    }
    state.phase = GamePhase::Declaring;
    Ok(())
}
