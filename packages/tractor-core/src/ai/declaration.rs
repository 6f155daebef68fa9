//! Trump declaration: whether and which suit to call while cards are
//! still being dealt.

use crate::domain::cards::{Card, Suit};
use crate::domain::state::{GameState, Seat};
use crate::error::EngineError;

/// Suit length that justifies declaring on sheer dominance alone.
const DOMINANT_SUIT_LENGTH: usize = 8;

/// Decide whether the seat should declare right now, and with which suit.
/// Returns `None` to abstain, including when the standing declaration is
/// at least as strong as what this hand could show.
pub fn evaluate_declaration(state: &GameState, seat: Seat) -> Result<Option<Suit>, EngineError> {
    let hand = state.hand(seat)?;
    let trump_rank = state.trump.rank;

    let mut suit_lengths = [0usize; 4];
    let mut rank_copies = [0u8; 4];
    let mut total_rank_copies = 0u8;
    for card in hand {
        if let (Some(suit), Some(rank)) = (card.suit(), card.rank()) {
            suit_lengths[suit as usize] += 1;
            if rank == trump_rank {
                rank_copies[suit as usize] += 1;
                total_rank_copies += 1;
            }
        }
    }

    let dominant = Suit::ALL
        .into_iter()
        .max_by_key(|s| suit_lengths[*s as usize])
        .expect("four suits");

    let candidate = if total_rank_copies >= 2 && rank_copies[dominant as usize] >= 1 {
        Some(dominant)
    } else if suit_lengths[dominant as usize] >= DOMINANT_SUIT_LENGTH {
        Some(dominant)
    } else {
        None
    };

    let candidate = match candidate {
        Some(suit) => suit,
        None => return Ok(None),
    };

    let strength = declaration_strength(hand, state, candidate);
    match state.declaration {
        Some(current) if current.strength >= strength => Ok(None),
        _ => Ok(Some(candidate)),
    }
}

/// Override key of a declaration from this hand: how many trump-rank
/// copies of the suit back it (floor 1, since a declaration always shows
/// at least one card).
pub fn declaration_strength(hand: &[Card], state: &GameState, suit: Suit) -> u8 {
    let copies = hand
        .iter()
        .filter(|c| c.suit() == Some(suit) && c.rank() == Some(state.trump.rank))
        .count() as u8;
    copies.max(1)
}
