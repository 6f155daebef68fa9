//! Leading strategy: score every candidate lead and take the best.
//!
//! Candidates are all combos the hand can form plus one multi-combo per
//! suit where the whole holding is unbeatable. Non-trump leads are
//! preferred; trump only comes out when nothing in the plain suits scores.

use tracing::debug;

use crate::domain::cards::{Card, Suit};
use crate::domain::combos::{self, Combo, ComboType};
use crate::domain::follow::cards_in_group;
use crate::domain::state::{GameState, Seat};
use crate::domain::trump::EffectiveSuit;
use crate::error::EngineError;

use super::context::{GameContext, PointPressure};
use super::memory::CardMemory;

/// Minimum score for a plain-suit lead to be taken outright.
const NON_TRUMP_THRESHOLD: f64 = 20.0;
/// Floor under which even the best trump lead is rejected.
const TRUMP_THRESHOLD: f64 = -10.0;

/// Multi-combo scenario weights. Scenarios are detected independently and
/// their weights summed onto the candidate's score.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MultiComboScenario {
    OpponentPointsAvailable,
    TeammateShedPotential,
    DecisionPressure,
    FinalTrick,
    PenultimateWaste,
    KittyMultiplierReach,
}

static MULTI_COMBO_WEIGHTS: &[(MultiComboScenario, f64)] = &[
    (MultiComboScenario::OpponentPointsAvailable, 8.0),
    (MultiComboScenario::TeammateShedPotential, 6.0),
    (MultiComboScenario::DecisionPressure, 5.0),
    (MultiComboScenario::FinalTrick, 40.0),
    (MultiComboScenario::PenultimateWaste, -30.0),
    (MultiComboScenario::KittyMultiplierReach, 20.0),
];

pub fn choose_lead(
    state: &GameState,
    seat: Seat,
    ctx: &GameContext,
    memory: &CardMemory,
) -> Result<Vec<Card>, EngineError> {
    let hand = state.hand(seat)?;
    if hand.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates = combos::enumerate_combos(hand, &state.trump);
    for suit in Suit::ALL {
        if let Some(mc) = combos::suit_multi_combo(hand, &state.trump, suit) {
            let others = state.other_hands(seat);
            if combos::multi_combo_is_unbeatable(&mc.cards, &state.trump, &others) {
                candidates.push(mc);
            }
        }
    }

    let mut best_non_trump: Option<(f64, &Combo)> = None;
    let mut best_trump: Option<(f64, &Combo)> = None;
    for candidate in &candidates {
        let is_trump_lead =
            state.trump.effective_suit(&candidate.cards[0]) == EffectiveSuit::Trump;
        let score = score_lead(candidate, is_trump_lead, state, seat, ctx, memory);
        let slot = if is_trump_lead {
            &mut best_trump
        } else {
            &mut best_non_trump
        };
        let better = match slot {
            None => true,
            // Ties go to the cheaper combo so strong cards stay back.
            Some((s, c)) => score > *s || (score == *s && candidate.value < c.value),
        };
        if better {
            *slot = Some((score, candidate));
        }
    }

    let chosen = match (best_non_trump, best_trump) {
        (Some((nt_score, nt)), Some((t_score, t))) => {
            if nt_score >= NON_TRUMP_THRESHOLD {
                nt
            } else if t_score > TRUMP_THRESHOLD {
                t
            } else {
                nt
            }
        }
        (Some((_, nt)), None) => nt,
        (None, Some((_, t))) => t,
        (None, None) => return Ok(Vec::new()),
    };

    debug!(seat, kind = ?chosen.kind, len = chosen.len(), "lead chosen");
    Ok(chosen.cards.clone())
}

fn score_lead(
    combo: &Combo,
    is_trump_lead: bool,
    state: &GameState,
    seat: Seat,
    ctx: &GameContext,
    memory: &CardMemory,
) -> f64 {
    let trump = &state.trump;
    let mut score = intrinsic_strength(combo, trump);

    let tricks_played = state.tricks_played();
    let early_game = tricks_played < 8;
    let late_game = state.tricks_remaining() <= 6;

    // Memory: a lead nothing can top is worth forcing through.
    let biggest = lead_is_biggest_remaining(combo, state, memory);
    if biggest {
        score += match combo.kind {
            ComboType::Single => 20.0,
            ComboType::Pair => 25.0,
            _ => 15.0,
        };
        if late_game {
            score += 10.0;
        }
    }

    // Point exposure: points on a contestable lead feed the opponents. A
    // multi-combo is exempt since it only exists when nothing can top it.
    let combo_points = combo.points() as f64;
    if combo_points > 0.0 && combo.kind != ComboType::MultiCombo {
        if biggest {
            if early_game {
                score += 5.0;
            }
        } else {
            score -= combo_points * 0.8;
        }
    }

    // Suit length pressure, plus extra when an opponent is already void.
    if let EffectiveSuit::Suit(suit) = trump.effective_suit(&combo.cards[0]) {
        let hand = state.hand(seat).unwrap_or(&[]);
        let suit_len = cards_in_group(hand, EffectiveSuit::Suit(suit), trump).len();
        score += suit_len as f64 * 1.5;
        let opponent_void = opponents(seat).iter().any(|&o| memory.is_void(o, suit));
        if opponent_void {
            score += 8.0;
        }
    }

    // Trump conservation: jokers are not lead fodder early, and even low
    // trump leads bleed the suit.
    if is_trump_lead {
        if combo.cards.iter().any(|c| c.is_joker()) && early_game {
            score -= 50.0;
        }
        score -= 5.0;
        if ctx.point_pressure == PointPressure::High {
            score += 8.0;
        }
    }

    if combo.kind == ComboType::MultiCombo {
        score += multi_combo_score(combo, state, seat, ctx, memory);
    }

    score
}

fn intrinsic_strength(combo: &Combo, trump: &crate::domain::trump::TrumpInfo) -> f64 {
    let top = combo.top_strength(trump) as f64;
    match combo.kind {
        ComboType::Single => 5.0 + top,
        ComboType::Pair => 15.0 + top,
        ComboType::Tractor => 30.0 + 5.0 * combo.pair_count() as f64 + top,
        ComboType::MultiCombo => 22.0 + top,
    }
}

fn lead_is_biggest_remaining(combo: &Combo, state: &GameState, memory: &CardMemory) -> bool {
    let trump = &state.trump;
    match combo.kind {
        ComboType::Single | ComboType::Pair => {
            let card = &combo.cards[0];
            match (card.suit(), card.rank()) {
                (Some(suit), Some(rank)) if !trump.is_trump(card) => {
                    memory.is_biggest_remaining(suit, rank, combo.kind)
                }
                _ => false,
            }
        }
        _ => false,
    }
}

fn multi_combo_score(
    combo: &Combo,
    state: &GameState,
    seat: Seat,
    ctx: &GameContext,
    memory: &CardMemory,
) -> f64 {
    let tricks_remaining = state.tricks_remaining();
    let points_seen: u16 = memory.played_cards.iter().map(|c| c.points()).sum();
    let unseen_points = crate::domain::cards::DECK_POINTS.saturating_sub(points_seen) as f64;

    let mut score = 0.0;
    for (scenario, weight) in MULTI_COMBO_WEIGHTS {
        let applies = match scenario {
            // Opponents still sit on points a sweeping lead can pull out.
            MultiComboScenario::OpponentPointsAvailable => unseen_points > 60.0,
            MultiComboScenario::TeammateShedPotential => {
                memory.players[crate::domain::state::partner(seat) as usize]
                    .point_card_probability
                    > 0.5
            }
            // Several units at once squeeze every follower's hand.
            MultiComboScenario::DecisionPressure => combo.len() >= 4,
            MultiComboScenario::FinalTrick => tricks_remaining == 1,
            MultiComboScenario::PenultimateWaste => tricks_remaining == 2,
            MultiComboScenario::KittyMultiplierReach => {
                tricks_remaining == 1 && ctx.is_attacking && combo.pair_count() > 0
            }
        };
        if applies {
            score += weight;
        }
    }
    score
}

fn opponents(seat: Seat) -> [Seat; 2] {
    [(seat + 1) % 4, (seat + 3) % 4]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::context::build_context;
    use crate::domain::cards::Rank;
    use crate::domain::state::{GamePhase, TeamId};
    use crate::domain::trump::TrumpInfo;

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn state_with_hand(seat: Seat, hand: Vec<Card>) -> GameState {
        let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], seat);
        state.trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        state.phase = GamePhase::Playing;
        state.current_player = seat;
        state.players[seat as usize].hand = hand;
        // Give the other seats something so multi-combo scans see real hands.
        for other in 0..4u8 {
            if other != seat {
                state.players[other as usize].hand = vec![
                    c(Suit::Diamonds, Rank::Three, other % 2),
                    c(Suit::Diamonds, Rank::Four, other % 2),
                ];
            }
        }
        state
    }

    #[test]
    fn prefers_non_trump_ace_over_low_cards() {
        let seat = 0;
        let mut state = state_with_hand(
            seat,
            vec![
                c(Suit::Hearts, Rank::Ace, 0),
                c(Suit::Hearts, Rank::Four, 0),
                c(Suit::Clubs, Rank::Six, 0),
            ],
        );
        // An opponent still holds hearts, so only the ace is safe to force.
        state.players[1].hand.push(c(Suit::Hearts, Rank::King, 0));
        let ctx = build_context(&state, seat).unwrap();
        let memory = CardMemory::from_state(&state);
        let lead = choose_lead(&state, seat, &ctx, &memory).unwrap();
        assert_eq!(lead, vec![c(Suit::Hearts, Rank::Ace, 0)]);
    }

    #[test]
    fn prefers_tractor_over_single_pair() {
        let seat = 0;
        let state = state_with_hand(
            seat,
            vec![
                c(Suit::Hearts, Rank::Seven, 0),
                c(Suit::Hearts, Rank::Seven, 1),
                c(Suit::Hearts, Rank::Eight, 0),
                c(Suit::Hearts, Rank::Eight, 1),
                c(Suit::Clubs, Rank::Ten, 0),
                c(Suit::Clubs, Rank::Ten, 1),
            ],
        );
        let ctx = build_context(&state, seat).unwrap();
        let memory = CardMemory::from_state(&state);
        let lead = choose_lead(&state, seat, &ctx, &memory).unwrap();
        assert_eq!(lead.len(), 4);
        assert!(lead.iter().all(|card| card.suit() == Some(Suit::Hearts)));
    }

    #[test]
    fn avoids_leading_jokers_early() {
        let seat = 0;
        let state = state_with_hand(
            seat,
            vec![
                Card::joker(crate::domain::cards::JokerKind::Big, 0),
                c(Suit::Hearts, Rank::Nine, 0),
                c(Suit::Clubs, Rank::Eight, 0),
            ],
        );
        let ctx = build_context(&state, seat).unwrap();
        let memory = CardMemory::from_state(&state);
        let lead = choose_lead(&state, seat, &ctx, &memory).unwrap();
        assert!(!lead[0].is_joker());
    }

    #[test]
    fn empty_hand_returns_empty_selection() {
        let seat = 0;
        let state = state_with_hand(seat, Vec::new());
        let ctx = build_context(&state, seat).unwrap();
        let memory = CardMemory::from_state(&state);
        let lead = choose_lead(&state, seat, &ctx, &memory).unwrap();
        assert!(lead.is_empty());
    }

    #[test]
    fn unbeatable_suit_sweep_is_considered() {
        let seat = 0;
        // A♥ + K♥K♥ with the table holding only low diamonds: the sweep is
        // unbeatable and carries the suit-length and pressure bonuses.
        let state = state_with_hand(
            seat,
            vec![
                c(Suit::Hearts, Rank::Ace, 0),
                c(Suit::Hearts, Rank::King, 0),
                c(Suit::Hearts, Rank::King, 1),
                c(Suit::Hearts, Rank::Queen, 0),
                c(Suit::Hearts, Rank::Queen, 1),
            ],
        );
        let ctx = build_context(&state, seat).unwrap();
        let memory = CardMemory::from_state(&state);
        let lead = choose_lead(&state, seat, &ctx, &memory).unwrap();
        // Either the full sweep or the tractor is acceptable; both keep the
        // lead in hearts. The sweep must at least be a legal choice.
        assert!(lead.iter().all(|card| card.suit() == Some(Suit::Hearts)));
        assert!(lead.len() >= 4);
    }
}
