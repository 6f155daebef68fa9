#![cfg(test)]
//! Property tests for the kitty-swap and declaration selectors over
//! arbitrary hands.

use proptest::prelude::*;

use crate::ai::AiEngine;
use crate::domain::cards::{double_deck, Card, Rank, Suit};
use crate::domain::state::{GamePhase, GameState, TeamId, HAND_SIZE, KITTY_SIZE};
use crate::domain::trump::TrumpInfo;

fn any_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

fn any_trump() -> impl Strategy<Value = TrumpInfo> {
    (any_rank(), prop::option::of(prop::sample::select(Suit::ALL.to_vec())))
        .prop_map(|(rank, suit)| TrumpInfo { rank, suit })
}

fn swap_state(hand: Vec<Card>, trump: TrumpInfo) -> GameState {
    let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
    state.trump = trump;
    state.phase = GamePhase::KittySwap;
    state.players[0].hand = hand;
    state
}

proptest! {
    /// Whatever the 33-card hand looks like, the swap buries exactly eight
    /// cards from the hand and leaves twenty-five.
    #[test]
    fn kitty_swap_shape_holds_for_any_hand(
        hand in prop::sample::subsequence(double_deck(), HAND_SIZE + KITTY_SIZE),
        trump in any_trump(),
    ) {
        let state = swap_state(hand.clone(), trump);
        let engine = AiEngine::default();
        let selection = engine.choose_kitty_swap(&state, 0).unwrap();

        prop_assert_eq!(selection.len(), KITTY_SIZE);
        let mut remaining = hand;
        for card in &selection {
            let idx = remaining.iter().position(|c| c == card);
            prop_assert!(idx.is_some(), "buried card {card} not in hand");
            remaining.swap_remove(idx.unwrap());
        }
        prop_assert_eq!(remaining.len(), HAND_SIZE);
    }

    /// A 33-card hand always has at least eight non-jokers, so a joker is
    /// never buried.
    #[test]
    fn kitty_swap_never_buries_a_joker(
        hand in prop::sample::subsequence(double_deck(), HAND_SIZE + KITTY_SIZE),
        trump in any_trump(),
    ) {
        let state = swap_state(hand, trump);
        let selection = AiEngine::default().choose_kitty_swap(&state, 0).unwrap();
        prop_assert!(selection.iter().all(|card| !card.is_joker()));
    }

    /// A declared suit is always justified: either the hand shows two
    /// trump-rank cards with one in that suit, or the suit is eight cards
    /// long.
    #[test]
    fn declarations_are_always_backed_by_the_hand(
        hand in prop::sample::subsequence(double_deck(), 25),
        trump_rank in any_rank(),
    ) {
        let mut state = GameState::new_round(1, TeamId::A, [trump_rank, trump_rank], 0);
        state.players[0].hand = hand.clone();

        if let Some(suit) = AiEngine::default().evaluate_declaration(&state, 0).unwrap() {
            let total_rank_cards = hand
                .iter()
                .filter(|c| c.rank() == Some(trump_rank))
                .count();
            let rank_in_suit = hand
                .iter()
                .filter(|c| c.rank() == Some(trump_rank) && c.suit() == Some(suit))
                .count();
            let suit_len = hand.iter().filter(|c| c.suit() == Some(suit)).count();
            prop_assert!(
                (total_rank_cards >= 2 && rank_in_suit >= 1) || suit_len >= 8,
                "declared {suit:?} with {total_rank_cards} rank cards ({rank_in_suit} in suit) and length {suit_len}"
            );
        }
    }

    /// Declaring is idempotent against a stronger standing declaration.
    #[test]
    fn declarations_defer_to_stronger_standing_calls(
        hand in prop::sample::subsequence(double_deck(), 25),
        trump_rank in any_rank(),
    ) {
        let mut state = GameState::new_round(1, TeamId::A, [trump_rank, trump_rank], 0);
        state.players[0].hand = hand;
        state.apply_declaration(2, Suit::Clubs, 2).unwrap();
        // Two copies is the strongest possible showing, so nothing tops it.
        prop_assert_eq!(AiEngine::default().evaluate_declaration(&state, 0).unwrap(), None);
    }
}
