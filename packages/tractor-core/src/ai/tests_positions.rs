#![cfg(test)]
//! Position-specific following behavior: what changes between playing
//! second, third, and fourth to a trick.

use crate::ai::context::build_context;
use crate::ai::following::{choose_follow, second_seat_influence, InfluenceLevel};
use crate::ai::memory::CardMemory;
use crate::ai::AiConfig;
use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::state::{GamePhase, GameState, Seat, TeamId};
use crate::domain::tricks::Trick;
use crate::domain::trump::TrumpInfo;

fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
    Card::regular(suit, rank, deck)
}

fn trump() -> TrumpInfo {
    TrumpInfo::with_suit(Rank::Two, Suit::Spades)
}

fn state_with_trick(trick: Trick, seat: Seat, hand: Vec<Card>) -> GameState {
    let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
    state.trump = trick.trump;
    state.phase = GamePhase::Playing;
    state.current_player = seat;
    state.current_trick = Some(trick);
    state.players[seat as usize].hand = hand;
    state
}

/// A completed trick led in hearts by seat 0 where every seat in
/// `void_seats` discards a club. Ranks are parameters so tests can stack
/// several of these without reusing a physical card.
fn hearts_void_trick(void_seats: &[Seat], lead_rank: Rank, filler_rank: Rank) -> Trick {
    let t = trump();
    let mut trick = Trick::lead(t, 0, vec![c(Suit::Hearts, lead_rank, 1)]).unwrap();
    let mut hearts_deck = 0u8;
    let mut clubs_deck = 0u8;
    for s in 1..4u8 {
        let card = if void_seats.contains(&s) {
            let card = c(Suit::Clubs, filler_rank, clubs_deck);
            clubs_deck += 1;
            card
        } else {
            let card = c(Suit::Hearts, filler_rank, hearts_deck);
            hearts_deck += 1;
            card
        };
        trick.add_play(s, vec![card]).unwrap();
    }
    trick
}

#[test]
fn second_seat_influence_scales_with_dead_seats() {
    let t = trump();
    let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Six, 0)]).unwrap();

    let mut state = state_with_trick(trick.clone(), 1, vec![c(Suit::Hearts, Rank::Nine, 0)]);
    let fresh = CardMemory::from_state(&state);
    assert_eq!(second_seat_influence(1, &trick, &fresh), InfluenceLevel::Low);

    // One seat behind (seat 2) proven void in hearts.
    state.completed_tricks.push(hearts_void_trick(&[2], Rank::Four, Rank::Seven));
    let one_dead = CardMemory::from_state(&state);
    assert_eq!(
        second_seat_influence(1, &trick, &one_dead),
        InfluenceLevel::Moderate
    );

    // Both seats behind proven void.
    state.completed_tricks.push(hearts_void_trick(&[2, 3], Rank::Ten, Rank::Eight));
    let both_dead = CardMemory::from_state(&state);
    assert_eq!(
        second_seat_influence(1, &trick, &both_dead),
        InfluenceLevel::High
    );
}

#[test]
fn second_seat_presses_a_cheap_trick_under_high_influence() {
    // No points on the table, but both remaining seats are void in the
    // lead suit: second seat takes command instead of ducking.
    let t = trump();
    let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Six, 0)]).unwrap();
    let mut state = state_with_trick(
        trick,
        1,
        vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)],
    );
    state.completed_tricks.push(hearts_void_trick(&[2], Rank::Four, Rank::Seven));
    state.completed_tricks.push(hearts_void_trick(&[2, 3], Rank::Ten, Rank::Eight));

    let ctx = build_context(&state, 1).unwrap();
    let memory = CardMemory::from_state(&state);
    let play = choose_follow(&state, 1, &ctx, &memory, &AiConfig::default()).unwrap();
    assert_eq!(play, vec![c(Suit::Hearts, Rank::Ace, 0)]);
}

#[test]
fn second_seat_still_ducks_without_influence() {
    let t = trump();
    let trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Six, 0)]).unwrap();
    let state = state_with_trick(
        trick,
        1,
        vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)],
    );
    let ctx = build_context(&state, 1).unwrap();
    let memory = CardMemory::from_state(&state);
    let play = choose_follow(&state, 1, &ctx, &memory, &AiConfig::default()).unwrap();
    assert_eq!(play, vec![c(Suit::Hearts, Rank::Three, 0)]);
}

#[test]
fn third_seat_takes_over_when_last_opponent_is_spent() {
    // Seats 0 and 1 have played; seat 2 acts with only opponent seat 3
    // behind, and seat 3 is proven void in hearts with no trump answer.
    let t = trump();
    let mut trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Six, 0)]).unwrap();
    trick.add_play(1, vec![c(Suit::Hearts, Rank::Jack, 0)]).unwrap();
    let mut state = state_with_trick(
        trick,
        2,
        vec![c(Suit::Hearts, Rank::Queen, 0), c(Suit::Hearts, Rank::Three, 1)],
    );
    state.completed_tricks.push(hearts_void_trick(&[3], Rank::Ten, Rank::Eight));
    // Seat 3 also showed it had no trump left.
    let mut trump_lead = Trick::lead(t, 0, vec![c(Suit::Spades, Rank::Five, 1)]).unwrap();
    trump_lead.add_play(1, vec![c(Suit::Spades, Rank::Six, 1)]).unwrap();
    trump_lead.add_play(2, vec![c(Suit::Spades, Rank::Seven, 1)]).unwrap();
    trump_lead.add_play(3, vec![c(Suit::Diamonds, Rank::Three, 1)]).unwrap();
    state.completed_tricks.push(trump_lead);

    let ctx = build_context(&state, 2).unwrap();
    let memory = CardMemory::from_state(&state);
    assert!(memory.is_trump_void(3));
    let play = choose_follow(&state, 2, &ctx, &memory, &AiConfig::default()).unwrap();
    // The queen beats the jack and nothing behind can answer.
    assert_eq!(play, vec![c(Suit::Hearts, Rank::Queen, 0)]);
}

#[test]
fn fourth_seat_secures_any_points_on_the_table() {
    // Five points showing and the last word: take them.
    let t = trump();
    let mut trick = Trick::lead(t, 0, vec![c(Suit::Hearts, Rank::Five, 0)]).unwrap();
    trick.add_play(1, vec![c(Suit::Hearts, Rank::Four, 0)]).unwrap();
    trick.add_play(2, vec![c(Suit::Hearts, Rank::Eight, 0)]).unwrap();
    let state = state_with_trick(
        trick,
        3,
        vec![c(Suit::Hearts, Rank::Nine, 0), c(Suit::Hearts, Rank::Three, 0)],
    );
    let ctx = build_context(&state, 3).unwrap();
    let memory = CardMemory::from_state(&state);
    let play = choose_follow(&state, 3, &ctx, &memory, &AiConfig::default()).unwrap();
    assert_eq!(play, vec![c(Suit::Hearts, Rank::Nine, 0)]);
}

#[test]
fn fourth_seat_dumps_points_on_a_winning_teammate() {
    // Teammate seat 1 holds the trick; the fourth seat's king rides along.
    let t = trump();
    let mut trick = Trick::lead(t, 1, vec![c(Suit::Hearts, Rank::Ace, 0)]).unwrap();
    trick.add_play(2, vec![c(Suit::Hearts, Rank::Four, 0)]).unwrap();
    trick.add_play(0, vec![c(Suit::Hearts, Rank::Eight, 0)]).unwrap();
    let state = state_with_trick(
        trick,
        3,
        vec![c(Suit::Hearts, Rank::King, 0), c(Suit::Hearts, Rank::Three, 0)],
    );
    let ctx = build_context(&state, 3).unwrap();
    let memory = CardMemory::from_state(&state);
    let play = choose_follow(&state, 3, &ctx, &memory, &AiConfig::default()).unwrap();
    assert_eq!(play, vec![c(Suit::Hearts, Rank::King, 0)]);
}
