#![cfg(test)]
//! End-to-end decision scenarios through the public entry points.

use crate::ai::{choose_play, AiEngine};
use crate::domain::cards::{Card, JokerKind, Rank, Suit};
use crate::domain::scoring::score_round;
use crate::domain::state::{GamePhase, GameState, TeamId};
use crate::domain::tricks::Trick;
use crate::domain::trump::TrumpInfo;

fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
    Card::regular(suit, rank, deck)
}

fn playing_state(trump: TrumpInfo) -> GameState {
    let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
    state.trump = trump;
    state.phase = GamePhase::Playing;
    state
}

#[test]
fn forced_suit_follow_plays_the_only_heart() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.current_trick = Some(Trick::lead(trump, 0, vec![c(Suit::Hearts, Rank::Ace, 0)]).unwrap());
    state.current_player = 1;
    state.players[1].hand = vec![
        c(Suit::Hearts, Rank::Six, 0),
        c(Suit::Spades, Rank::Seven, 0),
        c(Suit::Clubs, Rank::Three, 0),
    ];
    let play = choose_play(&state, 1).unwrap();
    assert_eq!(play, vec![c(Suit::Hearts, Rank::Six, 0)]);
}

#[test]
fn pair_follow_with_one_in_suit_exhausts_and_fills() {
    let trump = TrumpInfo::new(Rank::Two);
    let mut state = playing_state(trump);
    state.current_trick = Some(
        Trick::lead(
            trump,
            0,
            vec![c(Suit::Diamonds, Rank::Eight, 0), c(Suit::Diamonds, Rank::Eight, 1)],
        )
        .unwrap(),
    );
    state.current_player = 1;
    let hand = vec![
        c(Suit::Diamonds, Rank::Ten, 0),
        c(Suit::Spades, Rank::Three, 0),
        c(Suit::Spades, Rank::Four, 0),
        c(Suit::Spades, Rank::Five, 0),
    ];
    state.players[1].hand = hand.clone();

    let play = choose_play(&state, 1).unwrap();
    assert_eq!(play.len(), 2);
    assert!(play.contains(&c(Suit::Diamonds, Rank::Ten, 0)));
    assert!(play.iter().any(|card| card.suit() == Some(Suit::Spades)));
    assert!(crate::domain::follow::is_legal_play(
        &state.current_trick.as_ref().unwrap().lead_play().cards,
        &hand,
        &play,
        &trump
    ));
}

#[test]
fn partner_holding_the_trick_gets_points() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    let mut trick = Trick::lead(trump, 1, vec![c(Suit::Clubs, Rank::Ace, 0)]).unwrap();
    trick.add_play(2, vec![c(Suit::Clubs, Rank::Three, 0)]).unwrap();
    state.current_trick = Some(trick);
    state.current_player = 3;
    state.players[3].hand = vec![
        c(Suit::Clubs, Rank::King, 0),
        c(Suit::Clubs, Rank::Ten, 0),
        c(Suit::Clubs, Rank::Four, 0),
    ];
    let play = choose_play(&state, 3).unwrap();
    assert_eq!(play.len(), 1);
    assert!(play[0].is_point_card());
}

#[test]
fn ace_takes_a_ten_point_trick() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.current_trick =
        Some(Trick::lead(trump, 0, vec![c(Suit::Hearts, Rank::King, 0)]).unwrap());
    state.current_player = 1;
    state.players[1].hand = vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)];
    assert_eq!(
        choose_play(&state, 1).unwrap(),
        vec![c(Suit::Hearts, Rank::Ace, 0)]
    );
}

#[test]
fn no_high_card_wasted_on_a_pointless_trick() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.current_trick =
        Some(Trick::lead(trump, 0, vec![c(Suit::Hearts, Rank::Seven, 0)]).unwrap());
    state.current_player = 1;
    state.players[1].hand = vec![c(Suit::Hearts, Rank::Ace, 0), c(Suit::Hearts, Rank::Three, 0)];
    assert_eq!(
        choose_play(&state, 1).unwrap(),
        vec![c(Suit::Hearts, Rank::Three, 0)]
    );
}

#[test]
fn weakest_trump_goes_under_an_unbeatable_joker() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.current_trick =
        Some(Trick::lead(trump, 0, vec![Card::joker(JokerKind::Small, 0)]).unwrap());
    state.current_player = 1;
    state.players[1].hand = vec![
        c(Suit::Spades, Rank::Three, 0),
        c(Suit::Hearts, Rank::Two, 0),
        c(Suit::Diamonds, Rank::Ace, 0),
    ];
    assert_eq!(
        choose_play(&state, 1).unwrap(),
        vec![c(Suit::Spades, Rank::Three, 0)]
    );
}

#[test]
fn final_trick_pair_win_quadruples_the_kitty() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    // Team A defends, so seats 1 and 3 attack.
    state.kitty = vec![
        c(Suit::Clubs, Rank::Five, 0),
        c(Suit::Clubs, Rank::Five, 1),
        c(Suit::Diamonds, Rank::Five, 0),
        c(Suit::Diamonds, Rank::Ten, 0),
        c(Suit::Clubs, Rank::Seven, 0),
        c(Suit::Clubs, Rank::Eight, 0),
        c(Suit::Diamonds, Rank::Seven, 0),
        c(Suit::Diamonds, Rank::Eight, 0),
    ];
    let kitty_points: u16 = state.kitty.iter().map(|card| card.points()).sum();
    assert_eq!(kitty_points, 25);

    state.players[1].hand = vec![c(Suit::Hearts, Rank::King, 0), c(Suit::Hearts, Rank::King, 1)];
    state.players[2].hand = vec![c(Suit::Hearts, Rank::Three, 0), c(Suit::Hearts, Rank::Four, 0)];
    state.players[3].hand = vec![c(Suit::Hearts, Rank::Six, 0), c(Suit::Hearts, Rank::Seven, 0)];
    state.players[0].hand = vec![c(Suit::Hearts, Rank::Eight, 0), c(Suit::Hearts, Rank::Nine, 0)];
    state.current_player = 1;

    let lead = state.players[1].hand.clone();
    state.apply_play(1, &lead).unwrap();
    let p2 = state.players[2].hand.clone();
    state.apply_play(2, &p2).unwrap();
    let p3 = state.players[3].hand.clone();
    state.apply_play(3, &p3).unwrap();
    let p0 = state.players[0].hand.clone();
    let ended = state.apply_play(0, &p0).unwrap().unwrap();

    assert_eq!(ended.winner, 1);
    assert_eq!(state.phase, GamePhase::Scoring);

    let outcome = score_round(&mut state).unwrap();
    assert_eq!(outcome.kitty_bonus, 100);
    assert_eq!(outcome.attacker_points, 20 + 100);
    assert!(outcome.attackers_won);
}

#[test]
fn kitty_swap_validations_fire_through_the_entry_point() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.phase = GamePhase::KittySwap;
    state.players[0].hand = vec![c(Suit::Hearts, Rank::Three, 0)];

    let engine = AiEngine::default();
    assert!(matches!(
        engine.choose_kitty_swap(&state, 0),
        Err(crate::error::EngineError::WrongHandSize { .. })
    ));

    state.phase = GamePhase::Playing;
    assert!(matches!(
        engine.choose_kitty_swap(&state, 0),
        Err(crate::error::EngineError::WrongPhase { .. })
    ));
}

#[test]
fn empty_hand_yields_empty_selection() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.players[0].hand.clear();
    assert!(choose_play(&state, 0).unwrap().is_empty());
}

#[test]
fn declaration_abstains_outside_the_window() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let mut state = playing_state(trump);
    state.players[0].hand = vec![
        c(Suit::Hearts, Rank::Two, 0),
        c(Suit::Hearts, Rank::Two, 1),
        c(Suit::Hearts, Rank::Nine, 0),
    ];
    let engine = AiEngine::default();
    assert_eq!(engine.evaluate_declaration(&state, 0).unwrap(), None);
}

#[test]
fn unknown_seat_surfaces_from_every_entry_point() {
    let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
    let state = playing_state(trump);
    assert!(matches!(
        choose_play(&state, 7),
        Err(crate::error::EngineError::UnknownSeat(7))
    ));
}
