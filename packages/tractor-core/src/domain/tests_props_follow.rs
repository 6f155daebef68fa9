#![cfg(test)]
//! Property tests for follow legality: the AI's follow always satisfies
//! the validator, whatever the lead shape.

use proptest::prelude::*;

use crate::ai;
use super::cards::{Card, Rank};
use super::combos;
use super::follow::is_legal_play;
use super::state::{GamePhase, GameState, TeamId};
use super::test_gens;
use super::tricks::Trick;
use super::trump::TrumpInfo;

fn follow_state(trump: TrumpInfo, trick: Trick, hand: Vec<Card>) -> GameState {
    let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
    state.trump = trump;
    state.phase = GamePhase::Playing;
    state.current_player = 1;
    state.current_trick = Some(trick);
    state.players[1].hand = hand;
    state
}

proptest! {
    /// For every hand and every single-combo lead the AI finds a play, and
    /// the validator accepts it.
    #[test]
    fn ai_follow_is_always_legal(
        trump in test_gens::trump_info(),
        pools in test_gens::split_pools(10, 20),
        combo_sel in any::<prop::sample::Index>(),
        extra in 0usize..10,
    ) {
        let (leader_pool, follower_pool) = pools;
        let candidates = combos::enumerate_combos(&leader_pool, &trump);
        prop_assume!(!candidates.is_empty());
        let lead = &candidates[combo_sel.index(candidates.len())];
        let n = lead.cards.len();

        let hand: Vec<Card> = follower_pool.iter().take(n + extra).copied().collect();
        prop_assume!(hand.len() >= n);

        let trick = Trick::lead(trump, 0, lead.cards.clone()).unwrap();
        let state = follow_state(trump, trick, hand.clone());

        let play = ai::choose_play(&state, 1).unwrap();
        prop_assert_eq!(play.len(), n);
        prop_assert!(
            is_legal_play(&lead.cards, &hand, &play, &trump),
            "illegal follow {play:?} to lead {:?} from hand {hand:?}",
            lead.cards
        );
    }

    /// A play of the wrong length is never legal.
    #[test]
    fn wrong_length_is_always_rejected(
        trump in test_gens::trump_info(),
        pools in test_gens::split_pools(4, 6),
    ) {
        let (lead_pool, hand) = pools;
        let lead = vec![lead_pool[0]];
        let play: Vec<Card> = hand.iter().take(2).copied().collect();
        prop_assert!(!is_legal_play(&lead, &hand, &play, &trump));
    }

    /// A play with cards outside the hand is never legal.
    #[test]
    fn foreign_cards_are_always_rejected(
        trump in test_gens::trump_info(),
        pools in test_gens::split_pools(4, 6),
    ) {
        let (lead_pool, hand) = pools;
        let lead = vec![lead_pool[0]];
        // The lead card itself is not in the follower's hand.
        let play = vec![lead_pool[0]];
        prop_assert!(!is_legal_play(&lead, &hand, &play, &trump));
    }

    /// When the hand holds enough cards of the led group, every legal play
    /// stays inside the group; the AI's play demonstrates it.
    #[test]
    fn ai_keeps_to_the_led_group_when_able(
        trump in test_gens::trump_info(),
        pools in test_gens::split_pools(6, 24),
    ) {
        let (leader_pool, follower_pool) = pools;
        let lead = vec![leader_pool[0]];
        let group = trump.effective_suit(&lead[0]);

        let hand: Vec<Card> = follower_pool.iter().take(13).copied().collect();
        let in_group = hand.iter().filter(|c| trump.effective_suit(c) == group).count();
        prop_assume!(in_group >= 1);

        let trick = Trick::lead(trump, 0, lead.clone()).unwrap();
        let state = follow_state(trump, trick, hand.clone());
        let play = ai::choose_play(&state, 1).unwrap();
        prop_assert_eq!(trump.effective_suit(&play[0]), group);
    }
}
