#![cfg(test)]
//! Property tests for trick evaluation.

use proptest::prelude::*;

use super::cards::Card;
use super::combos;
use super::test_gens;
use super::tricks::Trick;

proptest! {
    /// The winner only ever moves to the seat that just played, and a
    /// rebuilt trick agrees with the incremental one at every prefix.
    #[test]
    fn winner_is_monotonic_and_deterministic(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(16),
        combo_sel in any::<prop::sample::Index>(),
    ) {
        let (lead_pool, rest) = pool.split_at(4);
        let candidates = combos::enumerate_combos(lead_pool, &trump);
        prop_assume!(!candidates.is_empty());
        let lead = &candidates[combo_sel.index(candidates.len())];
        let n = lead.cards.len();
        prop_assume!(rest.len() >= 3 * n);

        let mut trick = Trick::lead(trump, 0, lead.cards.clone()).unwrap();
        let mut winner = trick.winning_seat();
        prop_assert_eq!(winner, 0);

        for seat in 1..4u8 {
            let start = (seat as usize - 1) * n;
            let cards: Vec<Card> = rest[start..start + n].to_vec();
            trick.add_play(seat, cards).unwrap();

            let new_winner = trick.winning_seat();
            prop_assert!(
                new_winner == winner || new_winner == seat,
                "winner jumped from {winner} to {new_winner} on seat {seat}'s play"
            );
            winner = new_winner;
        }

        // Replaying the identical trick gives the identical winner.
        let mut replay = Trick::lead(trump, 0, lead.cards.clone()).unwrap();
        for seat in 1..4u8 {
            let start = (seat as usize - 1) * n;
            replay.add_play(seat, rest[start..start + n].to_vec()).unwrap();
        }
        prop_assert_eq!(replay.winning_seat(), winner);
    }

    /// Trick points are exactly the card points on the table.
    #[test]
    fn trick_points_match_card_points(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(4),
    ) {
        let mut trick = Trick::lead(trump, 0, vec![pool[0]]).unwrap();
        for (i, card) in pool.iter().enumerate().skip(1) {
            trick.add_play(i as u8, vec![*card]).unwrap();
        }
        let expected: u16 = pool.iter().map(|c| c.points()).sum();
        prop_assert_eq!(trick.points(), expected);
        let ended = trick.complete().unwrap();
        prop_assert_eq!(ended.points, expected);
    }

    /// A completed trick's winner actually played a contesting shape: its
    /// cards all share one effective suit, in the led group or trump.
    #[test]
    fn winner_played_a_contesting_shape(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(4),
    ) {
        let mut trick = Trick::lead(trump, 0, vec![pool[0]]).unwrap();
        for (i, card) in pool.iter().enumerate().skip(1) {
            trick.add_play(i as u8, vec![*card]).unwrap();
        }
        let winner = trick.winning_seat();
        let winning_card = &trick.plays()[winner as usize].cards[0];
        let lead_group = trick.lead_group();
        let group = trump.effective_suit(winning_card);
        prop_assert!(
            group == lead_group || group == super::trump::EffectiveSuit::Trump,
            "winning card {winning_card} is neither in the led group nor trump"
        );
    }
}
