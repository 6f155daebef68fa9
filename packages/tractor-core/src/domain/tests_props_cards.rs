#![cfg(test)]
//! Property tests for trump classification and card comparison.

use std::cmp::Ordering;

use proptest::prelude::*;

use super::cards::{double_deck, Card, JokerKind};
use super::test_gens;

proptest! {
    /// Any two trump cards are comparable under any trump designation.
    #[test]
    fn trump_cards_are_totally_ordered(
        trump in test_gens::trump_info(),
        ia in any::<prop::sample::Index>(),
        ib in any::<prop::sample::Index>(),
    ) {
        let trumps: Vec<Card> = double_deck()
            .into_iter()
            .filter(|c| trump.is_trump(c))
            .collect();
        let a = trumps[ia.index(trumps.len())];
        let b = trumps[ib.index(trumps.len())];
        prop_assert!(
            trump.compare(&a, &b).is_some(),
            "trump cards {a} and {b} must be comparable under {trump:?}"
        );
    }

    /// Big joker over small joker over trump rank over plain trump.
    #[test]
    fn joker_hierarchy_holds(trump in test_gens::trump_info(), ic in any::<prop::sample::Index>()) {
        let bj = Card::joker(JokerKind::Big, 0);
        let sj = Card::joker(JokerKind::Small, 0);
        prop_assert_eq!(trump.compare(&bj, &sj), Some(Ordering::Greater));

        let lesser_trumps: Vec<Card> = double_deck()
            .into_iter()
            .filter(|c| trump.is_trump(c) && !c.is_joker())
            .collect();
        let c = lesser_trumps[ic.index(lesser_trumps.len())];
        prop_assert_eq!(trump.compare(&sj, &c), Some(Ordering::Greater));

        if c.rank() != Some(trump.rank) {
            let rank_card = Card::regular(c.suit().unwrap(), trump.rank, 0);
            prop_assert_eq!(trump.compare(&rank_card, &c), Some(Ordering::Greater));
        }
    }

    /// Comparison is antisymmetric wherever it is defined.
    #[test]
    fn compare_is_antisymmetric(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(2),
    ) {
        let (a, b) = (pool[0], pool[1]);
        let forward = trump.compare(&a, &b);
        let backward = trump.compare(&b, &a);
        match (forward, backward) {
            (Some(f), Some(r)) => prop_assert_eq!(f, r.reverse()),
            (None, None) => {}
            _ => prop_assert!(false, "one-sided comparability for {a} vs {b}"),
        }
    }

    /// Cards of two different plain suits never compare.
    #[test]
    fn cross_suit_plain_cards_are_incomparable(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(2),
    ) {
        let (a, b) = (pool[0], pool[1]);
        prop_assume!(!trump.is_trump(&a) && !trump.is_trump(&b));
        prop_assume!(a.suit() != b.suit());
        prop_assert_eq!(trump.compare(&a, &b), None);
    }

    /// Trump beats every non-trump card.
    #[test]
    fn trump_beats_plain(
        trump in test_gens::trump_info(),
        pool in test_gens::cards(2),
    ) {
        let (a, b) = (pool[0], pool[1]);
        prop_assume!(trump.is_trump(&a) && !trump.is_trump(&b));
        prop_assert_eq!(trump.compare(&a, &b), Some(Ordering::Greater));
    }
}
