//! Kitty-swap selection: choose the 8 cards to bury.
//!
//! Three strategies, tried in order of ambition: empty out one or two weak
//! suits, dip into the trump holding when the hand forces or justifies it,
//! or just bury the eight weakest plain cards.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::cards::{Card, CommonId, Rank, Suit};
use crate::domain::combos::{self, card_strength};
use crate::domain::state::KITTY_SIZE;
use crate::domain::trump::{EffectiveSuit, TrumpInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
enum KittyStrategy {
    /// These suits can be completely emptied inside the 8 discards.
    SuitElimination(Vec<Suit>),
    /// The trump holding is long enough (or the rest too strong) to bury
    /// weak trumps.
    TrumpInclusion,
    Conservative,
}

struct SuitAnalysis {
    suit: Suit,
    cards: Vec<Card>,
    has_ace: bool,
    has_king: bool,
    pair_count: usize,
}

impl SuitAnalysis {
    /// A suit is worth emptying only when it carries nothing worth keeping.
    fn eliminable(&self) -> bool {
        !self.has_ace && !self.has_king && self.pair_count == 0
    }
}

pub fn select_kitty(hand: &[Card], trump: &TrumpInfo) -> Vec<Card> {
    let trumps: Vec<Card> = hand.iter().filter(|c| trump.is_trump(c)).copied().collect();
    let non_trump: Vec<Card> = hand.iter().filter(|c| !trump.is_trump(c)).copied().collect();
    let analyses = analyze_suits(&non_trump, trump);

    let strategy = pick_strategy(&analyses, &trumps, non_trump.len());
    debug!(?strategy, "kitty strategy");

    match strategy {
        KittyStrategy::SuitElimination(suits) => {
            let mut chosen: Vec<Card> = Vec::new();
            for analysis in &analyses {
                if suits.contains(&analysis.suit) {
                    chosen.extend(analysis.cards.iter().copied());
                }
            }
            let leftovers: Vec<Card> = non_trump
                .iter()
                .filter(|c| !suits.contains(&c.suit().expect("plain card")))
                .copied()
                .collect();
            let mut by_weakness = weakness_order(&leftovers, trump);
            while chosen.len() < KITTY_SIZE {
                chosen.push(by_weakness.remove(0));
            }
            chosen
        }
        KittyStrategy::TrumpInclusion => {
            // Jokers only leave the hand when literally nothing else can.
            let pool: Vec<Card> = hand.to_vec();
            let mut ordered = weakness_order(&pool, trump);
            ordered.truncate(KITTY_SIZE);
            ordered
        }
        KittyStrategy::Conservative => {
            let mut ordered = weakness_order(&non_trump, trump);
            ordered.truncate(KITTY_SIZE);
            ordered
        }
    }
}

fn analyze_suits(non_trump: &[Card], trump: &TrumpInfo) -> Vec<SuitAnalysis> {
    Suit::ALL
        .iter()
        .filter_map(|&suit| {
            let cards: Vec<Card> = non_trump
                .iter()
                .filter(|c| trump.effective_suit(c) == EffectiveSuit::Suit(suit))
                .copied()
                .collect();
            if cards.is_empty() {
                return None;
            }
            let has_ace = cards.iter().any(|c| c.rank() == Some(Rank::Ace));
            let has_king = cards.iter().any(|c| c.rank() == Some(Rank::King));
            let pair_count = combos::count_pairs(&cards);
            Some(SuitAnalysis {
                suit,
                cards,
                has_ace,
                has_king,
                pair_count,
            })
        })
        .collect()
}

fn pick_strategy(
    analyses: &[SuitAnalysis],
    trumps: &[Card],
    non_trump_count: usize,
) -> KittyStrategy {
    if non_trump_count < KITTY_SIZE {
        return KittyStrategy::TrumpInclusion;
    }

    let trump_pairs = combos::count_pairs(trumps);
    if trumps.len() >= 10 && trump_pairs >= 2 {
        return KittyStrategy::TrumpInclusion;
    }

    // Every plain suit loaded with keepers: weak trumps are the discards.
    if !analyses.is_empty() && analyses.iter().all(|a| a.has_ace || a.pair_count >= 1) {
        return KittyStrategy::TrumpInclusion;
    }

    // Shortest eliminable suits first, as many as fit in the 8.
    let mut eliminable: Vec<&SuitAnalysis> = analyses.iter().filter(|a| a.eliminable()).collect();
    eliminable.sort_by_key(|a| a.cards.len());
    let mut chosen: Vec<Suit> = Vec::new();
    let mut used = 0;
    for analysis in eliminable.into_iter().take(2) {
        if used + analysis.cards.len() <= KITTY_SIZE {
            used += analysis.cards.len();
            chosen.push(analysis.suit);
        }
    }
    if !chosen.is_empty() {
        return KittyStrategy::SuitElimination(chosen);
    }

    KittyStrategy::Conservative
}

/// Burial order: fewest points first, then weakest, with surcharges that
/// keep pairs together and push trump-rank cards and above all jokers to
/// the very back, points or not.
fn weakness_order(cards: &[Card], trump: &TrumpInfo) -> Vec<Card> {
    let mut counts: HashMap<CommonId, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.common_id()).or_insert(0) += 1;
    }
    let mut ordered = cards.to_vec();
    ordered.sort_by_key(|card| {
        let mut weight = card.points() as u32 * 100 + card_strength(card, trump);
        if counts[&card.common_id()] >= 2 {
            weight += 25;
        }
        if card.is_joker() {
            weight += 2000;
        } else if card.rank() == Some(trump.rank) {
            weight += 800;
        }
        weight
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::JokerKind;

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn trump() -> TrumpInfo {
        TrumpInfo::with_suit(Rank::Two, Suit::Spades)
    }

    /// 33-card hand: a strong spade trump block, solid hearts, weak short
    /// clubs and diamonds.
    fn swap_hand() -> Vec<Card> {
        let mut hand = Vec::new();
        for rank in [
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ] {
            hand.push(c(Suit::Spades, rank, 0));
        }
        hand.push(Card::joker(JokerKind::Small, 0));
        for rank in [
            Rank::Ace,
            Rank::King,
            Rank::Queen,
            Rank::Jack,
            Rank::Ten,
            Rank::Nine,
            Rank::Eight,
            Rank::Seven,
            Rank::Six,
            Rank::Five,
            Rank::Four,
            Rank::Three,
        ] {
            hand.push(c(Suit::Hearts, rank, 0));
        }
        // Weak, short side suits.
        hand.push(c(Suit::Clubs, rank_n(0), 0));
        hand.push(c(Suit::Clubs, rank_n(1), 0));
        hand.push(c(Suit::Clubs, rank_n(2), 0));
        hand.push(c(Suit::Clubs, rank_n(4), 0));
        hand.push(c(Suit::Diamonds, rank_n(0), 0));
        hand.push(c(Suit::Diamonds, rank_n(1), 0));
        hand.push(c(Suit::Diamonds, rank_n(4), 0));
        hand.push(c(Suit::Diamonds, rank_n(5), 0));
        assert_eq!(hand.len(), 33);
        hand
    }

    fn rank_n(i: usize) -> Rank {
        // Skip the trump rank Two.
        [
            Rank::Three,
            Rank::Four,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
        ][i]
    }

    #[test]
    fn returns_exactly_eight_cards_from_hand() {
        let hand = swap_hand();
        let t = trump();
        let chosen = select_kitty(&hand, &t);
        assert_eq!(chosen.len(), KITTY_SIZE);
        for card in &chosen {
            assert!(hand.contains(card));
        }
    }

    #[test]
    fn eliminates_weak_short_suits() {
        let hand = swap_hand();
        let chosen = select_kitty(&hand, &trump());
        // Both weak four-card suits go, emptying two suits exactly.
        assert_eq!(
            chosen.iter().filter(|c| c.suit() == Some(Suit::Clubs)).count(),
            4
        );
        assert_eq!(
            chosen
                .iter()
                .filter(|c| c.suit() == Some(Suit::Diamonds))
                .count(),
            4
        );
    }

    #[test]
    fn never_buries_trump_in_normal_hands() {
        let hand = swap_hand();
        let t = trump();
        let chosen = select_kitty(&hand, &t);
        assert!(chosen.iter().all(|c| !t.is_trump(c)));
    }

    #[test]
    fn forced_trump_inclusion_with_short_plain_holding() {
        let t = trump();
        let mut hand: Vec<Card> = Vec::new();
        // 28 trumps, 5 plain cards: three trumps must go.
        for deck in 0..2u8 {
            for rank in Rank::ALL {
                if rank != Rank::Two {
                    hand.push(c(Suit::Spades, rank, deck));
                }
            }
            hand.push(Card::joker(JokerKind::Small, deck));
        }
        hand.push(c(Suit::Hearts, Rank::Three, 0));
        hand.push(c(Suit::Hearts, Rank::Four, 0));
        hand.push(c(Suit::Clubs, Rank::Six, 0));
        hand.push(c(Suit::Clubs, Rank::Seven, 0));
        hand.push(c(Suit::Diamonds, Rank::Eight, 0));
        assert_eq!(hand.len(), 33);

        let chosen = select_kitty(&hand, &t);
        assert_eq!(chosen.len(), KITTY_SIZE);
        // Some trump goes, but never a joker.
        assert!(chosen.iter().any(|card| t.is_trump(card)));
        assert!(chosen.iter().all(|card| !card.is_joker()));
    }

    #[test]
    fn conservative_burial_keeps_honors_and_points() {
        // No suit is eliminable (kings everywhere) and the trump holding
        // is ordinary, so the selector falls back to the weakest eight.
        let t = trump();
        let mut hand = Vec::new();
        for rank in [
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ] {
            hand.push(c(Suit::Spades, rank, 0));
        }
        hand.push(Card::joker(JokerKind::Big, 0));
        for rank in [
            Rank::Ace,
            Rank::King,
            Rank::Queen,
            Rank::Jack,
            Rank::Nine,
            Rank::Eight,
            Rank::Seven,
            Rank::Six,
            Rank::Three,
        ] {
            hand.push(c(Suit::Hearts, rank, 0));
        }
        for rank in [Rank::King, Rank::Eight, Rank::Six, Rank::Four, Rank::Three] {
            hand.push(c(Suit::Clubs, rank, 0));
        }
        for rank in [
            Rank::King,
            Rank::Nine,
            Rank::Eight,
            Rank::Six,
            Rank::Four,
            Rank::Three,
        ] {
            hand.push(c(Suit::Diamonds, rank, 0));
        }
        assert_eq!(hand.len(), 33);

        let chosen = select_kitty(&hand, &t);
        assert_eq!(chosen.len(), KITTY_SIZE);
        assert!(chosen.iter().all(|card| !t.is_trump(card)));
        assert!(chosen.iter().all(|card| card.points() == 0));
        assert!(chosen
            .iter()
            .all(|card| !matches!(card.rank(), Some(Rank::Ace | Rank::King))));
    }

    #[test]
    fn pairs_stay_home_when_loose_cards_exist() {
        let t = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let mut hand = swap_hand();
        // Turn two loose hearts into a pair by adding the twin.
        hand.retain(|card| card != &c(Suit::Clubs, Rank::Three, 0));
        hand.push(c(Suit::Hearts, Rank::Nine, 1));
        let chosen = select_kitty(&hand, &t);
        let nines_buried = chosen
            .iter()
            .filter(|card| card.suit() == Some(Suit::Hearts) && card.rank() == Some(Rank::Nine))
            .count();
        assert!(nines_buried == 0 || nines_buried == 2);
    }
}
