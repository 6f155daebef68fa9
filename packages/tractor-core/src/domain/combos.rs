//! Combo model and enumeration: singles, pairs, tractors, multi-combos.
//!
//! A combo is a set of cards playable as one unit. Tractors are runs of
//! consecutive pairs in one effective suit, using the sequence positions
//! from [`TrumpInfo::sequence_position`]. A multi-combo is a leading-only
//! composite of several combos from the same suit.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::cards::{Card, CommonId, Suit};
use super::trump::{EffectiveSuit, TrumpInfo};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ComboType {
    Single,
    Pair,
    Tractor,
    MultiCombo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub kind: ComboType,
    pub cards: Vec<Card>,
    /// Numeric tie-break value: bigger shapes and higher tops score more.
    pub value: u32,
}

impl Combo {
    fn new(kind: ComboType, mut cards: Vec<Card>, trump: &TrumpInfo) -> Self {
        cards.sort();
        let value = combo_value(kind, &cards, trump);
        Self { kind, cards, value }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs the combo is built from (0 for singles).
    pub fn pair_count(&self) -> usize {
        match self.kind {
            ComboType::Single => 0,
            ComboType::Pair => 1,
            ComboType::Tractor => self.cards.len() / 2,
            ComboType::MultiCombo => count_pairs(&self.cards),
        }
    }

    /// Strength of the strongest card in the combo within its group.
    pub fn top_strength(&self, trump: &TrumpInfo) -> u32 {
        self.cards
            .iter()
            .map(|c| card_strength(c, trump))
            .max()
            .unwrap_or(0)
    }

    pub fn points(&self) -> u16 {
        self.cards.iter().map(|c| c.points()).sum()
    }
}

/// Within-group strength key. Trump cards are lifted above every plain rank
/// so the key orders any two cards of the same effective suit.
pub fn card_strength(card: &Card, trump: &TrumpInfo) -> u32 {
    match trump.trump_strength(card) {
        Some(s) => 20 + s as u32,
        None => card.rank().map(|r| r.index() as u32).unwrap_or(0),
    }
}

fn combo_value(kind: ComboType, cards: &[Card], trump: &TrumpInfo) -> u32 {
    let top = cards.iter().map(|c| card_strength(c, trump)).max().unwrap_or(0);
    match kind {
        ComboType::Single => top,
        ComboType::Pair => 100 + top,
        ComboType::Tractor => 100 * (cards.len() as u32 / 2) + top,
        ComboType::MultiCombo => 50 * cards.len() as u32 + top,
    }
}

/// Count how many disjoint pairs a card set contains (same common id).
pub fn count_pairs(cards: &[Card]) -> usize {
    let mut counts: HashMap<CommonId, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.common_id()).or_insert(0) += 1;
    }
    counts.values().map(|n| n / 2).sum()
}

/// Group a hand's cards by effective suit.
pub fn group_by_effective_suit(
    cards: &[Card],
    trump: &TrumpInfo,
) -> HashMap<EffectiveSuit, Vec<Card>> {
    let mut groups: HashMap<EffectiveSuit, Vec<Card>> = HashMap::new();
    for card in cards {
        groups.entry(trump.effective_suit(card)).or_default().push(*card);
    }
    groups
}

/// All combos a hand can form in isolation: one single per distinct card
/// identity, every pair, and every tractor including sub-tractors of the
/// maximal runs. Multi-combos are lead-specific and enumerated separately.
pub fn enumerate_combos(hand: &[Card], trump: &TrumpInfo) -> Vec<Combo> {
    let mut combos = Vec::new();
    for group in group_by_effective_suit(hand, trump).values() {
        combos.extend(combos_in_group(group, trump));
    }
    combos
}

fn combos_in_group(group: &[Card], trump: &TrumpInfo) -> Vec<Combo> {
    let mut by_common: BTreeMap<CommonId, Vec<Card>> = BTreeMap::new();
    for card in group {
        by_common.entry(card.common_id()).or_default().push(*card);
    }

    let mut combos = Vec::new();
    for copies in by_common.values() {
        combos.push(Combo::new(ComboType::Single, vec![copies[0]], trump));
        if copies.len() >= 2 {
            combos.push(Combo::new(
                ComboType::Pair,
                vec![copies[0], copies[1]],
                trump,
            ));
        }
    }

    // Tractor runs over the sequence positions that hold a full pair.
    let mut paired_positions: BTreeMap<u8, [Card; 2]> = BTreeMap::new();
    for copies in by_common.values() {
        if copies.len() >= 2 {
            if let Some(pos) = trump.sequence_position(&copies[0]) {
                paired_positions.insert(pos, [copies[0], copies[1]]);
            }
        }
    }

    let runs = consecutive_runs(&paired_positions);
    for run in runs {
        // Emit every contiguous window of length >= 2 so the validator and
        // the strategies can match any lead length.
        for start in 0..run.len() {
            for end in (start + 2)..=run.len() {
                let cards: Vec<Card> = run[start..end]
                    .iter()
                    .flat_map(|pair| pair.iter().copied())
                    .collect();
                combos.push(Combo::new(ComboType::Tractor, cards, trump));
            }
        }
    }

    combos
}

fn consecutive_runs(paired: &BTreeMap<u8, [Card; 2]>) -> Vec<Vec<[Card; 2]>> {
    let mut runs: Vec<Vec<[Card; 2]>> = Vec::new();
    let mut current: Vec<[Card; 2]> = Vec::new();
    let mut last_pos: Option<u8> = None;
    for (&pos, pair) in paired {
        match last_pos {
            Some(prev) if pos == prev + 1 => current.push(*pair),
            _ => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                current.push(*pair);
            }
        }
        last_pos = Some(pos);
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

/// Decompose a played card set into its units: tractors first (longest
/// runs), then pairs, then singles. This is the canonical reading of a lead.
pub fn decompose(cards: &[Card], trump: &TrumpInfo) -> Vec<Combo> {
    let mut by_common: BTreeMap<CommonId, Vec<Card>> = BTreeMap::new();
    for card in cards {
        by_common.entry(card.common_id()).or_default().push(*card);
    }

    let mut units = Vec::new();

    let mut paired_positions: BTreeMap<u8, [Card; 2]> = BTreeMap::new();
    for copies in by_common.values() {
        if copies.len() >= 2 {
            if let Some(pos) = trump.sequence_position(&copies[0]) {
                paired_positions.insert(pos, [copies[0], copies[1]]);
            }
        }
    }
    for run in consecutive_runs(&paired_positions) {
        let tractor_cards: Vec<Card> = run.iter().flat_map(|p| p.iter().copied()).collect();
        for card in &tractor_cards {
            let copies = by_common.get_mut(&card.common_id()).unwrap();
            let idx = copies.iter().position(|c| c == card).unwrap();
            copies.remove(idx);
        }
        units.push(Combo::new(ComboType::Tractor, tractor_cards, trump));
    }

    for copies in by_common.values_mut() {
        while copies.len() >= 2 {
            let pair = vec![copies.remove(0), copies.remove(0)];
            units.push(Combo::new(ComboType::Pair, pair, trump));
        }
        while let Some(card) = copies.pop() {
            units.push(Combo::new(ComboType::Single, vec![card], trump));
        }
    }

    // Largest units first, ties by strength, so winner comparison and the
    // follow router see a stable component order.
    units.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(b.top_strength(trump).cmp(&a.top_strength(trump)))
    });
    units
}

/// A multi-combo candidate: the entire holding of one non-trump suit read
/// as its unit decomposition. Returns `None` when the holding is a single
/// plain combo (nothing "multi" about it).
pub fn suit_multi_combo(hand: &[Card], trump: &TrumpInfo, suit: Suit) -> Option<Combo> {
    let cards: Vec<Card> = hand
        .iter()
        .filter(|c| trump.effective_suit(c) == EffectiveSuit::Suit(suit))
        .copied()
        .collect();
    if cards.len() < 2 {
        return None;
    }
    let units = decompose(&cards, trump);
    if units.len() < 2 {
        return None;
    }
    Some(Combo::new(ComboType::MultiCombo, cards, trump))
}

/// A multi-combo may only be led when no other seat can beat any of its
/// components in the led suit: for each component, no opponent holds a
/// strictly higher same-shape unit of that suit.
pub fn multi_combo_is_unbeatable(
    lead_cards: &[Card],
    trump: &TrumpInfo,
    other_hands: &[&[Card]],
) -> bool {
    let suit = match trump.effective_suit(&lead_cards[0]) {
        EffectiveSuit::Suit(s) => s,
        EffectiveSuit::Trump => return false,
    };
    let units = decompose(lead_cards, trump);

    for hand in other_hands {
        let in_suit: Vec<Card> = hand
            .iter()
            .filter(|c| trump.effective_suit(c) == EffectiveSuit::Suit(suit))
            .copied()
            .collect();
        if in_suit.is_empty() {
            continue;
        }
        let rival_combos = enumerate_combos(&in_suit, trump);
        for unit in &units {
            let beatable = rival_combos.iter().any(|rival| {
                rival.kind == unit.kind
                    && rival.len() == unit.len()
                    && rival.top_strength(trump) > unit.top_strength(trump)
            });
            if beatable {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{JokerKind, Rank, Suit};

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn trump() -> TrumpInfo {
        TrumpInfo::with_suit(Rank::Two, Suit::Spades)
    }

    #[test]
    fn enumerates_singles_and_pairs() {
        let hand = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Clubs, Rank::Ace, 0),
        ];
        let combos = enumerate_combos(&hand, &trump());
        let singles = combos.iter().filter(|c| c.kind == ComboType::Single).count();
        let pairs = combos.iter().filter(|c| c.kind == ComboType::Pair).count();
        assert_eq!(singles, 2);
        assert_eq!(pairs, 1);
    }

    #[test]
    fn finds_plain_suit_tractor() {
        let hand = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Hearts, Rank::Eight, 0),
            c(Suit::Hearts, Rank::Eight, 1),
        ];
        let combos = enumerate_combos(&hand, &trump());
        let tractor = combos
            .iter()
            .find(|c| c.kind == ComboType::Tractor)
            .expect("7-7-8-8 forms a tractor");
        assert_eq!(tractor.len(), 4);
    }

    #[test]
    fn tractor_skips_trump_rank_gap() {
        // Trump rank 2, so hearts A-A K-K are consecutive but pairs around
        // a missing rank are not.
        let hand = vec![
            c(Suit::Hearts, Rank::King, 0),
            c(Suit::Hearts, Rank::King, 1),
            c(Suit::Hearts, Rank::Ace, 0),
            c(Suit::Hearts, Rank::Ace, 1),
            c(Suit::Hearts, Rank::Nine, 0),
            c(Suit::Hearts, Rank::Nine, 1),
        ];
        let combos = enumerate_combos(&hand, &trump());
        let tractors: Vec<_> = combos.iter().filter(|c| c.kind == ComboType::Tractor).collect();
        assert_eq!(tractors.len(), 1);
        assert_eq!(tractors[0].len(), 4);
        assert!(tractors[0]
            .cards
            .iter()
            .all(|card| matches!(card.rank(), Some(Rank::King | Rank::Ace))));
    }

    #[test]
    fn trump_rank_pair_extends_trump_suit_run() {
        // Spades trump, rank 2: A♠A♠ + 2♠2♠ is a tractor across the insert
        // point, and 2♠2♠ + SJ SJ as well.
        let t = trump();
        let hand = vec![
            c(Suit::Spades, Rank::Ace, 0),
            c(Suit::Spades, Rank::Ace, 1),
            c(Suit::Spades, Rank::Two, 0),
            c(Suit::Spades, Rank::Two, 1),
            Card::joker(JokerKind::Small, 0),
            Card::joker(JokerKind::Small, 1),
            Card::joker(JokerKind::Big, 0),
            Card::joker(JokerKind::Big, 1),
        ];
        let combos = enumerate_combos(&hand, &t);
        let longest = combos
            .iter()
            .filter(|c| c.kind == ComboType::Tractor)
            .max_by_key(|c| c.len())
            .unwrap();
        assert_eq!(longest.len(), 8);
    }

    #[test]
    fn off_suit_trump_rank_pair_does_not_extend_runs() {
        let t = trump();
        let hand = vec![
            c(Suit::Spades, Rank::Ace, 0),
            c(Suit::Spades, Rank::Ace, 1),
            c(Suit::Hearts, Rank::Two, 0),
            c(Suit::Hearts, Rank::Two, 1),
        ];
        let combos = enumerate_combos(&hand, &t);
        assert!(combos.iter().all(|c| c.kind != ComboType::Tractor));
    }

    #[test]
    fn sub_tractors_are_emitted() {
        let hand = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Hearts, Rank::Eight, 0),
            c(Suit::Hearts, Rank::Eight, 1),
            c(Suit::Hearts, Rank::Nine, 0),
            c(Suit::Hearts, Rank::Nine, 1),
        ];
        let combos = enumerate_combos(&hand, &trump());
        let lengths: Vec<usize> = combos
            .iter()
            .filter(|c| c.kind == ComboType::Tractor)
            .map(|c| c.len())
            .collect();
        // 7-8, 8-9, and 7-8-9.
        assert_eq!(lengths.iter().filter(|&&l| l == 4).count(), 2);
        assert_eq!(lengths.iter().filter(|&&l| l == 6).count(), 1);
    }

    #[test]
    fn decompose_reads_tractor_then_single() {
        let t = trump();
        let cards = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Hearts, Rank::Eight, 0),
            c(Suit::Hearts, Rank::Eight, 1),
            c(Suit::Hearts, Rank::Ace, 0),
        ];
        let units = decompose(&cards, &t);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].kind, ComboType::Tractor);
        assert_eq!(units[1].kind, ComboType::Single);
    }

    #[test]
    fn multi_combo_requires_multiple_units() {
        let t = trump();
        let hand = vec![
            c(Suit::Hearts, Rank::Ace, 0),
            c(Suit::Hearts, Rank::King, 0),
            c(Suit::Hearts, Rank::King, 1),
            c(Suit::Clubs, Rank::Four, 0),
        ];
        let mc = suit_multi_combo(&hand, &t, Suit::Hearts).expect("A + KK is a multi-combo");
        assert_eq!(mc.len(), 3);
        assert!(suit_multi_combo(&hand, &t, Suit::Clubs).is_none());
    }

    #[test]
    fn multi_combo_beatable_by_higher_pair() {
        let t = trump();
        let lead = vec![
            c(Suit::Hearts, Rank::Ace, 0),
            c(Suit::Hearts, Rank::Queen, 0),
            c(Suit::Hearts, Rank::Queen, 1),
        ];
        let rival = vec![
            c(Suit::Hearts, Rank::King, 0),
            c(Suit::Hearts, Rank::King, 1),
            c(Suit::Clubs, Rank::Three, 0),
        ];
        assert!(!multi_combo_is_unbeatable(&lead, &t, &[&rival]));

        let weak_rival = vec![
            c(Suit::Hearts, Rank::Ten, 0),
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Clubs, Rank::Three, 0),
        ];
        assert!(multi_combo_is_unbeatable(&lead, &t, &[&weak_rival]));
    }
}
