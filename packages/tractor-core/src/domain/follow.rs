//! Follow-suit legality: the rule ladder a candidate play must satisfy
//! against the current lead, and the structure matcher used to decide
//! whether a follow can contest the trick.

use std::collections::HashMap;

use super::cards::{Card, CommonId};
use super::combos::{self, Combo, ComboType};
use super::trump::{EffectiveSuit, TrumpInfo};

/// Cards of `hand` belonging to the given effective suit.
pub fn cards_in_group(hand: &[Card], group: EffectiveSuit, trump: &TrumpInfo) -> Vec<Card> {
    hand.iter()
        .filter(|c| trump.effective_suit(c) == group)
        .copied()
        .collect()
}

fn is_submultiset(subset: &[Card], of: &[Card]) -> bool {
    let mut counts: HashMap<Card, isize> = HashMap::new();
    for card in of {
        *counts.entry(*card).or_insert(0) += 1;
    }
    for card in subset {
        let n = counts.entry(*card).or_insert(0);
        *n -= 1;
        if *n < 0 {
            return false;
        }
    }
    true
}

/// Follow-suit rule ladder. A proposed play is legal iff:
///
/// 1. it has the lead's length and comes from the hand;
/// 2. with enough cards in the led group, the play stays in the group;
/// 3. when short, the play exhausts the group and fills with anything;
/// 4. the play uses as many pairs from the group as the lead demands and
///    the hand can supply (tractor shape itself is never forced on a
///    follower, only the pair count).
pub fn is_legal_play(lead: &[Card], hand: &[Card], play: &[Card], trump: &TrumpInfo) -> bool {
    if play.len() != lead.len() || !is_submultiset(play, hand) {
        return false;
    }

    let group = trump.effective_suit(&lead[0]);
    let hand_in_group = cards_in_group(hand, group, trump);
    let play_in_group: Vec<Card> = play
        .iter()
        .filter(|c| trump.effective_suit(c) == group)
        .copied()
        .collect();

    if hand_in_group.len() >= lead.len() {
        if play_in_group.len() != play.len() {
            return false;
        }
    } else if !is_submultiset(&hand_in_group, play) {
        // Short of the group: every group card must be in the play.
        return false;
    }

    let lead_pairs = combos::count_pairs(lead);
    if lead_pairs > 0 && hand_in_group.len() >= lead.len() {
        let hand_pairs = combos::count_pairs(&hand_in_group);
        let required = lead_pairs.min(hand_pairs);
        if combos::count_pairs(&play_in_group) < required {
            return false;
        }
    }

    true
}

/// Try to allocate `cards` into the lead's unit shapes (tractors of the
/// same length, pairs, singles). Returns the allocation when the cards can
/// fill every unit, which is the precondition for contesting the trick.
pub fn format_matches(
    lead_units: &[Combo],
    cards: &[Card],
    trump: &TrumpInfo,
) -> Option<Vec<Combo>> {
    let group = trump.effective_suit(&cards[0]);
    if cards.iter().any(|c| trump.effective_suit(c) != group) {
        return None;
    }
    if cards.len() != lead_units.iter().map(|u| u.len()).sum::<usize>() {
        return None;
    }
    let mut remaining = cards.to_vec();
    match_units(lead_units, &mut remaining, trump)
}

fn match_units(
    units: &[Combo],
    remaining: &mut Vec<Card>,
    trump: &TrumpInfo,
) -> Option<Vec<Combo>> {
    let unit = match units.first() {
        Some(u) => u,
        None => return Some(Vec::new()),
    };
    let rest = &units[1..];

    let candidates: Vec<Combo> = match unit.kind {
        ComboType::Tractor => combos::enumerate_combos(remaining, trump)
            .into_iter()
            .filter(|c| c.kind == ComboType::Tractor && c.len() == unit.len())
            .collect(),
        ComboType::Pair => combos::enumerate_combos(remaining, trump)
            .into_iter()
            .filter(|c| c.kind == ComboType::Pair)
            .collect(),
        ComboType::Single => {
            let mut seen: Vec<CommonId> = Vec::new();
            remaining
                .iter()
                .filter(|c| {
                    let id = c.common_id();
                    if seen.contains(&id) {
                        false
                    } else {
                        seen.push(id);
                        true
                    }
                })
                .map(|c| Combo {
                    kind: ComboType::Single,
                    cards: vec![*c],
                    value: 0,
                })
                .collect()
        }
        ComboType::MultiCombo => return None,
    };

    for candidate in candidates {
        remove_cards(remaining, &candidate.cards);
        if let Some(mut allocated) = match_units(rest, remaining, trump) {
            remaining.extend(candidate.cards.iter().copied());
            allocated.insert(0, candidate);
            return Some(allocated);
        }
        remaining.extend(candidate.cards.iter().copied());
    }
    None
}

fn remove_cards(from: &mut Vec<Card>, cards: &[Card]) {
    for card in cards {
        if let Some(idx) = from.iter().position(|c| c == card) {
            from.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Rank, Suit};

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn trump() -> TrumpInfo {
        TrumpInfo::with_suit(Rank::Two, Suit::Spades)
    }

    #[test]
    fn must_follow_suit_when_able() {
        // A♥ led; the only heart must be played.
        let lead = vec![c(Suit::Hearts, Rank::Ace, 0)];
        let hand = vec![
            c(Suit::Hearts, Rank::Six, 0),
            c(Suit::Spades, Rank::Seven, 0),
            c(Suit::Clubs, Rank::Three, 0),
        ];
        assert!(is_legal_play(&lead, &hand, &[hand[0]], &trump()));
        assert!(!is_legal_play(&lead, &hand, &[hand[1]], &trump()));
        assert!(!is_legal_play(&lead, &hand, &[hand[2]], &trump()));
    }

    #[test]
    fn short_suit_must_exhaust_then_fill() {
        // 8♦8♦ led, one diamond in hand: it must be in the play, filler free.
        let t = TrumpInfo::new(Rank::Two);
        let lead = vec![c(Suit::Diamonds, Rank::Eight, 0), c(Suit::Diamonds, Rank::Eight, 1)];
        let hand = vec![
            c(Suit::Diamonds, Rank::Ten, 0),
            c(Suit::Spades, Rank::Three, 0),
            c(Suit::Spades, Rank::Four, 0),
        ];
        assert!(is_legal_play(&lead, &hand, &[hand[0], hand[1]], &t));
        assert!(is_legal_play(&lead, &hand, &[hand[0], hand[2]], &t));
        assert!(!is_legal_play(&lead, &hand, &[hand[1], hand[2]], &t));
    }

    #[test]
    fn pair_lead_demands_a_pair_when_held() {
        let t = trump();
        let lead = vec![c(Suit::Hearts, Rank::Eight, 0), c(Suit::Hearts, Rank::Eight, 1)];
        let hand = vec![
            c(Suit::Hearts, Rank::Five, 0),
            c(Suit::Hearts, Rank::Five, 1),
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Hearts, Rank::Queen, 0),
        ];
        // Two loose hearts are illegal while the pair of fives is in hand.
        assert!(!is_legal_play(&lead, &hand, &[hand[2], hand[3]], &t));
        assert!(is_legal_play(&lead, &hand, &[hand[0], hand[1]], &t));
    }

    #[test]
    fn tractor_lead_demands_available_pairs_not_shape() {
        let t = trump();
        let lead = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Hearts, Rank::Eight, 0),
            c(Suit::Hearts, Rank::Eight, 1),
        ];
        // One non-adjacent pair plus singles: pair must be used, shape not.
        let hand = vec![
            c(Suit::Hearts, Rank::Three, 0),
            c(Suit::Hearts, Rank::Three, 1),
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Hearts, Rank::King, 0),
            c(Suit::Hearts, Rank::Ace, 0),
        ];
        assert!(is_legal_play(
            &lead,
            &hand,
            &[hand[0], hand[1], hand[2], hand[3]],
            &t
        ));
        assert!(!is_legal_play(
            &lead,
            &hand,
            &[hand[2], hand[3], hand[4], hand[0]],
            &t
        ));
    }

    #[test]
    fn void_in_group_plays_anything() {
        let t = trump();
        let lead = vec![c(Suit::Diamonds, Rank::Nine, 0)];
        let hand = vec![c(Suit::Clubs, Rank::Four, 0), c(Suit::Spades, Rank::Ace, 0)];
        assert!(is_legal_play(&lead, &hand, &[hand[0]], &t));
        assert!(is_legal_play(&lead, &hand, &[hand[1]], &t));
    }

    #[test]
    fn format_match_allows_pairs_for_non_adjacent_pair_units() {
        let t = trump();
        // Lead decomposes to two separate pairs; an adjacent two-pair block
        // still fills both units.
        let lead = vec![
            c(Suit::Hearts, Rank::Four, 0),
            c(Suit::Hearts, Rank::Four, 1),
            c(Suit::Hearts, Rank::Nine, 0),
            c(Suit::Hearts, Rank::Nine, 1),
        ];
        let lead_units = combos::decompose(&lead, &t);
        let follow = vec![
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Hearts, Rank::Jack, 1),
            c(Suit::Hearts, Rank::Queen, 0),
            c(Suit::Hearts, Rank::Queen, 1),
        ];
        assert!(format_matches(&lead_units, &follow, &t).is_some());
    }

    #[test]
    fn format_match_rejects_loose_cards_for_tractor() {
        let t = trump();
        let lead = vec![
            c(Suit::Hearts, Rank::Seven, 0),
            c(Suit::Hearts, Rank::Seven, 1),
            c(Suit::Hearts, Rank::Eight, 0),
            c(Suit::Hearts, Rank::Eight, 1),
        ];
        let lead_units = combos::decompose(&lead, &t);
        let follow = vec![
            c(Suit::Hearts, Rank::Jack, 0),
            c(Suit::Hearts, Rank::Jack, 1),
            c(Suit::Hearts, Rank::Queen, 0),
            c(Suit::Hearts, Rank::King, 0),
        ];
        assert!(format_matches(&lead_units, &follow, &t).is_none());
    }
}
