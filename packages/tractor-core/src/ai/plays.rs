//! Candidate-play construction shared by the strategies: structured plays
//! that can contest a trick, cheapest-win selection, disposal ordering,
//! and point contribution.

use std::collections::HashMap;

use crate::domain::cards::{Card, CommonId, Rank};
use crate::domain::combos::{self, card_strength, Combo, ComboType};
use crate::domain::follow::cards_in_group;
use crate::domain::state::Seat;
use crate::domain::tricks::Trick;
use crate::domain::trump::{EffectiveSuit, TrumpInfo};

/// Bound on how many structured fillings are explored per trick; leads
/// rarely have more than a couple of units, so this is generous.
const MAX_STRUCTURED_PLAYS: usize = 64;

/// How reluctant the AI should be to part with a card, higher meaning
/// more valuable to keep. Strength dominates; points add on top so that
/// disposal never throws a ten away ahead of a spot card.
pub fn conservation_value(card: &Card, trump: &TrumpInfo) -> u32 {
    card_strength(card, trump) * 2 + card.points() as u32
}

/// Disposal order for `n` cards: lowest conservation value first, with a
/// surcharge for breaking up a held pair.
pub fn disposal_cards(hand: &[Card], n: usize, trump: &TrumpInfo) -> Vec<Card> {
    let mut counts: HashMap<CommonId, usize> = HashMap::new();
    for card in hand {
        *counts.entry(card.common_id()).or_insert(0) += 1;
    }
    let mut ordered: Vec<Card> = hand.to_vec();
    ordered.sort_by_key(|card| {
        let pair_surcharge = if counts[&card.common_id()] >= 2 { 15 } else { 0 };
        conservation_value(card, trump) + pair_surcharge
    });
    ordered.truncate(n);
    ordered
}

/// Highest-point cards first: tens and kings ahead of fives, then by rank
/// so a king is preferred over a ten when both are worth ten.
pub fn point_contribution_order(cards: &[Card]) -> Vec<Card> {
    let mut ordered: Vec<Card> = cards.to_vec();
    ordered.sort_by_key(|card| {
        let rank_pref = match card.rank() {
            Some(Rank::King) => 0,
            Some(Rank::Ten) => 1,
            Some(Rank::Five) => 2,
            _ => 3,
        };
        (std::cmp::Reverse(card.points()), rank_pref)
    });
    ordered
}

/// Every way to fill the lead's unit shapes from `cards`, deduplicated.
/// Only same-shape fillings can contest a trick, so these are the raw
/// material for beating plays.
pub fn structured_plays(cards: &[Card], lead_units: &[Combo], trump: &TrumpInfo) -> Vec<Vec<Card>> {
    let mut results: Vec<Vec<Card>> = Vec::new();
    let mut remaining = cards.to_vec();
    let mut current: Vec<Card> = Vec::new();
    fill_units(&mut remaining, lead_units, trump, &mut current, &mut results);

    for play in &mut results {
        play.sort();
    }
    results.sort();
    results.dedup();
    results
}

fn fill_units(
    remaining: &mut Vec<Card>,
    units: &[Combo],
    trump: &TrumpInfo,
    current: &mut Vec<Card>,
    results: &mut Vec<Vec<Card>>,
) {
    if results.len() >= MAX_STRUCTURED_PLAYS {
        return;
    }
    let unit = match units.first() {
        Some(u) => u,
        None => {
            results.push(current.clone());
            return;
        }
    };

    let candidates: Vec<Combo> = match unit.kind {
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
        kind => combos::enumerate_combos(remaining, trump)
            .into_iter()
            .filter(|c| c.kind == kind && c.len() == unit.len())
            .collect(),
    };

    for candidate in candidates {
        for card in &candidate.cards {
            let idx = remaining.iter().position(|c| c == card).expect("candidate from remaining");
            remaining.remove(idx);
        }
        current.extend(candidate.cards.iter().copied());
        fill_units(remaining, &units[1..], trump, current, results);
        current.truncate(current.len() - candidate.cards.len());
        remaining.extend(candidate.cards.iter().copied());
    }
}

/// All plays from `hand` that would take over the trick if played now by
/// `seat`, cheapest first. In-group takeovers come from the led group;
/// trump takeovers only exist once the hand is void in that group.
pub fn beating_plays(trick: &Trick, seat: Seat, hand: &[Card], trump: &TrumpInfo) -> Vec<Vec<Card>> {
    let lead_group = trick.lead_group();
    let in_group = cards_in_group(hand, lead_group, trump);

    let mut candidates: Vec<Vec<Card>> = Vec::new();
    if in_group.len() >= trick.lead_len() {
        candidates.extend(structured_plays(&in_group, trick.lead_units(), trump));
    } else if in_group.is_empty() && lead_group != EffectiveSuit::Trump {
        let trumps = cards_in_group(hand, EffectiveSuit::Trump, trump);
        if trumps.len() >= trick.lead_len() {
            candidates.extend(structured_plays(&trumps, trick.lead_units(), trump));
        }
    }

    let mut beating: Vec<Vec<Card>> = candidates
        .into_iter()
        .filter(|cards| {
            let mut probe = trick.clone();
            probe.add_play(seat, cards.clone()).is_ok() && probe.winning_seat() == seat
        })
        .collect();

    beating.sort_by_key(|cards| {
        cards
            .iter()
            .map(|c| conservation_value(c, trump))
            .sum::<u32>()
    });
    beating
}

/// The cheapest play that takes the trick, if any.
pub fn minimal_beating_play(
    trick: &Trick,
    seat: Seat,
    hand: &[Card],
    trump: &TrumpInfo,
) -> Option<Vec<Card>> {
    beating_plays(trick, seat, hand, trump).into_iter().next()
}
