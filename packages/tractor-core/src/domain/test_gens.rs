#![cfg(test)]
//! Shared proptest strategies for the domain suites.

use proptest::prelude::*;

use super::cards::{double_deck, Card, Rank, Suit};
use super::trump::TrumpInfo;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Any trump designation, declared or not.
pub fn trump_info() -> impl Strategy<Value = TrumpInfo> {
    (rank(), prop::option::of(suit())).prop_map(|(rank, suit)| TrumpInfo { rank, suit })
}

/// A random multiset of distinct physical cards from the double deck.
pub fn cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(double_deck(), count)
}

/// Two disjoint card pools: the first `left` cards and the next `right`
/// from one sampled subsequence, so no physical card repeats across them.
pub fn split_pools(left: usize, right: usize) -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    cards(left + right).prop_map(move |pool| {
        let (a, b) = pool.split_at(left);
        (a.to_vec(), b.to_vec())
    })
}
