//! Trump classification and card comparison.
//!
//! A card is trump when it is a joker, carries the trump rank, or belongs to
//! the trump suit. Trump cards form a single virtual suit with a total
//! strength order; non-trump cards are only comparable within their own suit.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::cards::{Card, JokerKind, Rank, Suit};

/// Current trump designation. `suit` is `None` before any declaration, in
/// which case only jokers and trump-rank cards are trump.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TrumpInfo {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

/// The suit a card effectively belongs to for following purposes: its
/// natural suit, or the virtual trump suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EffectiveSuit {
    Suit(Suit),
    Trump,
}

impl TrumpInfo {
    pub fn new(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    pub fn with_suit(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub fn is_trump(&self, card: &Card) -> bool {
        match card {
            Card::Joker { .. } => true,
            Card::Regular { suit, rank, .. } => {
                *rank == self.rank || Some(*suit) == self.suit
            }
        }
    }

    pub fn effective_suit(&self, card: &Card) -> EffectiveSuit {
        if self.is_trump(card) {
            EffectiveSuit::Trump
        } else {
            // Regular card: jokers are always trump.
            EffectiveSuit::Suit(card.suit().expect("non-trump card has a suit"))
        }
    }

    /// Strength of a trump card within the trump group, higher is stronger.
    /// Returns `None` for non-trump cards.
    ///
    /// Order (ascending): trump-suit cards by rank (trump rank excluded),
    /// then off-suit trump-rank cards (tied), the trump-suit trump-rank
    /// card, the small joker, and the big joker.
    pub fn trump_strength(&self, card: &Card) -> Option<u8> {
        match card {
            Card::Joker {
                kind: JokerKind::Big,
                ..
            } => Some(17),
            Card::Joker {
                kind: JokerKind::Small,
                ..
            } => Some(16),
            Card::Regular { suit, rank, .. } if *rank == self.rank => {
                if Some(*suit) == self.suit {
                    Some(15)
                } else {
                    Some(14)
                }
            }
            Card::Regular { suit, rank, .. } if Some(*suit) == self.suit => {
                Some(self.skipped_rank_index(*rank))
            }
            _ => None,
        }
    }

    /// Compare two cards for trick purposes. `None` means incomparable
    /// (different non-trump suits); callers must treat that as "does not
    /// beat" and never use it for winner decisions directly.
    pub fn compare(&self, a: &Card, b: &Card) -> Option<Ordering> {
        match (self.trump_strength(a), self.trump_strength(b)) {
            (Some(sa), Some(sb)) => Some(sa.cmp(&sb)),
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (None, None) => {
                let (sa, ra) = (a.suit()?, a.rank()?);
                let (sb, rb) = (b.suit()?, b.rank()?);
                if sa == sb {
                    Some(ra.cmp(&rb))
                } else {
                    None
                }
            }
        }
    }

    /// Rank index with the trump rank skipped, so that the ranks adjacent to
    /// the trump rank become consecutive (e.g. with trump rank 5, a 4-4 6-6
    /// holding is a tractor).
    fn skipped_rank_index(&self, rank: Rank) -> u8 {
        debug_assert!(rank != self.rank);
        if rank.index() > self.rank.index() {
            rank.index() - 1
        } else {
            rank.index()
        }
    }

    /// Position of a card in the consecutive-pair sequence of its effective
    /// suit, or `None` when the card cannot extend a tractor run.
    ///
    /// Within a non-trump suit this is the skipped rank index. Within the
    /// trump group the trump-suit cards come first, then the trump-suit
    /// trump-rank card directly above the trump-suit ace, then the jokers.
    /// The off-suit trump-rank cards are mutually tied and hold no position.
    pub fn sequence_position(&self, card: &Card) -> Option<u8> {
        match card {
            Card::Joker {
                kind: JokerKind::Small,
                ..
            } => Some(13),
            Card::Joker {
                kind: JokerKind::Big,
                ..
            } => Some(14),
            Card::Regular { suit, rank, .. } if *rank == self.rank => {
                if Some(*suit) == self.suit {
                    Some(12)
                } else {
                    None
                }
            }
            Card::Regular { rank, .. } => Some(self.skipped_rank_index(*rank)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::regular(suit, rank, 0)
    }

    #[test]
    fn trump_classification() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        assert!(trump.is_trump(&Card::joker(JokerKind::Big, 0)));
        assert!(trump.is_trump(&c(Suit::Hearts, Rank::Two)));
        assert!(trump.is_trump(&c(Suit::Spades, Rank::Nine)));
        assert!(!trump.is_trump(&c(Suit::Hearts, Rank::Ace)));
    }

    #[test]
    fn trump_classification_without_suit() {
        let trump = TrumpInfo::new(Rank::Seven);
        assert!(trump.is_trump(&c(Suit::Clubs, Rank::Seven)));
        assert!(trump.is_trump(&Card::joker(JokerKind::Small, 1)));
        assert!(!trump.is_trump(&c(Suit::Clubs, Rank::Eight)));
    }

    #[test]
    fn trump_strength_order() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let bj = Card::joker(JokerKind::Big, 0);
        let sj = Card::joker(JokerKind::Small, 0);
        let rank_in_suit = c(Suit::Spades, Rank::Two);
        let rank_off_suit = c(Suit::Hearts, Rank::Two);
        let trump_ace = c(Suit::Spades, Rank::Ace);
        let trump_three = c(Suit::Spades, Rank::Three);

        let descending = [bj, sj, rank_in_suit, rank_off_suit, trump_ace, trump_three];
        for pair in descending.windows(2) {
            assert_eq!(
                trump.compare(&pair[0], &pair[1]),
                Some(Ordering::Greater),
                "{} should beat {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn off_suit_trump_rank_cards_tie() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let a = c(Suit::Hearts, Rank::Two);
        let b = c(Suit::Clubs, Rank::Two);
        assert_eq!(trump.compare(&a, &b), Some(Ordering::Equal));
    }

    #[test]
    fn non_trump_cross_suit_is_incomparable() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let a = c(Suit::Hearts, Rank::Ace);
        let b = c(Suit::Clubs, Rank::Three);
        assert_eq!(trump.compare(&a, &b), None);
    }

    #[test]
    fn trump_beats_non_trump() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let low_trump = c(Suit::Spades, Rank::Three);
        let ace = c(Suit::Hearts, Rank::Ace);
        assert_eq!(trump.compare(&low_trump, &ace), Some(Ordering::Greater));
    }

    #[test]
    fn sequence_skips_trump_rank() {
        // Trump rank 5: within a non-trump suit, 4 and 6 become consecutive.
        let trump = TrumpInfo::with_suit(Rank::Five, Suit::Spades);
        let four = trump.sequence_position(&c(Suit::Hearts, Rank::Four)).unwrap();
        let six = trump.sequence_position(&c(Suit::Hearts, Rank::Six)).unwrap();
        assert_eq!(six, four + 1);
    }

    #[test]
    fn trump_sequence_bridges_ace_rank_and_jokers() {
        let trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        let ace = trump.sequence_position(&c(Suit::Spades, Rank::Ace)).unwrap();
        let rank_card = trump.sequence_position(&c(Suit::Spades, Rank::Two)).unwrap();
        let sj = trump
            .sequence_position(&Card::joker(JokerKind::Small, 0))
            .unwrap();
        let bj = trump
            .sequence_position(&Card::joker(JokerKind::Big, 0))
            .unwrap();
        assert_eq!(rank_card, ace + 1);
        assert_eq!(sj, rank_card + 1);
        assert_eq!(bj, sj + 1);
        // Off-suit trump-rank cards never join a run.
        assert_eq!(trump.sequence_position(&c(Suit::Hearts, Rank::Two)), None);
    }
}
