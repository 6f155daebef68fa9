//! Core card types: Suit, Rank, jokers, and the double-deck Card.
//!
//! A Tractor deck is two standard 54-card decks shuffled together. Cards are
//! value types; the `deck_id` distinguishes the two physical copies of each
//! card so pairs can be formed and multisets stay exact.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
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
    ];

    /// Position in the natural 2..A order.
    pub fn index(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum JokerKind {
    Small,
    Big,
}

/// Which of the two shuffled-together decks a card came from.
pub type DeckId = u8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Card {
    Regular {
        suit: Suit,
        rank: Rank,
        deck_id: DeckId,
    },
    Joker {
        kind: JokerKind,
        deck_id: DeckId,
    },
}

/// Card identity with the deck id erased: the two physical copies of a card
/// compare equal under their `CommonId`, which is what pairing is based on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum CommonId {
    Regular { suit: Suit, rank: Rank },
    Joker(JokerKind),
}

impl Card {
    pub fn regular(suit: Suit, rank: Rank, deck_id: DeckId) -> Self {
        Card::Regular {
            suit,
            rank,
            deck_id,
        }
    }

    pub fn joker(kind: JokerKind, deck_id: DeckId) -> Self {
        Card::Joker { kind, deck_id }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Regular { suit, .. } => Some(*suit),
            Card::Joker { .. } => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Regular { rank, .. } => Some(*rank),
            Card::Joker { .. } => None,
        }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::Joker { .. })
    }

    /// Fixed point value: 5s are worth 5, 10s and Kings 10, everything else 0.
    pub fn points(&self) -> u16 {
        match self {
            Card::Regular { rank: Rank::Five, .. } => 5,
            Card::Regular {
                rank: Rank::Ten | Rank::King,
                ..
            } => 10,
            _ => 0,
        }
    }

    pub fn is_point_card(&self) -> bool {
        self.points() > 0
    }

    pub fn common_id(&self) -> CommonId {
        match self {
            Card::Regular { suit, rank, .. } => CommonId::Regular {
                suit: *suit,
                rank: *rank,
            },
            Card::Joker { kind, .. } => CommonId::Joker(*kind),
        }
    }

    /// True when the two cards are copies of the same card (possibly from
    /// different decks). Jokers pair only with the same joker kind.
    pub fn is_pair_with(&self, other: &Card) -> bool {
        self.common_id() == other.common_id()
    }
}

// Ord on Card is only for stable sorting: regular cards by suit then rank
// then deck id, jokers after them. Do not use it for trick resolution or any
// comparison involving trump.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn key(c: &Card) -> (u8, u8, u8, u8) {
            match c {
                Card::Regular {
                    suit,
                    rank,
                    deck_id,
                } => (0, *suit as u8, rank.index(), *deck_id),
                Card::Joker { kind, deck_id } => (1, *kind as u8, 0, *deck_id),
            }
        }
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Regular { suit, rank, .. } => write!(f, "{}{}", rank.label(), suit.symbol()),
            Card::Joker {
                kind: JokerKind::Small,
                ..
            } => write!(f, "SJ"),
            Card::Joker {
                kind: JokerKind::Big,
                ..
            } => write!(f, "BJ"),
        }
    }
}

/// The full 108-card double deck in a fixed order.
pub fn double_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(108);
    for deck_id in 0..2u8 {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card::regular(suit, rank, deck_id));
            }
        }
        deck.push(Card::joker(JokerKind::Small, deck_id));
        deck.push(Card::joker(JokerKind::Big, deck_id));
    }
    deck
}

/// Total card points in one double deck: eight 5s, eight 10s, eight Kings.
pub const DECK_POINTS: u16 = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_deck_has_108_cards() {
        let deck = double_deck();
        assert_eq!(deck.len(), 108);
        let jokers = deck.iter().filter(|c| c.is_joker()).count();
        assert_eq!(jokers, 4);
    }

    #[test]
    fn double_deck_points_sum_to_200() {
        let total: u16 = double_deck().iter().map(|c| c.points()).sum();
        assert_eq!(total, DECK_POINTS);
    }

    #[test]
    fn point_values_by_rank() {
        assert_eq!(Card::regular(Suit::Hearts, Rank::Five, 0).points(), 5);
        assert_eq!(Card::regular(Suit::Hearts, Rank::Ten, 0).points(), 10);
        assert_eq!(Card::regular(Suit::Hearts, Rank::King, 0).points(), 10);
        assert_eq!(Card::regular(Suit::Hearts, Rank::Ace, 0).points(), 0);
        assert_eq!(Card::joker(JokerKind::Big, 0).points(), 0);
    }

    #[test]
    fn common_id_ignores_deck_id() {
        let a = Card::regular(Suit::Spades, Rank::Eight, 0);
        let b = Card::regular(Suit::Spades, Rank::Eight, 1);
        assert_ne!(a, b);
        assert!(a.is_pair_with(&b));

        let sj0 = Card::joker(JokerKind::Small, 0);
        let sj1 = Card::joker(JokerKind::Small, 1);
        let bj0 = Card::joker(JokerKind::Big, 0);
        assert!(sj0.is_pair_with(&sj1));
        assert!(!sj0.is_pair_with(&bj0));
    }

    #[test]
    fn deck_has_two_copies_of_every_common_id() {
        use std::collections::HashMap;
        let mut counts: HashMap<CommonId, usize> = HashMap::new();
        for card in double_deck() {
            *counts.entry(card.common_id()).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 54);
        assert!(counts.values().all(|&n| n == 2));
    }
}
