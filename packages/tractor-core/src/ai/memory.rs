//! Card memory: everything the trick log reveals.
//!
//! Memory is rebuilt from the completed tricks plus the in-progress trick,
//! so it is a pure function of the state. Rebuilding each decision is
//! correct; [`MemoryCache`] avoids the recompute when the trick log has not
//! changed since the previous decision.

use tracing::debug;

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::combos::ComboType;
use crate::domain::state::{GameState, Seat, HAND_SIZE, SEATS};
use crate::domain::tricks::Trick;
use crate::domain::trump::{EffectiveSuit, TrumpInfo};

/// Expected trump cards per seat at round start: 36 trumps (jokers, the
/// eight trump-rank cards, the trump suit) over four 25-card hands.
const ASSUMED_TRUMP_SHARE: f64 = 9.0;

/// Cap on how much observed evidence outweighs the neutral prior in the
/// point-card probability blend.
const MAX_EVIDENCE_WEIGHT: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMemory {
    pub known_cards: Vec<Card>,
    pub estimated_hand_size: u8,
    /// Non-trump suits the seat has shown itself out of.
    pub suit_voids: Vec<Suit>,
    /// Set when the seat answered a trump lead with a non-trump card.
    pub trump_void: bool,
    pub trump_used: u8,
    /// Blended estimate that this seat's next play contains points.
    pub point_card_probability: f64,
    plays_observed: u32,
    point_plays: u32,
}

impl Default for PlayerMemory {
    fn default() -> Self {
        Self {
            known_cards: Vec::new(),
            estimated_hand_size: HAND_SIZE as u8,
            suit_voids: Vec::new(),
            trump_void: false,
            trump_used: 0,
            point_card_probability: 0.5,
            plays_observed: 0,
            point_plays: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardMemory {
    pub played_cards: Vec<Card>,
    pub trump_cards_played: u16,
    pub point_cards_played: u16,
    pub players: [PlayerMemory; SEATS],
    trump: TrumpInfo,
}

impl CardMemory {
    /// Accumulate the full trick log of the state.
    pub fn from_state(state: &GameState) -> Self {
        let mut memory = Self {
            played_cards: Vec::new(),
            trump_cards_played: 0,
            point_cards_played: 0,
            players: Default::default(),
            trump: state.trump,
        };
        for trick in state
            .completed_tricks
            .iter()
            .chain(state.current_trick.iter())
        {
            memory.observe_trick(trick);
        }
        memory
    }

    fn observe_trick(&mut self, trick: &Trick) {
        let lead_group = trick.lead_group();
        for play in trick.plays() {
            self.observe_play(play.seat, &play.cards, lead_group);
        }
    }

    fn observe_play(&mut self, seat: Seat, cards: &[Card], lead_group: EffectiveSuit) {
        let trump = self.trump;
        let mut trumps_in_play = 0u8;
        for card in cards {
            self.played_cards.push(*card);
            if trump.is_trump(card) {
                self.trump_cards_played += 1;
                trumps_in_play += 1;
            }
            if card.is_point_card() {
                self.point_cards_played += 1;
            }
        }

        let player = &mut self.players[seat as usize];
        player.known_cards.extend_from_slice(cards);
        player.trump_used += trumps_in_play;
        player.estimated_hand_size = player
            .estimated_hand_size
            .saturating_sub(cards.len() as u8);

        match lead_group {
            EffectiveSuit::Suit(suit) => {
                let off_suit = cards
                    .iter()
                    .any(|c| trump.effective_suit(c) != EffectiveSuit::Suit(suit));
                if off_suit && !player.suit_voids.contains(&suit) {
                    player.suit_voids.push(suit);
                }
            }
            EffectiveSuit::Trump => {
                if cards.iter().any(|c| !trump.is_trump(c)) {
                    player.trump_void = true;
                }
            }
        }

        player.plays_observed += 1;
        if cards.iter().any(|c| c.is_point_card()) {
            player.point_plays += 1;
        }
        let weight = (player.plays_observed as f64 * 0.1).min(MAX_EVIDENCE_WEIGHT);
        let observed = player.point_plays as f64 / player.plays_observed as f64;
        player.point_card_probability = (1.0 - weight) * 0.5 + weight * observed;
    }

    pub fn is_void(&self, seat: Seat, suit: Suit) -> bool {
        self.players[seat as usize].suit_voids.contains(&suit)
    }

    pub fn is_trump_void(&self, seat: Seat) -> bool {
        self.players[seat as usize].trump_void
    }

    fn copies_played(&self, suit: Suit, rank: Rank) -> usize {
        self.played_cards
            .iter()
            .filter(|c| c.suit() == Some(suit) && c.rank() == Some(rank))
            .count()
    }

    /// Whether a non-trump card of this rank is the biggest still live in
    /// its suit. A single needs both copies of every higher rank gone; a
    /// pair only needs one copy of every higher rank gone, because a lone
    /// played copy already kills the opposing pair.
    pub fn is_biggest_remaining(&self, suit: Suit, rank: Rank, kind: ComboType) -> bool {
        let needed = match kind {
            ComboType::Single => 2,
            ComboType::Pair | ComboType::Tractor => 1,
            ComboType::MultiCombo => return false,
        };
        Rank::ALL
            .iter()
            .filter(|r| r.index() > rank.index() && **r != self.trump.rank)
            .all(|&higher| self.copies_played(suit, higher) >= needed)
    }

    /// How depleted a seat's trump holding looks, from 0 (untouched
    /// estimate) to 1 (confirmed or effectively out).
    pub fn trump_exhaustion(&self, seat: Seat) -> f64 {
        let player = &self.players[seat as usize];
        if player.trump_void {
            return 1.0;
        }
        (player.trump_used as f64 / ASSUMED_TRUMP_SHARE).min(1.0)
    }

    /// Probability that `seat` holds the given card, from the observer's
    /// point of view. Played cards and the observer's own holding are
    /// certain; the rest spreads over seats not void in the card's suit,
    /// weighted by estimated hand size.
    pub fn card_probability(&self, observer: Seat, observer_hand: &[Card], seat: Seat, card: &Card) -> f64 {
        if seat == observer {
            return if observer_hand.contains(card) { 1.0 } else { 0.0 };
        }
        if self.played_cards.contains(card) || observer_hand.contains(card) {
            return 0.0;
        }
        let eligible: Vec<Seat> = (0..SEATS as Seat)
            .filter(|&s| s != observer && !self.seat_excluded(s, card))
            .collect();
        if !eligible.contains(&seat) {
            return 0.0;
        }
        let total: f64 = eligible
            .iter()
            .map(|&s| self.players[s as usize].estimated_hand_size as f64)
            .sum();
        if total == 0.0 {
            return 0.0;
        }
        self.players[seat as usize].estimated_hand_size as f64 / total
    }

    fn seat_excluded(&self, seat: Seat, card: &Card) -> bool {
        match self.trump.effective_suit(card) {
            EffectiveSuit::Trump => self.is_trump_void(seat),
            EffectiveSuit::Suit(suit) => self.is_void(seat, suit),
        }
    }
}

/// Single-entry cache keyed by the trick-log hash. A key mismatch discards
/// the stale memory and rebuilds.
#[derive(Debug, Default)]
pub struct MemoryCache {
    key: Option<(u64, usize)>,
    memory: Option<CardMemory>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory_for(&mut self, state: &GameState) -> CardMemory {
        let key = state.memory_cache_key();
        if self.key == Some(key) {
            if let Some(memory) = &self.memory {
                return memory.clone();
            }
        }
        if self.key.is_some() && self.key != Some(key) {
            debug!(?key, "memory cache stale, rebuilding");
        }
        let memory = CardMemory::from_state(state);
        self.key = Some(key);
        self.memory = Some(memory.clone());
        memory
    }
}
