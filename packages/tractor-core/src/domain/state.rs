//! Game state: seats, teams, phases, and the round's mutable record.
//!
//! The state is a plain value. AI entry points borrow it read-only; the
//! transition methods here are what external drivers (and the simulator)
//! use to apply returned decisions and advance the round.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use super::cards::{Card, Rank, Suit};
use super::combos;
use super::follow;
use super::tricks::{kitty_multiplier, Trick, TrickEnded};
use super::trump::TrumpInfo;
use crate::error::EngineError;

pub type Seat = u8; // 0..=3, partners across
pub const SEATS: usize = 4;

/// Number of cards each seat holds after the kitty swap.
pub const HAND_SIZE: usize = 25;
/// Number of cards hidden in the kitty.
pub const KITTY_SIZE: usize = 8;

pub fn partner(seat: Seat) -> Seat {
    (seat + 2) % 4
}

/// Teams are interleaved around the table: even seats are A, odd seats B.
pub fn team_of(seat: Seat) -> TeamId {
    if seat % 2 == 0 {
        TeamId::A
    } else {
        TeamId::B
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub fn other(self) -> TeamId {
        match self {
            TeamId::A => TeamId::B,
            TeamId::B => TeamId::A,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub team: TeamId,
    pub is_human: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub rank: Rank,
    /// Card points captured by this team during the current round.
    pub points: u16,
    pub is_defending: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Dealing,
    Declaring,
    KittySwap,
    Playing,
    Scoring,
}

/// A trump declaration made during the dealing/declaring window. A later
/// declaration replaces it only when strictly stronger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub seat: Seat,
    pub suit: Suit,
    /// Trump-rank copies shown (1 or 2); the override comparison key.
    pub strength: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: [Player; 4],
    pub teams: [Team; 2],
    /// Undealt cards, only non-empty during the dealing phase.
    pub deck: Vec<Card>,
    pub kitty: Vec<Card>,
    pub current_trick: Option<Trick>,
    pub trump: TrumpInfo,
    pub declaration: Option<Declaration>,
    pub completed_tricks: Vec<Trick>,
    pub round_number: u32,
    pub current_player: Seat,
    pub round_starter: Seat,
    pub phase: GamePhase,
}

impl GameState {
    /// Fresh round shell: empty hands, no tricks, trump rank set to the
    /// defending team's rank, dealing yet to happen.
    pub fn new_round(
        round_number: u32,
        defending: TeamId,
        ranks: [Rank; 2],
        round_starter: Seat,
    ) -> Self {
        let players = [0, 1, 2, 3].map(|seat| Player {
            seat,
            hand: Vec::new(),
            team: team_of(seat),
            is_human: false,
        });
        let teams = [TeamId::A, TeamId::B].map(|id| Team {
            id,
            rank: ranks[id as usize],
            points: 0,
            is_defending: id == defending,
        });
        let trump_rank = teams[defending as usize].rank;
        Self {
            players,
            teams,
            deck: Vec::new(),
            kitty: Vec::new(),
            current_trick: None,
            trump: TrumpInfo::new(trump_rank),
            declaration: None,
            completed_tricks: Vec::new(),
            round_number,
            current_player: round_starter,
            round_starter,
            phase: GamePhase::Dealing,
        }
    }

    pub fn player(&self, seat: Seat) -> Result<&Player, EngineError> {
        self.players
            .get(seat as usize)
            .ok_or(EngineError::UnknownSeat(seat))
    }

    pub fn player_mut(&mut self, seat: Seat) -> Result<&mut Player, EngineError> {
        self.players
            .get_mut(seat as usize)
            .ok_or(EngineError::UnknownSeat(seat))
    }

    pub fn hand(&self, seat: Seat) -> Result<&[Card], EngineError> {
        Ok(&self.player(seat)?.hand)
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id as usize]
    }

    fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id as usize]
    }

    pub fn attacking_team(&self) -> &Team {
        self.teams.iter().find(|t| !t.is_defending).expect("one team attacks")
    }

    pub fn defending_team(&self) -> &Team {
        self.teams.iter().find(|t| t.is_defending).expect("one team defends")
    }

    pub fn is_attacking(&self, seat: Seat) -> bool {
        !self.team(team_of(seat)).is_defending
    }

    pub fn tricks_played(&self) -> usize {
        self.completed_tricks.len()
    }

    pub fn tricks_remaining(&self) -> usize {
        HAND_SIZE - self.tricks_played()
    }

    /// Hands of every other seat, in seat order. Used for multi-combo lead
    /// legality, which needs the full table.
    pub fn other_hands(&self, seat: Seat) -> Vec<&[Card]> {
        self.players
            .iter()
            .filter(|p| p.seat != seat)
            .map(|p| p.hand.as_slice())
            .collect()
    }

    pub fn require_phase(&self, expected: GamePhase) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Key for the AI memory cache: a hash of the trick log plus the length
    /// of the in-progress trick.
    pub fn memory_cache_key(&self) -> (u64, usize) {
        let mut hasher = Xxh3::new();
        for trick in self
            .completed_tricks
            .iter()
            .chain(self.current_trick.iter())
        {
            for play in trick.plays() {
                hasher.update(&[play.seat]);
                for card in &play.cards {
                    hash_card(&mut hasher, card);
                }
            }
        }
        let in_progress = self
            .current_trick
            .as_ref()
            .map(|t| t.plays().len())
            .unwrap_or(0);
        (hasher.digest(), in_progress)
    }

    // ---------- Transitions ----------

    /// Record a declaration if it beats the standing one. Legal during the
    /// dealing and declaring phases only.
    pub fn apply_declaration(
        &mut self,
        seat: Seat,
        suit: Suit,
        strength: u8,
    ) -> Result<bool, EngineError> {
        self.player(seat)?;
        if !matches!(self.phase, GamePhase::Dealing | GamePhase::Declaring) {
            return Err(EngineError::WrongPhase {
                expected: GamePhase::Declaring,
                actual: self.phase,
            });
        }
        let stronger = match self.declaration {
            None => true,
            Some(current) => strength > current.strength,
        };
        if stronger {
            self.declaration = Some(Declaration {
                seat,
                suit,
                strength,
            });
            self.trump = TrumpInfo::with_suit(self.trump.rank, suit);
        }
        Ok(stronger)
    }

    /// Close the declaration window: trump is frozen, the round starter
    /// picks up the kitty and must swap.
    pub fn finish_dealing(&mut self) -> Result<(), EngineError> {
        if !matches!(self.phase, GamePhase::Dealing | GamePhase::Declaring) {
            return Err(EngineError::WrongPhase {
                expected: GamePhase::Dealing,
                actual: self.phase,
            });
        }
        let kitty = std::mem::take(&mut self.kitty);
        let starter = self.round_starter;
        self.player_mut(starter)?.hand.extend(kitty);
        self.phase = GamePhase::KittySwap;
        Ok(())
    }

    /// Bury the given 8 cards as the kitty and start play.
    pub fn apply_kitty_swap(&mut self, seat: Seat, discards: &[Card]) -> Result<(), EngineError> {
        self.require_phase(GamePhase::KittySwap)?;
        if discards.len() != KITTY_SIZE {
            return Err(EngineError::SelectionSizeMismatch {
                expected: KITTY_SIZE,
                actual: discards.len(),
            });
        }
        let hand = &mut self.player_mut(seat)?.hand;
        if hand.len() != HAND_SIZE + KITTY_SIZE {
            return Err(EngineError::WrongHandSize {
                expected: HAND_SIZE + KITTY_SIZE,
                actual: hand.len(),
            });
        }
        let mut remaining = hand.clone();
        remove_from_hand(&mut remaining, discards)?;
        *hand = remaining;
        self.kitty = discards.to_vec();
        self.phase = GamePhase::Playing;
        self.current_player = self.round_starter;
        Ok(())
    }

    /// Apply one play for the seat whose turn it is. Returns the trick
    /// result when this play completed a trick. On the round's final trick
    /// the phase moves to `Scoring`.
    pub fn apply_play(
        &mut self,
        seat: Seat,
        cards: &[Card],
    ) -> Result<Option<TrickEnded>, EngineError> {
        self.require_phase(GamePhase::Playing)?;
        if seat != self.current_player {
            return Err(EngineError::invalid_state(format!(
                "seat {seat} played out of turn"
            )));
        }
        if cards.is_empty() {
            return Err(EngineError::SelectionSizeMismatch {
                expected: 1,
                actual: 0,
            });
        }

        match &self.current_trick {
            None => {
                let group = self.trump.effective_suit(&cards[0]);
                if cards.iter().any(|c| self.trump.effective_suit(c) != group) {
                    return Err(EngineError::invalid_state(
                        "leading play mixes effective suits",
                    ));
                }
                let units = combos::decompose(cards, &self.trump);
                if units.len() > 1 {
                    let others = self.other_hands(seat);
                    if !combos::multi_combo_is_unbeatable(cards, &self.trump, &others) {
                        return Err(EngineError::invalid_state(
                            "multi-combo lead has a beatable component",
                        ));
                    }
                }
            }
            Some(trick) => {
                let hand = self.hand(seat)?;
                if !follow::is_legal_play(&trick.lead_play().cards, hand, cards, &self.trump) {
                    return Err(EngineError::invalid_state(format!(
                        "seat {seat} attempted an illegal follow"
                    )));
                }
            }
        }

        let hand = &mut self.player_mut(seat)?.hand;
        remove_from_hand(hand, cards)?;

        match &mut self.current_trick {
            None => {
                self.current_trick = Some(Trick::lead(self.trump, seat, cards.to_vec())?);
                self.current_player = (seat + 1) % 4;
                Ok(None)
            }
            Some(trick) => {
                trick.add_play(seat, cards.to_vec())?;
                if trick.is_complete() {
                    let ended = trick.complete()?;
                    let winner_team = team_of(ended.winner);
                    self.team_mut(winner_team).points += ended.points;
                    let finished = self.current_trick.take().expect("trick in progress");
                    self.completed_tricks.push(finished);
                    self.current_player = ended.winner;
                    if self.players.iter().all(|p| p.hand.is_empty()) {
                        self.phase = GamePhase::Scoring;
                    }
                    Ok(Some(ended))
                } else {
                    self.current_player = (seat + 1) % 4;
                    Ok(None)
                }
            }
        }
    }

    /// Kitty bonus for the round's final trick, if the attacking team took
    /// it: kitty points times the lead-shape multiplier.
    pub fn kitty_bonus(&self) -> u16 {
        let last = match self.completed_tricks.last() {
            Some(t) if self.phase == GamePhase::Scoring => t,
            _ => return 0,
        };
        let winner_team = team_of(last.winning_seat());
        if self.team(winner_team).is_defending {
            return 0;
        }
        let kitty_points: u16 = self.kitty.iter().map(|c| c.points()).sum();
        kitty_points * kitty_multiplier(last)
    }

    /// Structural invariants: card conservation, play shapes, team flags.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.teams.iter().filter(|t| t.is_defending).count() != 1 {
            return Err(EngineError::invalid_state("exactly one team must defend"));
        }
        for player in &self.players {
            if team_of(player.seat) != player.team {
                return Err(EngineError::invalid_state("seat/team interleaving broken"));
            }
        }

        let in_hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let in_tricks: usize = self
            .completed_tricks
            .iter()
            .chain(self.current_trick.iter())
            .map(|t| t.all_cards().count())
            .sum();
        let total = in_hands + in_tricks + self.kitty.len() + self.deck.len();
        let pre_deal_shell = self.phase == GamePhase::Dealing && total == 0;
        if total != 108 && !pre_deal_shell {
            return Err(EngineError::invalid_state(format!(
                "card conservation broken: {total} cards accounted for"
            )));
        }

        for trick in self.completed_tricks.iter().chain(self.current_trick.iter()) {
            if trick.plays().len() > 4 {
                return Err(EngineError::invalid_state("trick has more than four plays"));
            }
            let lead_len = trick.lead_len();
            if trick.plays().iter().any(|p| p.cards.len() != lead_len) {
                return Err(EngineError::invalid_state(
                    "play length differs from the lead",
                ));
            }
        }
        Ok(())
    }
}

/// Remove a selection from a hand, multiset-wise.
pub fn remove_from_hand(hand: &mut Vec<Card>, cards: &[Card]) -> Result<(), EngineError> {
    for card in cards {
        let idx = hand
            .iter()
            .position(|c| c == card)
            .ok_or(EngineError::SelectionNotInHand)?;
        hand.swap_remove(idx);
    }
    Ok(())
}

/// Display order: non-trump suits grouped, descending rank, trump group
/// last and strongest-first.
pub fn sort_hand(hand: &mut [Card], trump: &TrumpInfo) {
    hand.sort_by_key(|card| display_key(card, trump));
}

fn display_key(card: &Card, trump: &TrumpInfo) -> (u8, u8) {
    match trump.trump_strength(card) {
        Some(s) => (4, u8::MAX - s),
        None => {
            let suit = card.suit().expect("non-trump card has a suit") as u8;
            let rank = card.rank().expect("non-trump card has a rank").index();
            (suit, u8::MAX - rank)
        }
    }
}

fn hash_card(hasher: &mut Xxh3, card: &Card) {
    let bytes = match card {
        Card::Regular {
            suit,
            rank,
            deck_id,
        } => [0u8, *suit as u8, rank.index(), *deck_id],
        Card::Joker { kind, deck_id } => [1u8, *kind as u8, 0, *deck_id],
    };
    hasher.update(&bytes);
}
