//! Trick accumulation and winner resolution.
//!
//! A trick holds up to four plays. The winner is maintained incrementally:
//! a later play takes over only when it fills the lead's unit shapes and
//! every component is strictly higher, either in the led group or as trump
//! over a non-trump lead.

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::combos::{self, Combo};
use super::follow;
use super::state::Seat;
use super::trump::{EffectiveSuit, TrumpInfo};
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub trump: TrumpInfo,
    plays: Vec<Play>,
    lead_units: Vec<Combo>,
    winner_idx: usize,
    winner_units: Vec<Combo>,
}

/// Result of a finished trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickEnded {
    pub winner: Seat,
    pub points: u16,
    /// Size of the largest unit in the lead, used for the kitty multiplier.
    pub largest_unit_size: usize,
}

impl Trick {
    /// Open a trick with the leading play. Multi-combo lead legality (the
    /// unbeatable-components rule) is the state layer's concern; here the
    /// lead only has to be a single effective suit.
    pub fn lead(trump: TrumpInfo, seat: Seat, cards: Vec<Card>) -> Result<Self, EngineError> {
        if cards.is_empty() {
            return Err(EngineError::invalid_state("empty leading play"));
        }
        let group = trump.effective_suit(&cards[0]);
        if cards.iter().any(|c| trump.effective_suit(c) != group) {
            return Err(EngineError::invalid_state(
                "leading play mixes effective suits",
            ));
        }
        let lead_units = combos::decompose(&cards, &trump);
        let winner_units = lead_units.clone();
        Ok(Self {
            trump,
            plays: vec![Play { seat, cards }],
            lead_units,
            winner_idx: 0,
            winner_units,
        })
    }

    pub fn add_play(&mut self, seat: Seat, cards: Vec<Card>) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(EngineError::invalid_state("trick already has four plays"));
        }
        if cards.len() != self.lead_len() {
            return Err(EngineError::SelectionSizeMismatch {
                expected: self.lead_len(),
                actual: cards.len(),
            });
        }

        if let Some(units) = self.contesting_units(&cards) {
            let all_greater = units
                .iter()
                .zip(self.winner_units.iter())
                .all(|(new, cur)| {
                    new.top_strength(&self.trump) > cur.top_strength(&self.trump)
                });
            if all_greater {
                self.winner_idx = self.plays.len();
                self.winner_units = units;
            }
        }

        self.plays.push(Play { seat, cards });
        Ok(())
    }

    /// Unit allocation for a play that is eligible to contest the trick:
    /// single-group, in the led group or trump, and shaped like the lead.
    fn contesting_units(&self, cards: &[Card]) -> Option<Vec<Combo>> {
        let group = self.trump.effective_suit(&cards[0]);
        let lead_group = self.lead_group();
        if group != lead_group && group != EffectiveSuit::Trump {
            return None;
        }
        follow::format_matches(&self.lead_units, cards, &self.trump)
    }

    pub fn lead_group(&self) -> EffectiveSuit {
        self.trump.effective_suit(&self.plays[0].cards[0])
    }

    pub fn lead_len(&self) -> usize {
        self.plays[0].cards.len()
    }

    pub fn lead_units(&self) -> &[Combo] {
        &self.lead_units
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn lead_play(&self) -> &Play {
        &self.plays[0]
    }

    pub fn winning_seat(&self) -> Seat {
        self.plays[self.winner_idx].seat
    }

    pub fn winning_play(&self) -> &Play {
        &self.plays[self.winner_idx]
    }

    pub fn winning_units(&self) -> &[Combo] {
        &self.winner_units
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    /// Sum of card points across every play so far.
    pub fn points(&self) -> u16 {
        self.plays
            .iter()
            .flat_map(|p| p.cards.iter())
            .map(|c| c.points())
            .sum()
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.plays.iter().flat_map(|p| p.cards.iter())
    }

    pub fn complete(&self) -> Result<TrickEnded, EngineError> {
        if !self.is_complete() {
            return Err(EngineError::invalid_state(
                "completing a trick with fewer than four plays",
            ));
        }
        Ok(TrickEnded {
            winner: self.winning_seat(),
            points: self.points(),
            largest_unit_size: self.lead_units.iter().map(|u| u.len()).max().unwrap_or(1),
        })
    }
}

/// Kitty multiplier when the attacking team takes the final trick: doubled
/// for a singles lead, quadrupled when the lead contained pairs or tractors.
pub fn kitty_multiplier(final_trick: &Trick) -> u16 {
    if final_trick.lead_units().iter().any(|u| u.pair_count() > 0) {
        4
    } else {
        2
    }
}
