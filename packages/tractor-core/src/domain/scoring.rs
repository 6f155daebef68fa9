//! Round scoring: kitty bonus, the 80-point outcome, rank advancement.

use serde::{Deserialize, Serialize};

use super::cards::Rank;
use super::state::{GamePhase, GameState, TeamId};
use crate::error::EngineError;

/// Card points the attacking team must reach to win the round.
pub const ATTACK_TARGET: u16 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub attackers_won: bool,
    /// Attacking team's final points, kitty bonus included.
    pub attacker_points: u16,
    pub kitty_bonus: u16,
    /// Team whose rank moves up, and by how many steps.
    pub advancing_team: TeamId,
    pub rank_advance: u8,
    /// Defenders of the next round.
    pub next_defending: TeamId,
}

/// Score a finished round. The attacking team wins at 80 points and then
/// advances one rank per full 40 points beyond that; otherwise the
/// defenders advance 1 (2 when the attackers stayed under 40, 3 when they
/// were shut out) and defend again.
pub fn score_round(state: &mut GameState) -> Result<RoundOutcome, EngineError> {
    state.require_phase(GamePhase::Scoring)?;

    let bonus = state.kitty_bonus();
    let attacking = state.attacking_team().id;
    let defending = state.defending_team().id;

    state.teams[attacking as usize].points += bonus;
    let attacker_points = state.team(attacking).points;

    let outcome = if attacker_points >= ATTACK_TARGET {
        RoundOutcome {
            attackers_won: true,
            attacker_points,
            kitty_bonus: bonus,
            advancing_team: attacking,
            rank_advance: ((attacker_points - ATTACK_TARGET) / 40) as u8,
            next_defending: attacking,
        }
    } else {
        let rank_advance = if attacker_points == 0 {
            3
        } else if attacker_points < 40 {
            2
        } else {
            1
        };
        RoundOutcome {
            attackers_won: false,
            attacker_points,
            kitty_bonus: bonus,
            advancing_team: defending,
            rank_advance,
            next_defending: defending,
        }
    };

    let team = &mut state.teams[outcome.advancing_team as usize];
    team.rank = advance_rank(team.rank, outcome.rank_advance);
    Ok(outcome)
}

fn advance_rank(rank: Rank, steps: u8) -> Rank {
    let idx = (rank.index() as usize + steps as usize).min(Rank::ALL.len() - 1);
    Rank::ALL[idx]
}
