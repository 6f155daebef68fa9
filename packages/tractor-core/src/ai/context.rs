//! Per-decision game context: role, pressure, position, and the running
//! trick-winner analysis.

use crate::domain::cards::DECK_POINTS;
use crate::domain::scoring::ATTACK_TARGET;
use crate::domain::state::{team_of, GameState, Seat};
use crate::error::EngineError;

use super::plays;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointPressure {
    Low,
    Medium,
    High,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayStyle {
    Conservative,
    Balanced,
    Aggressive,
    Desperate,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrickPosition {
    Leading,
    Second,
    Third,
    Fourth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickWinnerAnalysis {
    pub current_winner: Seat,
    pub is_teammate_winning: bool,
    pub is_opponent_winning: bool,
    pub is_self_winning: bool,
    pub trick_points: u16,
    pub can_beat_current_winner: bool,
    pub should_try_to_beat: bool,
    pub should_play_conservatively: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameContext {
    pub is_attacking: bool,
    /// Attacking team's captured points so far.
    pub current_points: u16,
    pub points_needed: u16,
    pub cards_remaining: usize,
    pub trick_position: TrickPosition,
    pub point_pressure: PointPressure,
    pub play_style: PlayStyle,
    pub trick_winner: Option<TrickWinnerAnalysis>,
}

/// Derive the context for one decision point.
pub fn build_context(state: &GameState, seat: Seat) -> Result<GameContext, EngineError> {
    let player = state.player(seat)?;
    let is_attacking = state.is_attacking(seat);
    let current_points = state.attacking_team().points;
    let defender_points = state.defending_team().points;

    let trick_position = match &state.current_trick {
        None => TrickPosition::Leading,
        Some(trick) => match trick.plays().len() {
            1 => TrickPosition::Second,
            2 => TrickPosition::Third,
            _ => TrickPosition::Fourth,
        },
    };

    let point_pressure =
        derive_pressure(state, is_attacking, current_points, defender_points);
    let play_style = derive_style(is_attacking, point_pressure);

    let trick_winner = state.current_trick.as_ref().map(|trick| {
        let current_winner = trick.winning_seat();
        let my_team = team_of(seat);
        let winner_team = team_of(current_winner);
        let is_self_winning = current_winner == seat;
        let is_teammate_winning = !is_self_winning && winner_team == my_team;
        let is_opponent_winning = winner_team != my_team;
        let trick_points = trick.points();

        let can_beat_current_winner = !is_self_winning
            && plays::minimal_beating_play(trick, seat, &player.hand, &state.trump).is_some();

        // Worth contesting: an opponent sitting on real points, or an
        // opponent about to pick up a cheap lead late in the round.
        let late_round = state.tricks_remaining() <= 4;
        let should_try_to_beat = is_opponent_winning
            && can_beat_current_winner
            && (trick_points >= 10 || late_round || point_pressure == PointPressure::High);

        let teammate_strong =
            is_teammate_winning && !beatable_by_remaining_seats(state, trick, seat);
        let should_play_conservatively = teammate_strong;

        TrickWinnerAnalysis {
            current_winner,
            is_teammate_winning,
            is_opponent_winning,
            is_self_winning,
            trick_points,
            can_beat_current_winner,
            should_try_to_beat,
            should_play_conservatively,
        }
    });

    Ok(GameContext {
        is_attacking,
        current_points,
        points_needed: ATTACK_TARGET,
        cards_remaining: player.hand.len(),
        trick_position,
        point_pressure,
        play_style,
        trick_winner,
    })
}

fn derive_pressure(
    state: &GameState,
    is_attacking: bool,
    attacker_points: u16,
    defender_points: u16,
) -> PointPressure {
    if state.tricks_remaining() < 4 {
        return PointPressure::High;
    }

    // "Within 20 of their goal": attackers chase 80, defenders deny by
    // capturing more than 120 of the 200.
    let opponent_close = if is_attacking {
        defender_points + 20 > DECK_POINTS - ATTACK_TARGET
    } else {
        attacker_points + 20 >= ATTACK_TARGET
    };
    if opponent_close {
        return PointPressure::High;
    }

    let tricks_played = state.tricks_played() as u16;
    let pace = ATTACK_TARGET * tricks_played / crate::domain::state::HAND_SIZE as u16;
    if is_attacking && attacker_points < pace {
        return PointPressure::Low;
    }
    PointPressure::Medium
}

fn derive_style(is_attacking: bool, pressure: PointPressure) -> PlayStyle {
    match (is_attacking, pressure) {
        (true, PointPressure::High) => PlayStyle::Desperate,
        (false, PointPressure::High) => PlayStyle::Aggressive,
        (_, PointPressure::Medium) => PlayStyle::Balanced,
        (true, PointPressure::Low) => PlayStyle::Balanced,
        (false, PointPressure::Low) => PlayStyle::Conservative,
    }
}

/// Could any seat still to play on this trick (other than the acting one)
/// beat the current winner? Fully observable state, so the check is exact.
fn beatable_by_remaining_seats(
    state: &GameState,
    trick: &crate::domain::tricks::Trick,
    acting: Seat,
) -> bool {
    let played: Vec<Seat> = trick.plays().iter().map(|p| p.seat).collect();
    (0..4u8)
        .filter(|s| !played.contains(s) && *s != acting)
        .any(|s| {
            state
                .player(s)
                .map(|p| plays::minimal_beating_play(trick, s, &p.hand, &state.trump).is_some())
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Card, Rank, Suit};
    use crate::domain::state::TeamId;
    use crate::domain::tricks::Trick;
    use crate::domain::trump::TrumpInfo;

    fn c(suit: Suit, rank: Rank, deck: u8) -> Card {
        Card::regular(suit, rank, deck)
    }

    fn base_state() -> GameState {
        let mut state = GameState::new_round(1, TeamId::A, [Rank::Two, Rank::Two], 0);
        state.trump = TrumpInfo::with_suit(Rank::Two, Suit::Spades);
        state.phase = crate::domain::state::GamePhase::Playing;
        for player in &mut state.players {
            player.hand = vec![c(Suit::Clubs, Rank::Three, player.seat % 2)];
        }
        state
    }

    #[test]
    fn leading_position_without_trick() {
        let state = base_state();
        let ctx = build_context(&state, 0).unwrap();
        assert_eq!(ctx.trick_position, TrickPosition::Leading);
        assert!(ctx.trick_winner.is_none());
        // Seat 0 is on team A, the defenders.
        assert!(!ctx.is_attacking);
    }

    #[test]
    fn positions_follow_play_count() {
        let mut state = base_state();
        let mut trick = Trick::lead(state.trump, 0, vec![c(Suit::Hearts, Rank::King, 0)]).unwrap();
        state.current_trick = Some(trick.clone());
        assert_eq!(
            build_context(&state, 1).unwrap().trick_position,
            TrickPosition::Second
        );

        trick.add_play(1, vec![c(Suit::Hearts, Rank::Three, 0)]).unwrap();
        state.current_trick = Some(trick.clone());
        assert_eq!(
            build_context(&state, 2).unwrap().trick_position,
            TrickPosition::Third
        );

        trick.add_play(2, vec![c(Suit::Hearts, Rank::Four, 0)]).unwrap();
        state.current_trick = Some(trick);
        assert_eq!(
            build_context(&state, 3).unwrap().trick_position,
            TrickPosition::Fourth
        );
    }

    #[test]
    fn same_team_across_table_reads_as_teammate() {
        let mut state = base_state();
        // Seat 1 leads; seat 3 (its partner) evaluates the trick.
        let trick = Trick::lead(state.trump, 1, vec![c(Suit::Hearts, Rank::Ace, 0)]).unwrap();
        state.current_trick = Some(trick);
        let ctx = build_context(&state, 3).unwrap();
        let analysis = ctx.trick_winner.unwrap();
        assert!(analysis.is_teammate_winning);
        assert!(!analysis.is_opponent_winning);
    }

    #[test]
    fn opponent_on_points_triggers_contest() {
        let mut state = base_state();
        let trick = Trick::lead(state.trump, 1, vec![c(Suit::Hearts, Rank::King, 0)]).unwrap();
        state.current_trick = Some(trick);
        state.players[2].hand = vec![c(Suit::Hearts, Rank::Ace, 0)];
        let ctx = build_context(&state, 2).unwrap();
        let analysis = ctx.trick_winner.unwrap();
        assert!(analysis.is_opponent_winning);
        assert!(analysis.can_beat_current_winner);
        assert!(analysis.should_try_to_beat);
    }

    #[test]
    fn high_pressure_near_attack_target() {
        let mut state = base_state();
        state.teams[TeamId::B as usize].points = 70; // attackers close to 80
        let ctx = build_context(&state, 0).unwrap();
        assert_eq!(ctx.point_pressure, PointPressure::High);
        // Defending under high pressure plays aggressively.
        assert_eq!(ctx.play_style, PlayStyle::Aggressive);
    }

    #[test]
    fn attacking_under_high_pressure_is_desperate() {
        let mut state = base_state();
        state.teams[TeamId::A as usize].points = 105; // defenders near lockout
        let ctx = build_context(&state, 1).unwrap();
        assert_eq!(ctx.point_pressure, PointPressure::High);
        assert_eq!(ctx.play_style, PlayStyle::Desperate);
    }
}
