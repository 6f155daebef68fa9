//! Aggregate metrics over simulated games.

use std::time::Duration;

use tracing::info;

use crate::simulator::GameRecord;

#[derive(Debug, Default)]
pub struct Summary {
    games: u32,
    rounds: u32,
    attacker_wins: u32,
    attacker_points_total: u64,
    kitty_bonus_total: u64,
    kitty_bonus_rounds: u32,
    finished_games: u32,
}

impl Summary {
    pub fn absorb(&mut self, game: &GameRecord) {
        self.games += 1;
        if game.winner.is_some() {
            self.finished_games += 1;
        }
        for round in &game.rounds {
            self.rounds += 1;
            if round.attackers_won {
                self.attacker_wins += 1;
            }
            self.attacker_points_total += u64::from(round.attacker_points);
            if round.kitty_bonus > 0 {
                self.kitty_bonus_total += u64::from(round.kitty_bonus);
                self.kitty_bonus_rounds += 1;
            }
        }
    }

    pub fn report(&self, elapsed: Duration) {
        let rounds = self.rounds.max(1);
        info!(
            games = self.games,
            finished = self.finished_games,
            rounds = self.rounds,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulation complete"
        );
        info!(
            attacker_win_rate_pct = 100.0 * self.attacker_wins as f64 / rounds as f64,
            avg_attacker_points = self.attacker_points_total as f64 / rounds as f64,
            kitty_bonus_rounds = self.kitty_bonus_rounds,
            avg_kitty_bonus =
                self.kitty_bonus_total as f64 / self.kitty_bonus_rounds.max(1) as f64,
            "round metrics"
        );
    }
}
