//! Game loop: rounds driven entirely through the engine's public API.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, info};

use tractor_core::ai::{declaration, AiEngine};
use tractor_core::domain::state::partner;
use tractor_core::domain::{
    dealing, score_round, GamePhase, GameState, Rank, Seat, TeamId,
};

#[derive(Debug, Serialize)]
pub struct RoundRecord {
    pub round_no: u32,
    pub defending: TeamId,
    pub attacker_points: u16,
    pub kitty_bonus: u16,
    pub attackers_won: bool,
    pub rank_advance: u8,
    pub declared_suit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GameRecord {
    pub seed: u64,
    pub rounds: Vec<RoundRecord>,
    /// Team that reached Ace, if the game finished inside the round cap.
    pub winner: Option<TeamId>,
}

pub struct Simulator {
    engine: AiEngine,
    max_rounds: u32,
}

impl Simulator {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            engine: AiEngine::default(),
            max_rounds,
        }
    }

    /// Play rounds with carried ranks until one team passes Ace or the cap
    /// is reached.
    pub fn play_game(&self, seed: u64) -> GameRecord {
        let mut ranks = [Rank::Two, Rank::Two];
        let mut defending = TeamId::A;
        let mut starter: Seat = (seed % 4) as Seat;
        let mut rounds = Vec::new();
        let mut winner = None;

        for round_no in 1..=self.max_rounds {
            let record = self.play_round(seed, round_no, defending, ranks, starter);
            let advanced = record.rank_advance;

            let advancing = if record.attackers_won {
                defending.other()
            } else {
                defending
            };
            let idx = advancing as usize;
            let new_rank_idx =
                (ranks[idx] as usize + advanced as usize).min(Rank::ALL.len() - 1);
            let at_ace_before = ranks[idx] == Rank::Ace;
            ranks[idx] = Rank::ALL[new_rank_idx];

            // Next round: winners defend; the deal rotates within the
            // defending side.
            if record.attackers_won {
                defending = defending.other();
                starter = (starter + 1) % 4;
            } else {
                starter = partner(starter);
            }

            let done = at_ace_before && advanced > 0;
            rounds.push(record);
            if done {
                winner = Some(advancing);
                break;
            }
        }

        info!(seed, rounds = rounds.len(), ?winner, "game finished");
        GameRecord {
            seed,
            rounds,
            winner,
        }
    }

    fn play_round(
        &self,
        seed: u64,
        round_no: u32,
        defending: TeamId,
        ranks: [Rank; 2],
        starter: Seat,
    ) -> RoundRecord {
        let mut state = GameState::new_round(round_no, defending, ranks, starter);
        let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(u64::from(round_no)));
        let mut deck = dealing::shuffled_deck(&mut rng);
        dealing::deal_round(&mut state, &mut deck).expect("deal");

        for seat in 0..4u8 {
            if let Some(suit) = self
                .engine
                .evaluate_declaration(&state, seat)
                .expect("declaration")
            {
                let strength = declaration::declaration_strength(
                    state.hand(seat).expect("hand"),
                    &state,
                    suit,
                );
                state
                    .apply_declaration(seat, suit, strength)
                    .expect("apply declaration");
            }
        }
        state.finish_dealing().expect("finish dealing");

        let discards = self
            .engine
            .choose_kitty_swap(&state, starter)
            .expect("kitty swap");
        state
            .apply_kitty_swap(starter, &discards)
            .expect("apply kitty swap");

        while state.phase == GamePhase::Playing {
            let seat = state.current_player;
            let play = self.engine.choose_play(&state, seat).expect("choose play");
            state.apply_play(seat, &play).expect("apply play");
            state.validate().expect("state invariants");
        }

        let outcome = score_round(&mut state).expect("score round");
        debug!(
            round_no,
            attacker_points = outcome.attacker_points,
            attackers_won = outcome.attackers_won,
            "round finished"
        );

        RoundRecord {
            round_no,
            defending,
            attacker_points: outcome.attacker_points,
            kitty_bonus: outcome.kitty_bonus,
            attackers_won: outcome.attackers_won,
            rank_advance: outcome.rank_advance,
            declared_suit: state.declaration.map(|d| format!("{:?}", d.suit)),
        }
    }
}
