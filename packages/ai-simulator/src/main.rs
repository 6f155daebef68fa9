//! AI simulator CLI - fast in-memory self-play for the tractor engine.
//!
//! Runs complete games (rounds until a team rides its rank to Ace) with
//! four AI seats, asserting the engine's invariants along the way, and
//! reports aggregate metrics. Useful for smoke-testing strategy changes.

mod metrics;
mod output;
mod simulator;

use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use metrics::Summary;
use output::OutputWriter;
use simulator::Simulator;

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Fast in-memory self-play for the tractor engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game i plays with seed + i. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Cap on rounds per game before calling it a draw
    #[arg(long, default_value = "30")]
    max_rounds: u32,

    /// Write per-game records as JSON lines to this file
    #[arg(long)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let base_seed = args.seed.unwrap_or_else(rand::random::<u64>);
    info!(games = args.games, base_seed, "starting simulation");

    let simulator = Simulator::new(args.max_rounds);
    let mut writer = args.output.as_deref().map(|path| {
        OutputWriter::create(path).unwrap_or_else(|e| panic!("cannot open {path}: {e}"))
    });

    let started = Instant::now();
    let mut summary = Summary::default();
    for i in 0..args.games {
        let record = simulator.play_game(base_seed.wrapping_add(u64::from(i)));
        summary.absorb(&record);
        if let Some(writer) = writer.as_mut() {
            writer.write_game(&record).expect("write game record");
        }
    }

    summary.report(started.elapsed());
}
