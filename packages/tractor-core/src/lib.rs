//! Tractor (Shengji) rules engine and AI decision pipeline.
//!
//! The crate is split in two layers:
//!
//! - [`domain`]: cards, trump classification, combos, follow legality,
//!   tricks, state, dealing, and scoring. Pure rules, no strategy.
//! - [`ai`]: the decision pipeline: card memory, game context, and the
//!   leading / following / kitty-swap / declaration strategies, exposed
//!   through three entry points that take a full game state plus a seat.
//!
//! Everything is synchronous and deterministic: the same state and seat
//! always produce the same decision, which is what replay tooling and the
//! property suites rely on. The only randomness in the crate is the
//! injected-RNG shuffle in [`domain::dealing`].

pub mod ai;
pub mod domain;
pub mod error;

pub use ai::{choose_kitty_swap, choose_play, evaluate_declaration, AiConfig, AiEngine};
pub use error::EngineError;
