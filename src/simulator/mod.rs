//! Monte Carlo simulator for a triangular roulette progression.
//!
//! Every gambler starts with the same bankroll and bets straight-up on a
//! single pocket, raising the stake along the triangular schedule in
//! [`schedule`] after each miss. A hit pays 36x and restarts the
//! progression; the session ends after the target number of wins or when the
//! bankroll runs out.

mod config;
mod gambler;
mod report;
mod runner;
pub mod schedule;
pub mod stats;

pub use config::SimConfig;
pub use gambler::{play_session, GamblerRun, GamblerState, SpinEvent, TableRules};
pub use report::{signed_dollars, SimReport};
pub use runner::{gambler_rng, run_simulation, simulate_gambler, spin_wheel};
