//! Roulette Progression - Monte Carlo simulator library
//!
//! Simulates many gamblers playing a triangular betting progression on a
//! single roulette pocket and aggregates their balance trajectories.

pub mod build_info;
pub mod constants;
pub mod error;
pub mod simulator;

// Terminal viewer, exposed for the binary
pub mod ui;

pub use error::ConfigError;
pub use simulator::{run_simulation, SimConfig, SimReport};
