//! Error types for simulation setup.

use thiserror::Error;

/// Reasons a [`SimConfig`](crate::simulator::SimConfig) is rejected before
/// any spin is drawn.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("a wheel needs at least 2 pockets (got {pockets})")]
    TooFewPockets { pockets: u32 },
    #[error("initial balance override must be positive")]
    EmptyBankroll,
    #[error("{spins} spins x {games} games does not fit in a single trajectory")]
    TrajectoryTooLong { spins: u32, games: u32 },
}
