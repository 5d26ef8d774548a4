//! Simulation configuration.

use super::schedule::starting_balance;
use crate::constants::*;
use crate::error::ConfigError;
use serde::Serialize;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimConfig {
    /// Spins that make up one game's progression
    pub spins_per_game: u32,

    /// Games each gambler plays; also the number of wins that ends a session
    pub games: u32,

    /// Number of independent gamblers to simulate
    pub gamblers: u32,

    /// Pocket count on the wheel (win probability is 1 / pockets)
    pub pockets: u32,

    /// Consecutive bets in one progression before it is abandoned
    pub loss_streak_threshold: u32,

    /// Bankroll override (None = sized to cover every game's full progression)
    pub initial_balance: Option<u64>,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spins_per_game: DEFAULT_SPINS_PER_GAME,
            games: DEFAULT_GAMES,
            gamblers: DEFAULT_GAMBLERS,
            pockets: DEFAULT_POCKETS,
            loss_streak_threshold: DEFAULT_LOSS_STREAK_THRESHOLD,
            initial_balance: None,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Small seeded run for smoke tests and quick looks.
    pub fn quick(seed: u64) -> Self {
        Self {
            gamblers: 500,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Longer sessions where each gambler chases several wins.
    pub fn multi_game(games: u32) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Total spins in every trajectory.
    pub fn total_spins(&self) -> usize {
        self.spins_per_game as usize * self.games as usize
    }

    pub fn win_probability(&self) -> f64 {
        1.0 / self.pockets as f64
    }

    /// Bankroll every gambler starts with.
    pub fn starting_balance(&self) -> u64 {
        self.initial_balance
            .unwrap_or_else(|| starting_balance(self.spins_per_game, self.games))
    }

    /// Reject configurations that cannot describe a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spins_per_game == 0 {
            return Err(ConfigError::Zero {
                field: "spins per game",
            });
        }
        if self.games == 0 {
            return Err(ConfigError::Zero { field: "games" });
        }
        if self.gamblers == 0 {
            return Err(ConfigError::Zero { field: "gamblers" });
        }
        if self.loss_streak_threshold == 0 {
            return Err(ConfigError::Zero {
                field: "loss streak threshold",
            });
        }
        if self.pockets < 2 {
            return Err(ConfigError::TooFewPockets {
                pockets: self.pockets,
            });
        }
        if self.initial_balance == Some(0) {
            return Err(ConfigError::EmptyBankroll);
        }
        if self.spins_per_game.checked_mul(self.games).is_none() {
            return Err(ConfigError::TrajectoryTooLong {
                spins: self.spins_per_game,
                games: self.games,
            });
        }
        Ok(())
    }
}
