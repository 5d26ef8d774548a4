//! Triangular betting progression.
//!
//! The bet at progression position `n` is the largest `k` with
//! `k * (k + 1) / 2 <= n`, floored at one unit:
//!
//! ```text
//! position: 1 2 3 4 5 6 7 8 9 10 ...
//! bet:      1 1 2 2 2 3 3 3 3 4  ...
//! ```
//!
//! A win pays 36x the stake, so a hit at any position up to 56 returns more
//! than the cumulative stake of the progression so far.

/// Largest `k` with `k * (k + 1) / 2 <= n`.
fn triangular_root(n: u64) -> u64 {
    let mut k = (((8.0 * n as f64 + 1.0).sqrt() - 1.0) / 2.0) as u64;
    // float rounding can land one off either side for large n
    while k > 0 && k * (k + 1) / 2 > n {
        k -= 1;
    }
    while (k + 1) * (k + 2) / 2 <= n {
        k += 1;
    }
    k
}

/// Bet placed at a 1-based progression position.
pub fn bet_size(position: u32) -> u64 {
    triangular_root(position as u64).max(1)
}

/// Total staked over positions `1..=positions`.
pub fn cumulative_stake(positions: u32) -> u64 {
    (1..=positions).map(bet_size).sum()
}

/// Bankroll that covers `games` full losing progressions of `spins_per_game`.
pub fn starting_balance(spins_per_game: u32, games: u32) -> u64 {
    games as u64 * cumulative_stake(spins_per_game)
}
