// Wheel layout
pub const DEFAULT_POCKETS: u32 = 37;
pub const WINNING_POCKET: u32 = 0;

/// Gross credit for a winning straight-up bet, as a multiple of the stake
/// (35:1 odds plus the stake returned).
pub const PAYOUT_MULTIPLIER: u64 = 36;

// Run shape
pub const DEFAULT_SPINS_PER_GAME: u32 = 56;
pub const DEFAULT_GAMES: u32 = 1;
pub const DEFAULT_GAMBLERS: u32 = 10_000;

/// Consecutive bets in one progression before the game is written off.
pub const DEFAULT_LOSS_STREAK_THRESHOLD: u32 = 60;

// Reporting
pub const GAMBLERS_PER_HISTOGRAM_BIN: usize = 100;
