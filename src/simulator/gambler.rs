//! Per-gambler progression state and its spin-by-spin transition.

use super::config::SimConfig;
use super::schedule::bet_size;
use crate::constants::{PAYOUT_MULTIPLIER, WINNING_POCKET};

/// Table rules a gambler plays under, derived from [`SimConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRules {
    pub winning_pocket: u32,
    pub payout_multiplier: u64,
    /// Wins after which the gambler walks away
    pub target_wins: u32,
    pub loss_streak_threshold: u32,
}

impl TableRules {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            winning_pocket: WINNING_POCKET,
            payout_multiplier: PAYOUT_MULTIPLIER,
            target_wins: config.games,
            loss_streak_threshold: config.loss_streak_threshold,
        }
    }
}

/// What happened on one spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEvent {
    /// Bankroll is gone; nothing was wagered.
    Busted,
    /// Target wins already reached; nothing was wagered.
    Finished,
    Won { stake: u64 },
    Lost { stake: u64 },
    /// Lost, and the progression hit the loss-streak threshold and restarted.
    StreakExhausted { stake: u64 },
}

impl SpinEvent {
    pub fn stake(&self) -> u64 {
        match *self {
            SpinEvent::Won { stake }
            | SpinEvent::Lost { stake }
            | SpinEvent::StreakExhausted { stake } => stake,
            SpinEvent::Busted | SpinEvent::Finished => 0,
        }
    }
}

/// Mutable state of one gambler between spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamblerState {
    pub balance: u64,
    pub wins: u32,
    pub consecutive_losses: u32,
    /// Bets placed in the current progression (0 = about to start one)
    pub position: u32,
    /// Progressions that ended, by a win or by the loss-streak threshold
    pub games_consumed: u32,
}

impl GamblerState {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            wins: 0,
            consecutive_losses: 0,
            position: 0,
            games_consumed: 0,
        }
    }

    pub fn is_busted(&self) -> bool {
        self.balance == 0
    }

    pub fn is_finished(&self, rules: &TableRules) -> bool {
        self.wins >= rules.target_wins
    }

    /// Advance one spin landing on `pocket`.
    ///
    /// The stake is capped at the remaining balance, so the balance never
    /// goes below zero. Payouts saturate at `u64::MAX`.
    pub fn step(self, pocket: u32, rules: &TableRules) -> (Self, SpinEvent) {
        if self.is_busted() {
            return (self, SpinEvent::Busted);
        }
        if self.is_finished(rules) {
            return (self, SpinEvent::Finished);
        }

        let mut next = self;
        next.position += 1;
        let stake = bet_size(next.position).min(next.balance);
        next.balance -= stake;

        if pocket == rules.winning_pocket {
            next.balance = next
                .balance
                .saturating_add(rules.payout_multiplier.saturating_mul(stake));
            next.wins += 1;
            next.consecutive_losses = 0;
            next.position = 0;
            next.games_consumed += 1;
            return (next, SpinEvent::Won { stake });
        }

        next.consecutive_losses += 1;
        if next.position >= rules.loss_streak_threshold {
            next.position = 0;
            next.games_consumed += 1;
            return (next, SpinEvent::StreakExhausted { stake });
        }
        (next, SpinEvent::Lost { stake })
    }
}

/// Outcome of one gambler's full session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamblerRun {
    /// Balance after every spin
    pub trajectory: Vec<u64>,
    pub final_state: GamblerState,
    /// 1-based spin on which the balance hit zero
    pub busted_on_spin: Option<usize>,
}

impl GamblerRun {
    pub fn final_balance(&self) -> u64 {
        self.final_state.balance
    }
}

/// Play a session over the given pocket sequence, one spin per pocket.
pub fn play_session<I>(starting_balance: u64, rules: &TableRules, pockets: I) -> GamblerRun
where
    I: IntoIterator<Item = u32>,
{
    let pockets = pockets.into_iter();
    let mut trajectory = Vec::with_capacity(pockets.size_hint().0);
    let mut state = GamblerState::new(starting_balance);
    let mut busted_on_spin = None;

    for (spin, pocket) in pockets.enumerate() {
        let (next, _event) = state.step(pocket, rules);
        if next.is_busted() && busted_on_spin.is_none() {
            busted_on_spin = Some(spin + 1);
        }
        trajectory.push(next.balance);
        state = next;
    }

    GamblerRun {
        trajectory,
        final_state: state,
        busted_on_spin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(target_wins: u32, loss_streak_threshold: u32) -> TableRules {
        TableRules {
            winning_pocket: 0,
            payout_multiplier: 36,
            target_wins,
            loss_streak_threshold,
        }
    }

    #[test]
    fn test_first_spin_win() {
        let rules = rules(1, 60);
        let (state, event) = GamblerState::new(350).step(0, &rules);

        assert_eq!(event, SpinEvent::Won { stake: 1 });
        assert_eq!(state.balance, 350 + 36 - 1);
        assert_eq!(state.wins, 1);
        assert_eq!(state.position, 0);
        assert_eq!(state.consecutive_losses, 0);
        assert_eq!(state.games_consumed, 1);
    }

    #[test]
    fn test_loss_advances_progression() {
        let rules = rules(1, 60);
        let mut state = GamblerState::new(350);
        for expected_position in 1..=5 {
            let (next, event) = state.step(7, &rules);
            assert!(matches!(event, SpinEvent::Lost { .. }));
            assert_eq!(next.position, expected_position);
            assert_eq!(next.consecutive_losses, expected_position);
            state = next;
        }
        // 1 + 1 + 2 + 2 + 2
        assert_eq!(state.balance, 350 - 8);
    }

    #[test]
    fn test_win_after_losses_resets_streak() {
        let rules = rules(1, 60);
        let mut state = GamblerState::new(350);
        for _ in 0..9 {
            state = state.step(5, &rules).0;
        }
        // position 10 bets 4
        let (state, event) = state.step(0, &rules);
        assert_eq!(event, SpinEvent::Won { stake: 4 });
        assert_eq!(state.balance, 350 - 24 + 4 * 36);
        assert_eq!(state.consecutive_losses, 0);
        assert_eq!(state.position, 0);
    }

    #[test]
    fn test_busted_gambler_is_absorbing() {
        let rules = rules(1, 60);
        let state = GamblerState::new(0);
        let (next, event) = state.step(0, &rules);
        assert_eq!(event, SpinEvent::Busted);
        assert_eq!(next, state);
    }

    #[test]
    fn test_finished_gambler_idles() {
        let rules = rules(1, 60);
        let state = GamblerState::new(350).step(0, &rules).0;
        let (next, event) = state.step(0, &rules);
        assert_eq!(event, SpinEvent::Finished);
        assert_eq!(next, state);
    }

    #[test]
    fn test_loss_streak_threshold_restarts_progression() {
        let rules = rules(1, 3);
        let mut state = GamblerState::new(100);
        let mut events = Vec::new();
        for _ in 0..4 {
            let (next, event) = state.step(9, &rules);
            events.push(event);
            state = next;
        }
        assert_eq!(
            events,
            vec![
                SpinEvent::Lost { stake: 1 },
                SpinEvent::Lost { stake: 1 },
                SpinEvent::StreakExhausted { stake: 2 },
                SpinEvent::Lost { stake: 1 },
            ]
        );
        assert_eq!(state.position, 1);
        assert_eq!(state.consecutive_losses, 4);
        assert_eq!(state.games_consumed, 1);
        assert_eq!(state.wins, 0);
    }

    #[test]
    fn test_stake_capped_at_remaining_balance() {
        let rules = rules(1, 60);
        let mut state = GamblerState::new(3);
        state.position = 9; // next bet would be 4
        let (next, event) = state.step(12, &rules);
        assert_eq!(event, SpinEvent::Lost { stake: 3 });
        assert_eq!(next.balance, 0);
        assert!(next.is_busted());
    }

    #[test]
    fn test_payout_saturates_on_huge_bankroll() {
        let rules = rules(1, 60);
        let (state, event) = GamblerState::new(u64::MAX - 10).step(0, &rules);
        assert_eq!(event, SpinEvent::Won { stake: 1 });
        assert_eq!(state.balance, u64::MAX);
        assert_eq!(state.wins, 1);
    }

    #[test]
    fn test_session_records_bust_spin() {
        let rules = rules(1, 60);
        let run = play_session(4, &rules, [1, 1, 1, 1, 0]);
        assert_eq!(run.trajectory, vec![3, 2, 0, 0, 0]);
        assert_eq!(run.busted_on_spin, Some(3));
        assert_eq!(run.final_balance(), 0);
    }
}
