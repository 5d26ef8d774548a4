//! Integration test: per-spin gambler transitions
//!
//! Drives play_session with scripted pocket sequences so every path through
//! the progression state machine is hit deterministically.

use roulette_progression::simulator::schedule::{bet_size, cumulative_stake};
use roulette_progression::simulator::{play_session, GamblerState, SpinEvent, TableRules};
use roulette_progression::SimConfig;

const MISS: u32 = 17;
const HIT: u32 = 0;

fn default_rules() -> TableRules {
    TableRules::from_config(&SimConfig::default())
}

#[test]
fn test_all_misses_drain_bankroll_by_schedule() {
    let rules = default_rules();
    let start = cumulative_stake(56);
    let run = play_session(start, &rules, std::iter::repeat(MISS).take(56));

    let mut expected = start;
    for (idx, &balance) in run.trajectory.iter().enumerate() {
        expected -= bet_size(idx as u32 + 1);
        assert_eq!(balance, expected, "spin {}", idx + 1);
    }
    assert_eq!(run.final_balance(), 0);
    assert_eq!(run.busted_on_spin, Some(56));
    assert_eq!(run.final_state.wins, 0);
}

#[test]
fn test_first_spin_hit_pays_and_finishes() {
    let rules = default_rules();
    let mut pockets = vec![HIT];
    pockets.extend(std::iter::repeat(MISS).take(55));
    let run = play_session(350, &rules, pockets);

    assert_eq!(run.trajectory[0], 350 + 36 - 1);
    assert_eq!(run.final_state.wins, 1);
    assert_eq!(run.final_state.position, 0);
    // already at the target win count: the rest is padded flat
    assert!(run.trajectory.iter().all(|&b| b == 385));
}

#[test]
fn test_win_on_last_spin_of_progression() {
    let rules = default_rules();
    let mut pockets: Vec<u32> = std::iter::repeat(MISS).take(55).collect();
    pockets.push(HIT);
    let run = play_session(350, &rules, pockets);

    // 340 lost over 55 spins, then the last 10 units come back 36x
    assert_eq!(run.trajectory[54], 350 - cumulative_stake(55));
    assert_eq!(run.final_balance(), 360);
    assert_eq!(run.busted_on_spin, None);
}

#[test]
fn test_multi_game_session_needs_every_win() {
    let rules = TableRules::from_config(&SimConfig::multi_game(2));
    let pockets = [HIT, MISS, MISS, HIT, HIT, MISS];
    let run = play_session(700, &rules, pockets);

    // win(+35) miss(-1) miss(-1) win(-2+72) then finished
    assert_eq!(run.trajectory, vec![735, 734, 733, 803, 803, 803]);
    assert_eq!(run.final_state.wins, 2);
    assert_eq!(run.final_state.games_consumed, 2);
}

#[test]
fn test_loss_streak_threshold_restarts_progression() {
    let rules = TableRules {
        loss_streak_threshold: 4,
        ..default_rules()
    };
    let mut state = GamblerState::new(1_000);
    let mut stakes = Vec::new();
    for _ in 0..9 {
        let (next, event) = state.step(MISS, &rules);
        stakes.push(event.stake());
        state = next;
    }

    // two full 4-bet progressions (1,1,2,2) then a fresh first bet
    assert_eq!(stakes, vec![1, 1, 2, 2, 1, 1, 2, 2, 1]);
    assert_eq!(state.games_consumed, 2);
    assert_eq!(state.consecutive_losses, 9);
    assert_eq!(state.wins, 0);
}

#[test]
fn test_idle_and_busted_spins_wager_nothing() {
    let rules = default_rules();
    let (_, busted) = GamblerState::new(0).step(HIT, &rules);
    assert_eq!(busted, SpinEvent::Busted);
    assert_eq!(busted.stake(), 0);

    let (won, _) = GamblerState::new(10).step(HIT, &rules);
    let (_, idle) = won.step(HIT, &rules);
    assert_eq!(idle, SpinEvent::Finished);
    assert_eq!(idle.stake(), 0);
}
