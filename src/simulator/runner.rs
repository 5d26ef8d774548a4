//! Monte Carlo runner: one seeded RNG per gambler, gamblers in parallel.

use super::config::SimConfig;
use super::gambler::{play_session, GamblerRun, TableRules};
use super::report::SimReport;
use crate::error::ConfigError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    config.validate()?;

    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let rules = TableRules::from_config(config);
    let starting_balance = config.starting_balance();

    info!(
        gamblers = config.gamblers,
        spins = config.total_spins(),
        starting_balance,
        base_seed,
        "starting simulation"
    );
    let started = Instant::now();

    let runs: Vec<GamblerRun> = (0..config.gamblers)
        .into_par_iter()
        .map(|idx| {
            let mut rng = gambler_rng(base_seed, idx);
            let run = simulate_gambler(config, &rules, starting_balance, &mut rng);
            debug!(
                gambler = idx,
                final_balance = run.final_balance(),
                wins = run.final_state.wins,
                busted_on_spin = ?run.busted_on_spin,
                "gambler finished"
            );
            run
        })
        .collect();

    let report = SimReport::from_runs(config, base_seed, runs);
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        mean_final_balance = report.mean_final_balance,
        gamblers_ahead = report.gamblers_ahead,
        "simulation complete"
    );
    Ok(report)
}

/// RNG for gambler `idx`, independent of how gamblers are scheduled.
pub fn gambler_rng(base_seed: u64, idx: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(idx as u64))
}

/// Draw one pocket uniformly from `0..pockets`.
pub fn spin_wheel(pockets: u32, rng: &mut impl Rng) -> u32 {
    rng.gen_range(0..pockets)
}

/// Simulate a single gambler with pockets drawn uniformly from the wheel.
pub fn simulate_gambler(
    config: &SimConfig,
    rules: &TableRules,
    starting_balance: u64,
    rng: &mut impl Rng,
) -> GamblerRun {
    let pockets = config.pockets;
    let draws = (0..config.total_spins()).map(|_| spin_wheel(pockets, &mut *rng));
    play_session(starting_balance, rules, draws)
}
