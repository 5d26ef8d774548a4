//! Simulation report generation.

use super::config::SimConfig;
use super::gambler::GamblerRun;
use super::stats::{Histogram, Summary};
use crate::constants::GAMBLERS_PER_HISTOGRAM_BIN;
use serde::Serialize;

/// Aggregated results from every simulated gambler.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub config: SimConfig,
    /// Seed gambler `i` was derived from (`base_seed + i`)
    pub base_seed: u64,
    pub starting_balance: u64,
    pub num_gamblers: u32,

    // Outcome counts
    pub gamblers_ahead: u32,
    pub gamblers_behind: u32,
    pub gamblers_busted: u32,
    pub gamblers_finished: u32,
    pub avg_games_consumed: f64,

    // Balances
    pub mean_final_balance: f64,
    pub final_balance_summary: Summary,
    /// Mean balance across gamblers; index 0 is the starting balance
    pub average_trajectory: Vec<f64>,

    /// Final balance minus the mean final balance
    pub earnings: Summary,
    pub earnings_histogram: Histogram,

    #[serde(skip)]
    pub trajectories: Vec<Vec<u64>>,
}

impl SimReport {
    /// Aggregate completed gambler runs.
    pub fn from_runs(config: &SimConfig, base_seed: u64, runs: Vec<GamblerRun>) -> Self {
        let num_gamblers = runs.len() as u32;
        let starting_balance = config.starting_balance();
        let spins = config.total_spins();

        let gamblers_ahead = runs
            .iter()
            .filter(|r| r.final_balance() > starting_balance)
            .count() as u32;
        let gamblers_behind = num_gamblers - gamblers_ahead;
        let gamblers_busted = runs.iter().filter(|r| r.busted_on_spin.is_some()).count() as u32;
        let gamblers_finished = runs
            .iter()
            .filter(|r| r.final_state.wins >= config.games)
            .count() as u32;
        let avg_games_consumed = runs
            .iter()
            .map(|r| r.final_state.games_consumed as f64)
            .sum::<f64>()
            / num_gamblers.max(1) as f64;

        let mut average_trajectory = vec![0.0; spins + 1];
        average_trajectory[0] = starting_balance as f64;
        for run in &runs {
            for (slot, &balance) in average_trajectory[1..].iter_mut().zip(&run.trajectory) {
                *slot += balance as f64;
            }
        }
        for slot in &mut average_trajectory[1..] {
            *slot /= num_gamblers.max(1) as f64;
        }

        let final_balances: Vec<f64> = runs.iter().map(|r| r.final_balance() as f64).collect();
        let final_balance_summary = Summary::of(&final_balances);
        let mean_final_balance = final_balance_summary.mean;

        let earnings_values: Vec<f64> = final_balances
            .iter()
            .map(|b| b - mean_final_balance)
            .collect();
        let earnings = Summary::of(&earnings_values);
        let bins = (num_gamblers as usize / GAMBLERS_PER_HISTOGRAM_BIN).max(1);
        let earnings_histogram = Histogram::new(&earnings_values, bins);

        Self {
            config: config.clone(),
            base_seed,
            starting_balance,
            num_gamblers,
            gamblers_ahead,
            gamblers_behind,
            gamblers_busted,
            gamblers_finished,
            avg_games_consumed,
            mean_final_balance,
            final_balance_summary,
            average_trajectory,
            earnings,
            earnings_histogram,
            trajectories: runs.into_iter().map(|r| r.trajectory).collect(),
        }
    }

    /// Share of gamblers that walked away with more than they started with.
    pub fn win_rate(&self) -> f64 {
        if self.num_gamblers == 0 {
            return 0.0;
        }
        self.gamblers_ahead as f64 / self.num_gamblers as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("               ROULETTE PROGRESSION SIMULATION\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── PARAMETERS ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Gamblers:            {}\n",
            self.num_gamblers
        ));
        report.push_str(&format!(
            "  Spins x Games:       {} x {}\n",
            self.config.spins_per_game, self.config.games
        ));
        report.push_str(&format!(
            "  Win Probability:     1/{} ({:.2}%)\n",
            self.config.pockets,
            self.config.win_probability() * 100.0
        ));
        report.push_str(&format!(
            "  Loss Streak Limit:   {}\n",
            self.config.loss_streak_threshold
        ));
        report.push_str(&format!("  Seed:                {}\n", self.base_seed));
        report.push_str(&format!(
            "  Starting Balance:    ${}\n\n",
            self.starting_balance
        ));

        report.push_str("── OUTCOMES ────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Balance:   ${:.2}\n",
            self.mean_final_balance
        ));
        report.push_str(&format!(
            "  Avg Net Result:      {}\n",
            signed_dollars(self.mean_final_balance - self.starting_balance as f64)
        ));
        report.push_str(&format!(
            "  Made Money:          {} ({:.2}%)\n",
            self.gamblers_ahead,
            self.win_rate() * 100.0
        ));
        report.push_str(&format!(
            "  Lost Money:          {}\n",
            self.gamblers_behind
        ));
        report.push_str(&format!(
            "  Went Broke:          {}\n",
            self.gamblers_busted
        ));
        report.push_str(&format!(
            "  Hit Target Wins:     {}\n",
            self.gamblers_finished
        ));
        report.push_str(&format!(
            "  Avg Games Consumed:  {:.2}\n\n",
            self.avg_games_consumed
        ));

        report.push_str("── EARNINGS VS AVERAGE ─────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Mean:     {}\n",
            signed_dollars(self.earnings.mean)
        ));
        report.push_str(&format!(
            "  Median:   {}\n",
            signed_dollars(self.earnings.median)
        ));
        report.push_str(&format!("  Std Dev:  ±${:.2}\n", self.earnings.std_dev));
        report.push_str(&format!(
            "  Range:    {} .. {}\n",
            signed_dollars(self.earnings.min),
            signed_dollars(self.earnings.max)
        ));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Format a dollar amount with an explicit sign, e.g. `+$1.50` / `-$3.00`.
pub fn signed_dollars(amount: f64) -> String {
    let sign = if amount < 0.0 { '-' } else { '+' };
    format!("{sign}${:.2}", amount.abs())
}
