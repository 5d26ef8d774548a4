//! Roulette progression simulator
//!
//! Runs the Monte Carlo simulation, then shows the balance trajectories and
//! the earnings distribution as terminal charts.
//!
//! Usage:
//!   roulette-progression [OPTIONS]
//!
//! Pass `--no-charts` for a plain-text summary or `--json` for
//! machine-readable output.

use anyhow::Context;
use clap::Parser;
use roulette_progression::build_info;
use roulette_progression::constants::*;
use roulette_progression::{run_simulation, ui, SimConfig};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version = build_info::LONG_VERSION,
    about = "Monte Carlo simulation of a triangular roulette betting progression"
)]
struct Args {
    /// Spins in one game's progression
    #[arg(long, default_value_t = DEFAULT_SPINS_PER_GAME)]
    spins: u32,

    /// Games per gambler (wins needed before walking away)
    #[arg(long, default_value_t = DEFAULT_GAMES)]
    games: u32,

    /// Number of simulated gamblers
    #[arg(long, default_value_t = DEFAULT_GAMBLERS)]
    gamblers: u32,

    /// Pockets on the wheel (win probability is 1/pockets)
    #[arg(long, default_value_t = DEFAULT_POCKETS)]
    pockets: u32,

    /// Consecutive bets before a progression is abandoned
    #[arg(long, default_value_t = DEFAULT_LOSS_STREAK_THRESHOLD)]
    loss_streak: u32,

    /// Starting bankroll (default: enough to cover every game's progression)
    #[arg(long)]
    initial_balance: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the text summary instead of opening the chart viewer
    #[arg(long)]
    no_charts: bool,

    /// Print the summary as JSON (implies --no-charts)
    #[arg(long)]
    json: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            spins_per_game: self.spins,
            games: self.games,
            gamblers: self.gamblers,
            pockets: self.pockets,
            loss_streak_threshold: self.loss_streak,
            initial_balance: self.initial_balance,
            seed: self.seed,
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = args.sim_config();
    let report = run_simulation(&config).context("invalid simulation parameters")?;

    if args.json {
        println!("{}", report.to_json().context("failed to serialize report")?);
        return Ok(());
    }
    if args.no_charts {
        print!("{}", report.to_text());
        return Ok(());
    }

    ui::show_charts(&report).context("chart viewer failed")?;
    info!("viewer closed");
    // Leave the numbers on screen once the alternate screen is gone
    print!("{}", report.to_text());
    Ok(())
}
