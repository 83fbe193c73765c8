//! Simulation configuration.

use crate::constants::ROULETTE_WIN_PROB;

/// Configuration for a batch of martingale runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Starting bankroll per bettor
    pub initial_balance: f64,

    /// Base wager, returned to after every win
    pub initial_bet: f64,

    /// Per-round win probability
    pub win_prob: f64,

    /// Largest wager the table accepts
    pub table_limit: f64,

    /// Number of independent bettors to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Hard cap on rounds per run (None = play until stopped)
    pub max_rounds: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run detail)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1000.0,
            initial_bet: 10.0,
            win_prob: ROULETTE_WIN_PROB,
            table_limit: 1000.0,
            num_runs: 10,
            seed: None,
            max_rounds: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch that animates quickly
    pub fn quick_demo() -> Self {
        Self {
            num_runs: 5,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Large headless batch for measuring the house edge over many bettors
    pub fn house_edge_run(num_runs: u32) -> Self {
        Self {
            num_runs,
            max_rounds: Some(10_000),
            ..Default::default()
        }
    }
}
