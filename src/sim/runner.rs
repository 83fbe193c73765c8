//! Batch driver for independent bettors.
//!
//! Each run gets its own RNG stream so a seeded batch is reproducible run
//! by run: run `i` always draws from `seed + i` no matter how many runs
//! the batch holds or in which order they finish.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::martingale::Martingale;

/// Runs `config.num_runs` independent bettors and returns the finished
/// processes in run order, full balance histories included.
pub fn run_simulations(config: &SimConfig) -> Vec<Martingale> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut process = Martingale::new(
            config.initial_balance,
            config.initial_bet,
            config.win_prob,
            config.table_limit,
        );
        if let Some(cap) = config.max_rounds {
            process = process.with_round_cap(cap);
        }
        let run = process.simulate(&mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} rounds, final balance {:.2}, net {:+.2} ({})",
                run_idx + 1,
                config.num_runs,
                run.rounds_played,
                run.final_balance(),
                run.net_result(),
                run.stop_reason().label()
            );
        }
        all_runs.push(run);
    }

    all_runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_matches_config() {
        let config = SimConfig {
            num_runs: 7,
            seed: Some(12345),
            verbosity: 0,
            ..Default::default()
        };

        let runs = run_simulations(&config);
        assert_eq!(runs.len(), 7);
        for run in &runs {
            assert_eq!(run.balance_history.len() as u64, run.rounds_played + 1);
        }
    }

    #[test]
    fn test_seeded_batches_are_identical() {
        let config = SimConfig {
            num_runs: 5,
            seed: Some(42),
            verbosity: 0,
            ..Default::default()
        };

        let first = run_simulations(&config);
        let second = run_simulations(&config);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.balance_history, b.balance_history);
            assert_eq!(a.rounds_played, b.rounds_played);
        }
    }

    #[test]
    fn test_runs_are_independent_streams() {
        let config = SimConfig {
            num_runs: 10,
            seed: Some(99999),
            verbosity: 0,
            ..Default::default()
        };

        let runs = run_simulations(&config);

        // Distinct streams should not all trace the same trajectory.
        let first_history = &runs[0].balance_history;
        assert!(
            runs.iter().any(|r| r.balance_history != *first_history),
            "every run drew an identical trajectory"
        );
    }

    #[test]
    fn test_round_cap_applies_to_every_run() {
        let config = SimConfig {
            num_runs: 4,
            seed: Some(7),
            win_prob: 1.0,
            max_rounds: Some(25),
            verbosity: 0,
            ..Default::default()
        };

        let runs = run_simulations(&config);
        for run in &runs {
            assert_eq!(run.rounds_played, 25);
        }
    }
}
