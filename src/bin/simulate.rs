//! Martingale batch simulator CLI.
//!
//! Run Monte Carlo batches headlessly and print an aggregate report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 10 bettors, roulette odds
//!   cargo run --bin simulate -- -n 1000 --fair  # 1000 bettors on a fair coin
//!   cargo run --bin simulate -- --seed 42       # Reproducible batch

use martingale::constants::{AMERICAN_WIN_PROB, FAIR_WIN_PROB};
use martingale::sim::{run_simulations, SimConfig, SimReport};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║             MARTINGALE STRATEGY SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Balance:        {:.2}", config.initial_balance);
    println!("  Base Bet:       {:.2}", config.initial_bet);
    println!("  Table Limit:    {:.2}", config.table_limit);
    println!("  Win Prob:       {:.4}", config.win_prob);
    if let Some(cap) = config.max_rounds {
        println!("  Round Cap:      {}", cap);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let runs = run_simulations(&config);
    let report = SimReport::from_runs(runs, &config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "martingale_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-b" | "--balance" => {
                if i + 1 < args.len() {
                    config.initial_balance = args[i + 1].parse().unwrap_or(1000.0);
                    i += 1;
                }
            }
            "--bet" => {
                if i + 1 < args.len() {
                    config.initial_bet = args[i + 1].parse().unwrap_or(10.0);
                    i += 1;
                }
            }
            "-l" | "--limit" => {
                if i + 1 < args.len() {
                    config.table_limit = args[i + 1].parse().unwrap_or(1000.0);
                    i += 1;
                }
            }
            "-p" | "--prob" => {
                if i + 1 < args.len() {
                    // Out of range falls back like an unparseable value;
                    // an uncapped run that cannot lose would never stop.
                    config.win_prob = args[i + 1]
                        .parse::<f64>()
                        .ok()
                        .filter(|&p| p > 0.0 && p < 1.0)
                        .unwrap_or(config.win_prob);
                    i += 1;
                }
            }
            "--fair" => {
                config.win_prob = FAIR_WIN_PROB;
            }
            "--american" => {
                config.win_prob = AMERICAN_WIN_PROB;
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--cap" => {
                if i + 1 < args.len() {
                    config.max_rounds = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick_demo();
            }
            "--edge" => {
                config = SimConfig::house_edge_run(1000);
                if i + 1 < args.len() {
                    if let Ok(runs) = args[i + 1].parse::<u32>() {
                        config.num_runs = runs;
                        i += 1;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Martingale Strategy Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of bettors to simulate (default: 10)");
    println!("    -b, --balance <B>   Starting bankroll (default: 1000)");
    println!("    --bet <B>           Base wager (default: 10)");
    println!("    -l, --limit <L>     Table limit on a single wager (default: 1000)");
    println!("    -p, --prob <P>      Per-round win probability in (0, 1) (default: 18/37)");
    println!("    --fair              Fair coin odds (p = 0.5)");
    println!("    --american          American roulette odds (p = 18/38)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --cap <R>           Stop every run after R rounds");
    println!("    -v, --verbose       Per-run output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick demo (5 seeded runs)");
    println!("    --edge [N]          House-edge batch (default: 1000 capped runs)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 1000 --fair  # Fair-coin ensemble");
    println!("    cargo run --bin simulate -- --seed 42       # Reproducible");
    println!("    cargo run --bin simulate -- -b 500 --bet 5 -l 200");
    println!("    cargo run --bin simulate -- --edge 5000 --json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(flags: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(flags.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_out_of_range_probability_falls_back() {
        // A bettor who cannot lose never stops, and the parser sets no
        // cap of its own, so these fall back like unparseable values.
        let baseline = SimConfig::default().win_prob;
        assert_eq!(parse_args(&cli(&["-p", "1.0"])).win_prob, baseline);
        assert_eq!(parse_args(&cli(&["--prob", "2.5"])).win_prob, baseline);
        assert_eq!(parse_args(&cli(&["-p", "0"])).win_prob, baseline);
    }

    #[test]
    fn test_in_range_probability_is_used() {
        assert_eq!(parse_args(&cli(&["-p", "0.25"])).win_prob, 0.25);
        assert_eq!(parse_args(&cli(&["--fair"])).win_prob, FAIR_WIN_PROB);
    }
}
