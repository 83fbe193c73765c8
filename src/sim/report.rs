//! Simulation report generation.

use super::config::SimConfig;
use super::martingale::{Martingale, StopReason};

/// Aggregated results from a batch of martingale runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,

    // Parameters the batch was played with
    pub initial_balance: f64,
    pub initial_bet: f64,
    pub win_prob: f64,
    pub table_limit: f64,
    pub max_rounds: Option<u64>,

    // Outcome counts
    pub busted_runs: u32,
    pub limit_stopped_runs: u32,
    pub capped_runs: u32,
    pub profitable_runs: u32,

    // Aggregated balances
    pub avg_final_balance: f64,
    pub median_final_balance: f64,
    pub min_final_balance: f64,
    pub max_final_balance: f64,
    pub avg_net_result: f64,

    // Run length
    pub avg_rounds: f64,
    pub longest_run_rounds: u64,
    pub shortest_run_rounds: u64,

    // Distribution data
    pub final_balances: Vec<f64>,
    pub rounds_per_run: Vec<u64>,

    // Individual runs for detailed analysis
    pub runs: Vec<Martingale>,
}

impl SimReport {
    /// Create a new report from finished runs.
    pub fn from_runs(runs: Vec<Martingale>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;

        let busted_runs = runs
            .iter()
            .filter(|r| r.stop_reason() == StopReason::Bankroll)
            .count() as u32;
        let limit_stopped_runs = runs
            .iter()
            .filter(|r| r.stop_reason() == StopReason::TableLimit)
            .count() as u32;
        let capped_runs = runs
            .iter()
            .filter(|r| r.stop_reason() == StopReason::RoundCap)
            .count() as u32;
        let profitable_runs = runs.iter().filter(|r| r.net_result() > 0.0).count() as u32;

        let final_balances: Vec<f64> = runs.iter().map(|r| r.final_balance()).collect();
        let rounds_per_run: Vec<u64> = runs.iter().map(|r| r.rounds_played).collect();

        let avg_final_balance = final_balances.iter().sum::<f64>() / num_runs.max(1) as f64;
        let avg_net_result =
            runs.iter().map(|r| r.net_result()).sum::<f64>() / num_runs.max(1) as f64;
        let avg_rounds =
            rounds_per_run.iter().map(|&r| r as f64).sum::<f64>() / num_runs.max(1) as f64;

        let median_final_balance = {
            let mut sorted = final_balances.clone();
            sorted.sort_by(f64::total_cmp);
            sorted.get(sorted.len() / 2).copied().unwrap_or(0.0)
        };
        let min_final_balance = if final_balances.is_empty() {
            0.0
        } else {
            final_balances.iter().copied().fold(f64::INFINITY, f64::min)
        };
        let max_final_balance = if final_balances.is_empty() {
            0.0
        } else {
            final_balances
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max)
        };

        let longest_run_rounds = rounds_per_run.iter().copied().max().unwrap_or(0);
        let shortest_run_rounds = rounds_per_run.iter().copied().min().unwrap_or(0);

        Self {
            num_runs,
            initial_balance: config.initial_balance,
            initial_bet: config.initial_bet,
            win_prob: config.win_prob,
            table_limit: config.table_limit,
            max_rounds: config.max_rounds,
            busted_runs,
            limit_stopped_runs,
            capped_runs,
            profitable_runs,
            avg_final_balance,
            median_final_balance,
            min_final_balance,
            max_final_balance,
            avg_net_result,
            avg_rounds,
            longest_run_rounds,
            shortest_run_rounds,
            final_balances,
            rounds_per_run,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 MARTINGALE SIMULATION REPORT\n");
        report.push_str("               (Double After Loss, Even Money)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} profitable, {} went bust\n\n",
            self.num_runs, self.profitable_runs, self.busted_runs
        ));

        report.push_str("── PARAMETERS ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Initial Balance:     {:.2}\n",
            self.initial_balance
        ));
        report.push_str(&format!("  Base Bet:            {:.2}\n", self.initial_bet));
        report.push_str(&format!(
            "  Win Probability:     {:.4} ({:.1}% per round)\n",
            self.win_prob,
            self.win_prob * 100.0
        ));
        report.push_str(&format!("  Table Limit:         {:.2}\n", self.table_limit));
        match self.max_rounds {
            Some(cap) => report.push_str(&format!("  Round Cap:           {}\n\n", cap)),
            None => report.push_str("  Round Cap:           none\n\n"),
        }

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Balance:   {:.2}\n",
            self.avg_final_balance
        ));
        report.push_str(&format!(
            "  Median Final:        {:.2}\n",
            self.median_final_balance
        ));
        report.push_str(&format!(
            "  Min / Max Final:     {:.2} / {:.2}\n",
            self.min_final_balance, self.max_final_balance
        ));
        report.push_str(&format!(
            "  Avg Net Result:      {:+.2}\n",
            self.avg_net_result
        ));
        report.push_str(&format!("  Avg Rounds:          {:.1}\n", self.avg_rounds));
        report.push_str(&format!(
            "  Shortest / Longest:  {} / {} rounds\n\n",
            self.shortest_run_rounds, self.longest_run_rounds
        ));

        report.push_str("── STOP REASONS ─────────────────────────────────────────────────\n");
        let reasons = [
            ("Busted", self.busted_runs),
            ("Table limit", self.limit_stopped_runs),
            ("Round cap", self.capped_runs),
        ];
        for (label, count) in reasons {
            let pct = (count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar_len = (pct / 5.0) as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!("  {:<12} {:>5.1}% {}\n", label, pct, bar));
        }
        report.push('\n');

        report.push_str("── FINAL BALANCE DISTRIBUTION ───────────────────────────────────\n");
        let span = self.max_final_balance - self.min_final_balance;
        if span > 0.0 {
            const BUCKETS: usize = 8;
            let width = span / BUCKETS as f64;
            for b in 0..BUCKETS {
                let lo = self.min_final_balance + width * b as f64;
                let hi = lo + width;
                // The last bucket is closed so the maximum lands somewhere.
                let count = self
                    .final_balances
                    .iter()
                    .filter(|&&v| v >= lo && (v < hi || b == BUCKETS - 1))
                    .count();
                let pct = (count as f64 / self.num_runs.max(1) as f64) * 100.0;
                let bar_len = (pct / 5.0) as usize;
                let bar: String = "█".repeat(bar_len);
                report.push_str(&format!(
                    "  {:>10.0} .. {:>10.0}  {:>5.1}% {}\n",
                    lo, hi, pct, bar
                ));
            }
        } else {
            report.push_str(&format!(
                "  All runs finished at {:.2}\n",
                self.avg_final_balance
            ));
        }
        report.push('\n');

        report.push_str("── STRATEGY ASSESSMENT ──────────────────────────────────────────\n");
        let ruin_rate = (self.busted_runs as f64 / self.num_runs.max(1) as f64) * 100.0;
        let risk_rating = if ruin_rate >= 75.0 {
            "RUINOUS - The doubling ladder drains most bankrolls"
        } else if ruin_rate >= 40.0 {
            "DANGEROUS - Ruin is the most common outcome"
        } else if ruin_rate > 0.0 {
            "EXPOSED - Some bankrolls did not survive"
        } else {
            "UNSCATHED - No bankroll went bust in this batch"
        };

        report.push_str(&format!("  Ruin Rate:       {:.1}%\n", ruin_rate));
        report.push_str(&format!("  Risk Rating:     {}\n", risk_rating));

        if self.avg_net_result < 0.0 {
            report.push_str(&format!(
                "  ⚠️  Average bettor finished {:.2} down - the house edge holds\n",
                -self.avg_net_result
            ));
        }
        if self.limit_stopped_runs > self.busted_runs && self.limit_stopped_runs > 0 {
            report.push_str(
                "  ⚠️  Table limit stopped more runs than ruin did - ladders cap out early\n",
            );
        }
        if self.num_runs > 0
            && self.profitable_runs * 2 > self.num_runs
            && self.avg_net_result < 0.0
        {
            report.push_str(
                "  ⚠️  Most runs finished ahead while the average lost - heavy left tail\n",
            );
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// Implement Serialize for JSON output
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 21)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("initial_balance", &self.initial_balance)?;
        state.serialize_field("initial_bet", &self.initial_bet)?;
        state.serialize_field("win_prob", &self.win_prob)?;
        state.serialize_field("table_limit", &self.table_limit)?;
        state.serialize_field("max_rounds", &self.max_rounds)?;
        state.serialize_field("busted_runs", &self.busted_runs)?;
        state.serialize_field("limit_stopped_runs", &self.limit_stopped_runs)?;
        state.serialize_field("capped_runs", &self.capped_runs)?;
        state.serialize_field("profitable_runs", &self.profitable_runs)?;
        state.serialize_field("avg_final_balance", &self.avg_final_balance)?;
        state.serialize_field("median_final_balance", &self.median_final_balance)?;
        state.serialize_field("min_final_balance", &self.min_final_balance)?;
        state.serialize_field("max_final_balance", &self.max_final_balance)?;
        state.serialize_field("avg_net_result", &self.avg_net_result)?;
        state.serialize_field("avg_rounds", &self.avg_rounds)?;
        state.serialize_field("longest_run_rounds", &self.longest_run_rounds)?;
        state.serialize_field("shortest_run_rounds", &self.shortest_run_rounds)?;
        state.serialize_field("final_balances", &self.final_balances)?;
        state.serialize_field("rounds_per_run", &self.rounds_per_run)?;
        state.serialize_field(
            "ruin_rate",
            &((self.busted_runs as f64 / self.num_runs.max(1) as f64) * 100.0),
        )?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busted_run() -> Martingale {
        // Win at 10, then three losses: 110 -> 100 -> 80 -> 40, next wager 80.
        Martingale {
            initial_balance: 100.0,
            initial_bet: 10.0,
            win_prob: 0.5,
            table_limit: 500.0,
            max_rounds: None,
            balance: 40.0,
            current_bet: 80.0,
            balance_history: vec![100.0, 110.0, 100.0, 80.0, 40.0],
            rounds_played: 4,
        }
    }

    fn capped_run() -> Martingale {
        Martingale {
            initial_balance: 100.0,
            initial_bet: 10.0,
            win_prob: 0.5,
            table_limit: 500.0,
            max_rounds: Some(3),
            balance: 130.0,
            current_bet: 10.0,
            balance_history: vec![100.0, 110.0, 120.0, 130.0],
            rounds_played: 3,
        }
    }

    fn limit_stopped_run() -> Martingale {
        // Four straight losses walk the wager past an 80 table limit.
        Martingale {
            initial_balance: 1000.0,
            initial_bet: 10.0,
            win_prob: 0.5,
            table_limit: 80.0,
            max_rounds: None,
            balance: 850.0,
            current_bet: 160.0,
            balance_history: vec![1000.0, 990.0, 970.0, 930.0, 850.0],
            rounds_played: 4,
        }
    }

    #[test]
    fn test_report_aggregation() {
        let runs = vec![busted_run(), capped_run(), limit_stopped_run()];
        let config = SimConfig {
            initial_balance: 100.0,
            initial_bet: 10.0,
            win_prob: 0.5,
            table_limit: 500.0,
            num_runs: 3,
            verbosity: 0,
            ..Default::default()
        };

        let report = SimReport::from_runs(runs, &config);

        assert_eq!(report.num_runs, 3);
        assert_eq!(report.busted_runs, 1);
        assert_eq!(report.limit_stopped_runs, 1);
        assert_eq!(report.capped_runs, 1);
        assert_eq!(report.profitable_runs, 1);
        assert!((report.avg_final_balance - 340.0).abs() < 1e-9);
        assert_eq!(report.median_final_balance, 130.0);
        assert_eq!(report.min_final_balance, 40.0);
        assert_eq!(report.max_final_balance, 850.0);
        assert!((report.avg_net_result - (-60.0)).abs() < 1e-9);
        assert_eq!(report.longest_run_rounds, 4);
        assert_eq!(report.shortest_run_rounds, 3);
    }

    #[test]
    fn test_text_report_sections() {
        let config = SimConfig {
            num_runs: 2,
            verbosity: 0,
            ..Default::default()
        };
        let report = SimReport::from_runs(vec![busted_run(), capped_run()], &config);
        let text = report.to_text();

        assert!(text.contains("MARTINGALE SIMULATION REPORT"));
        assert!(text.contains("PARAMETERS"));
        assert!(text.contains("STOP REASONS"));
        assert!(text.contains("STRATEGY ASSESSMENT"));
    }

    #[test]
    fn test_json_report_parses() {
        let config = SimConfig {
            num_runs: 1,
            verbosity: 0,
            ..Default::default()
        };
        let report = SimReport::from_runs(vec![limit_stopped_run()], &config);

        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["num_runs"], 1);
        assert_eq!(value["limit_stopped_runs"], 1);
        assert!(value["final_balances"].is_array());
    }

    #[test]
    fn test_empty_batch_report() {
        let config = SimConfig {
            num_runs: 0,
            verbosity: 0,
            ..Default::default()
        };
        let report = SimReport::from_runs(Vec::new(), &config);

        assert_eq!(report.num_runs, 0);
        assert_eq!(report.avg_final_balance, 0.0);
        assert_eq!(report.min_final_balance, 0.0);
        assert_eq!(report.max_final_balance, 0.0);
    }
}
