//! Frame-by-frame replay state for a finished batch.
//!
//! The simulation runs to completion before anything is drawn; playback
//! then reveals the balance curves one round per frame, the way a live
//! ticker would. All of this is plain state, the chart scene just reads
//! the visible slices.

use crate::sim::{Martingale, SimConfig, StopReason};

pub struct Playback {
    /// One (round, balance) series per run, full length.
    series: Vec<Vec<(f64, f64)>>,
    pub stop_reasons: Vec<StopReason>,
    /// Points currently revealed; shorter runs freeze at their last point.
    pub frame: usize,
    pub playing: bool,
    pub max_frame: usize,

    // Chart bounds, fixed for the whole replay
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,

    // Parameters echoed in the legend
    pub initial_balance: f64,
    pub initial_bet: f64,
    pub table_limit: f64,
    pub win_prob: f64,
}

impl Playback {
    pub fn new(runs: &[Martingale], config: &SimConfig) -> Self {
        let series: Vec<Vec<(f64, f64)>> = runs
            .iter()
            .map(|run| {
                run.balance_history
                    .iter()
                    .enumerate()
                    .map(|(round, &balance)| (round as f64, balance))
                    .collect()
            })
            .collect();
        let stop_reasons = runs.iter().map(|run| run.stop_reason()).collect();

        let max_frame = series.iter().map(Vec::len).max().unwrap_or(1);
        let longest_rounds = max_frame.saturating_sub(1) as f64;

        let lowest = runs
            .iter()
            .flat_map(|run| run.balance_history.iter().copied())
            .fold(f64::INFINITY, f64::min);
        let highest = runs
            .iter()
            .flat_map(|run| run.balance_history.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        let (lowest, highest) = if runs.is_empty() {
            (config.initial_balance, config.initial_balance)
        } else {
            (lowest, highest)
        };

        Self {
            series,
            stop_reasons,
            frame: 1,
            playing: true,
            max_frame,
            // Headroom past the longest run, and a bankroll of margin
            // above and below, so curves never touch the axes.
            x_max: longest_rounds + 20.0,
            y_min: lowest - config.initial_balance,
            y_max: highest + config.initial_balance,
            initial_balance: config.initial_balance,
            initial_bet: config.initial_bet,
            table_limit: config.table_limit,
            win_prob: config.win_prob,
        }
    }

    pub fn run_count(&self) -> usize {
        self.series.len()
    }

    /// The revealed prefix of one run's balance curve.
    pub fn visible(&self, run: usize) -> &[(f64, f64)] {
        let points = &self.series[run];
        &points[..self.frame.min(points.len())]
    }

    /// Balance at the playback head, the run's final balance once it has
    /// fully played out.
    pub fn current_balance(&self, run: usize) -> f64 {
        let points = &self.series[run];
        points[self.frame.min(points.len()) - 1].1
    }

    /// True once the playback head has passed this run's last round.
    pub fn run_finished(&self, run: usize) -> bool {
        self.frame >= self.series[run].len()
    }

    pub fn advance(&mut self) {
        if self.playing && self.frame < self.max_frame {
            self.frame += 1;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.playing = !self.playing;
    }

    pub fn restart(&mut self) {
        self.frame = 1;
        self.playing = true;
    }

    pub fn finished(&self) -> bool {
        self.frame >= self.max_frame
    }
}
