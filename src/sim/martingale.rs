//! The martingale betting process.
//!
//! One `Martingale` value is one bettor: a starting bankroll, a base stake,
//! a win probability and a table limit. Running `simulate` plays rounds
//! until the bankroll or the table can no longer cover the next wager,
//! recording the balance after every round.

use rand::Rng;
use serde::Serialize;

use super::trial::spin_wins;

/// Why a simulation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The bankroll could no longer cover the next wager.
    Bankroll,
    /// The table limit was below the next wager.
    TableLimit,
    /// The configured round cap was reached.
    RoundCap,
}

impl StopReason {
    /// Short tag for panels and text reports.
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::Bankroll => "busted",
            StopReason::TableLimit => "table limit",
            StopReason::RoundCap => "round cap",
        }
    }
}

/// A single martingale bettor.
///
/// The doubling rule is the whole strategy: every loss doubles the next
/// wager, every win pays even money and resets the wager to `initial_bet`.
/// Balances are tracked in `balance_history`, starting with the initial
/// bankroll, so the history always holds `rounds_played + 1` entries.
#[derive(Debug, Clone, Serialize)]
pub struct Martingale {
    pub initial_balance: f64,
    pub initial_bet: f64,
    pub win_prob: f64,
    pub table_limit: f64,
    /// Optional hard stop on rounds. `None` plays until the money or the
    /// table gives out, which with a win probability of 1.0 is never.
    pub max_rounds: Option<u64>,
    pub balance: f64,
    pub current_bet: f64,
    pub balance_history: Vec<f64>,
    pub rounds_played: u64,
}

impl Martingale {
    /// Creates a bettor ready to play. State starts as a fresh run.
    pub fn new(initial_balance: f64, initial_bet: f64, win_prob: f64, table_limit: f64) -> Self {
        let mut process = Self {
            initial_balance,
            initial_bet,
            win_prob,
            table_limit,
            max_rounds: None,
            balance: 0.0,
            current_bet: 0.0,
            balance_history: Vec::new(),
            rounds_played: 0,
        };
        process.reset();
        process
    }

    /// Adds a hard round cap to an otherwise open-ended run.
    pub fn with_round_cap(mut self, max_rounds: u64) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Returns the bettor to its pre-play state: full bankroll, base
    /// wager, a history holding only the starting balance.
    pub fn reset(&mut self) {
        self.balance = self.initial_balance;
        self.current_bet = self.initial_bet;
        self.balance_history = vec![self.initial_balance];
        self.rounds_played = 0;
    }

    /// Plays rounds until a stop condition and returns the finished run.
    ///
    /// The run always starts from a fresh state, so calling this twice on
    /// the same parameters gives two complete independent runs rather than
    /// a continuation. Each round stakes the current wager, draws an
    /// outcome, settles, and records the new balance.
    pub fn simulate(mut self, rng: &mut impl Rng) -> Self {
        self.reset();
        while self.balance >= self.current_bet && self.table_limit >= self.current_bet {
            if let Some(cap) = self.max_rounds {
                if self.rounds_played >= cap {
                    break;
                }
            }
            self.balance -= self.current_bet;
            if spin_wins(self.win_prob, rng) {
                // Even money: stake back plus winnings.
                self.balance += 2.0 * self.current_bet;
                self.current_bet = self.initial_bet;
            } else {
                self.current_bet *= 2.0;
            }
            self.balance_history.push(self.balance);
            self.rounds_played += 1;
        }
        self
    }

    /// Balance after the last recorded round.
    pub fn final_balance(&self) -> f64 {
        self.balance
    }

    /// Profit or loss relative to the starting bankroll.
    pub fn net_result(&self) -> f64 {
        self.balance - self.initial_balance
    }

    /// Why the run ended. Meaningful once `simulate` has returned; the
    /// bankroll check wins when both limits block the same wager.
    pub fn stop_reason(&self) -> StopReason {
        if self.balance < self.current_bet {
            StopReason::Bankroll
        } else if self.table_limit < self.current_bet {
            StopReason::TableLimit
        } else {
            StopReason::RoundCap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_starts_fresh() {
        let m = Martingale::new(1000.0, 10.0, 0.4865, 500.0);
        assert_eq!(m.balance, 1000.0);
        assert_eq!(m.current_bet, 10.0);
        assert_eq!(m.balance_history, vec![1000.0]);
        assert_eq!(m.rounds_played, 0);
        assert_eq!(m.max_rounds, None);
    }

    #[test]
    fn test_reset_restores_pre_play_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut m = Martingale::new(200.0, 5.0, 0.5, 100.0).simulate(&mut rng);
        assert!(m.rounds_played > 0);

        m.reset();
        assert_eq!(m.balance, 200.0);
        assert_eq!(m.current_bet, 5.0);
        assert_eq!(m.balance_history, vec![200.0]);
        assert_eq!(m.rounds_played, 0);
    }

    #[test]
    fn test_all_losses_double_the_wager() {
        // A win probability of zero forces the pure doubling ladder:
        // wagers 1, 2, 4, 8, then 16 is over the table limit.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let m = Martingale::new(100.0, 1.0, 0.0, 8.0).simulate(&mut rng);

        assert_eq!(m.balance_history, vec![100.0, 99.0, 97.0, 93.0, 85.0]);
        assert_eq!(m.rounds_played, 4);
        assert_eq!(m.final_balance(), 85.0);
        assert_eq!(m.net_result(), -15.0);
        assert_eq!(m.current_bet, 16.0);
        assert_eq!(m.stop_reason(), StopReason::TableLimit);
    }

    #[test]
    fn test_all_wins_gain_base_bet_each_round() {
        // Certain wins never stop on their own; the cap bounds the run.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let m = Martingale::new(100.0, 5.0, 1.0, 1000.0)
            .with_round_cap(10)
            .simulate(&mut rng);

        assert_eq!(m.rounds_played, 10);
        assert_eq!(m.final_balance(), 150.0);
        assert_eq!(m.stop_reason(), StopReason::RoundCap);
        for (round, window) in m.balance_history.windows(2).enumerate() {
            assert_eq!(
                window[1] - window[0],
                5.0,
                "round {} should net exactly the base bet",
                round + 1
            );
        }
    }

    #[test]
    fn test_bankroll_stop_beats_doubling() {
        // One affordable losing wager, then the bankroll is short.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let m = Martingale::new(10.0, 8.0, 0.0, 1000.0).simulate(&mut rng);

        assert_eq!(m.balance_history, vec![10.0, 2.0]);
        assert_eq!(m.rounds_played, 1);
        assert_eq!(m.stop_reason(), StopReason::Bankroll);
    }

    #[test]
    fn test_unaffordable_first_wager_plays_no_rounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let m = Martingale::new(5.0, 10.0, 0.5, 1000.0).simulate(&mut rng);

        assert_eq!(m.rounds_played, 0);
        assert_eq!(m.balance_history, vec![5.0]);
        assert_eq!(m.final_balance(), 5.0);
        assert_eq!(m.stop_reason(), StopReason::Bankroll);
    }

    #[test]
    fn test_history_length_tracks_rounds() {
        for seed in 77..97 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let m = Martingale::new(500.0, 10.0, 0.4865, 300.0).simulate(&mut rng);
            assert_eq!(m.balance_history.len() as u64, m.rounds_played + 1);
        }
    }

    #[test]
    fn test_simulate_twice_gives_fresh_runs() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(11);
        let mut rng_b = ChaCha8Rng::seed_from_u64(11);

        let once = Martingale::new(300.0, 5.0, 0.5, 200.0).simulate(&mut rng_a);
        // Re-running the finished process with the same seed starts over
        // instead of continuing from the stopped state.
        let twice = once.clone().simulate(&mut rng_b);

        assert_eq!(once.balance_history, twice.balance_history);
        assert_eq!(once.rounds_played, twice.rounds_played);
    }

    #[test]
    fn test_terminal_state_fails_the_guard() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let m = Martingale::new(400.0, 10.0, 0.4865, 150.0).simulate(&mut rng);
        assert!(
            m.balance < m.current_bet || m.table_limit < m.current_bet,
            "run stopped while both limits still covered the wager"
        );
    }

    #[test]
    fn test_round_cap_zero_plays_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let m = Martingale::new(1000.0, 10.0, 0.5, 500.0)
            .with_round_cap(0)
            .simulate(&mut rng);
        assert_eq!(m.rounds_played, 0);
        assert_eq!(m.balance_history, vec![1000.0]);
        assert_eq!(m.stop_reason(), StopReason::RoundCap);
    }
}
