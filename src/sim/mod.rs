//! Martingale betting simulator for Monte Carlo analysis.
//!
//! Run batches of independent bettors to analyze:
//! - How long a bankroll survives the doubling ladder
//! - How often the table limit cuts a ladder short
//! - The spread of final balances around the expected loss
//!
//! Each bettor is a `Martingale` process; the runner gives every run its
//! own seeded RNG stream so batches replay exactly.

mod config;
mod martingale;
mod report;
mod runner;
mod trial;

pub use config::SimConfig;
pub use martingale::{Martingale, StopReason};
pub use report::SimReport;
pub use runner::run_simulations;
pub use trial::spin_wins;
