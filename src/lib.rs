//! Martingale - Betting Strategy Simulator Library
//!
//! This module exposes the simulation logic for testing and external use.
//! A batch of independent bettors plays double-after-loss at a table with
//! a wager limit; the binaries replay the balance curves in the terminal
//! or print an aggregate report.

pub mod build_info;
pub mod constants;
pub mod sim;
pub mod ui;
