//! Monte Carlo balance simulator.
//!
//! Plays many characters through the real progression, item, combat and
//! quest engines to analyze:
//! - How fast each class levels
//! - How often characters die and go broke
//! - How the shop economy and quest rewards pace the game

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
