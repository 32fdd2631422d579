//! Per-character quest state machine: not started, active, completed.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
