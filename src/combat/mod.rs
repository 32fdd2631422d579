//! Turn-based battles between a character and a single enemy.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
