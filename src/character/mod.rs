//! The character record, its progression rules, and save files.

pub mod progression;
pub mod save;
pub mod types;

pub use progression::*;
pub use save::*;
pub use types::*;
