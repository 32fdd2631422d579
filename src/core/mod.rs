//! Balance constants and the crate-wide error type.

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::*;
