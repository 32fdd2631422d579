//! Chronicles - RPG Game State Engine
//!
//! Four engines over one owned [`character::Character`] record:
//! progression, equipment and inventory effects, turn-based combat and the
//! quest state machine. Catalog and save-file I/O sit at the edges, and the
//! simulator drives everything headlessly for balance analysis.

pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod quests;
pub mod simulator;
