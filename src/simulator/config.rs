//! Simulation configuration.

use crate::character::CharacterClass;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated characters
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Class every simulated character plays
    pub class: CharacterClass,

    /// Encounters per character before the run stops
    pub battles_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            class: CharacterClass::Warrior,
            battles_per_run: 100,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a fast balance check
    pub fn quick_balance_check() -> Self {
        Self {
            num_runs: 100,
            battles_per_run: 30,
            ..Default::default()
        }
    }

    /// Same campaign length for one class, for side-by-side comparisons
    pub fn class_comparison(class: CharacterClass) -> Self {
        Self {
            num_runs: 500,
            class,
            ..Default::default()
        }
    }

    /// Long campaigns that reach the dragon tier
    pub fn long_campaign() -> Self {
        Self {
            num_runs: 200,
            battles_per_run: 500,
            ..Default::default()
        }
    }
}
