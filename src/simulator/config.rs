//! Simulation configuration.

use crate::core::constants::MAX_TICKS_PER_ENCOUNTER;
use crate::items::drops::DropModifiers;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Fights attempted per run
    pub kills_per_run: u32,

    /// Ticks before a single fight is abandoned
    pub max_ticks_per_kill: u64,

    /// Drop modifiers the simulated player has
    pub modifiers: DropModifiers,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            kills_per_run: 100,
            max_ticks_per_kill: MAX_TICKS_PER_ENCOUNTER,
            modifiers: DropModifiers::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded config for smoke tests
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 10,
            seed: Some(seed),
            kills_per_run: 20,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Many kills per run for loot analysis
    pub fn loot_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            kills_per_run: 1_000,
            ..Default::default()
        }
    }
}
