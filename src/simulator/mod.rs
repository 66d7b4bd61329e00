//! Monte Carlo simulator for player-versus-monster balance.
//!
//! Runs many seeded encounters against a single monster and aggregates kill
//! speed, death rate, damage and loot:
//! - Kills per hour and ticks per kill
//! - Death and timeout rates
//! - Observed versus expected DPS
//! - Loot per kill
//!
//! Every fight goes through [`crate::encounter::Encounter`], so results match
//! what the engine does during play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{DropSummary, RunStats, SimReport};
pub use runner::run_simulation;
