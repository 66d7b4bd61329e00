//! Engine-wide constants and tunable rules.

pub mod config;
pub mod constants;

pub use config::{DropRules, EncounterRules, RulesConfig};
