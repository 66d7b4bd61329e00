//! Tunable rule values.
//!
//! Rule magnitudes that differ between rulesets (drop bonuses, tier gates,
//! encounter pacing) live here instead of in `constants` so a host can load
//! them from a TOML file. Every section is `#[serde(default)]`, so a file only
//! needs the keys it overrides:
//!
//! ```toml
//! [drops]
//! task_bonus = 0.15
//! tier_chances = [1.0, 0.3, 0.05, 0.01]
//!
//! [encounter]
//! respawn_delay_ticks = 3
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::constants::*;
use crate::error::{EngineError, Result};

/// All tunable rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub drops: DropRules,
    pub encounter: EncounterRules,
}

/// Drop-rate bonus magnitudes and tier gate chances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropRules {
    /// Bonus for the wealth effect (0.01 = +1%).
    pub wealth_bonus: f64,
    /// Bonus while on an active task.
    pub task_bonus: f64,
    /// Bonus per elite-tier achievement held.
    pub elite_achievement_bonus: f64,
    /// Bonus per master-tier achievement held.
    pub master_achievement_bonus: f64,
    /// Gate chance per tier: common, uncommon, rare, very rare.
    pub tier_chances: [f64; 4],
}

impl Default for DropRules {
    fn default() -> Self {
        Self {
            wealth_bonus: WEALTH_DROP_BONUS,
            task_bonus: TASK_DROP_BONUS,
            elite_achievement_bonus: ELITE_ACHIEVEMENT_DROP_BONUS,
            master_achievement_bonus: MASTER_ACHIEVEMENT_DROP_BONUS,
            tier_chances: DROP_TIER_CHANCES,
        }
    }
}

/// Encounter pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterRules {
    /// Ticks between a kill and the next monster spawning.
    pub respawn_delay_ticks: u32,
    /// Damage multiplier when attacking with a type the monster is weak to.
    pub weakness_multiplier: f64,
    /// Ticks after which an unresolved encounter times out.
    pub max_ticks: u64,
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            respawn_delay_ticks: RESPAWN_DELAY_TICKS,
            weakness_multiplier: WEAKNESS_DAMAGE_MULTIPLIER,
            max_ticks: MAX_TICKS_PER_ENCOUNTER,
        }
    }
}

impl RulesConfig {
    /// Parse and validate rules from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: RulesConfig = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Read and validate a rules file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_toml_str(&content)?;
        info!("Loaded rules from {:?}", path);
        Ok(rules)
    }

    /// Load rules from `path` if given, falling back to defaults when the file
    /// is missing or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Failed to load rules: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Check that probabilities are in [0, 1] and multipliers are non-negative.
    pub fn validate(&self) -> Result<()> {
        let d = &self.drops;
        for (name, value) in [
            ("drops.wealth_bonus", d.wealth_bonus),
            ("drops.task_bonus", d.task_bonus),
            ("drops.elite_achievement_bonus", d.elite_achievement_bonus),
            ("drops.master_achievement_bonus", d.master_achievement_bonus),
            ("encounter.weakness_multiplier", self.encounter.weakness_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        for (tier, chance) in d.tier_chances.iter().enumerate() {
            if !(0.0..=1.0).contains(chance) {
                return Err(EngineError::InvalidConfig(format!(
                    "drops.tier_chances[{tier}] must be within [0, 1], got {chance}"
                )));
            }
        }

        if self.encounter.max_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "encounter.max_ticks must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
