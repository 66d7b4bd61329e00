//! Monster catalog loading.
//!
//! Catalog JSON is the host's format: a `monsters` array whose entries carry
//! stats, gear, a drop table and mechanics with free-text triggers. Triggers
//! are parsed and every definition is checked here, so nothing malformed
//! reaches an encounter.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::info;

use super::types::{Monster, MonsterMechanic, TriggerCondition};
use crate::combat::logic::combat_level;
use crate::combat::types::{AttackType, CombatStats, CombatStyle, EquipmentBonus};
use crate::core::constants::DEFAULT_ATTACK_INTERVAL_TICKS;
use crate::error::{EngineError, Result};
use crate::items::types::DropTable;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    monsters: Vec<RawMonster>,
}

#[derive(Debug, Deserialize)]
struct RawMonster {
    name: String,
    #[serde(default)]
    combat_level: Option<u32>,
    stats: CombatStats,
    #[serde(default)]
    equipment: EquipmentBonus,
    attack_type: AttackType,
    #[serde(default = "default_style")]
    style: CombatStyle,
    #[serde(default = "default_interval")]
    attack_interval_ticks: u32,
    #[serde(default)]
    aggressive: bool,
    #[serde(default)]
    drop_table: DropTable,
    #[serde(default)]
    mechanics: Vec<RawMechanic>,
    #[serde(default)]
    weaknesses: BTreeSet<AttackType>,
}

#[derive(Debug, Deserialize)]
struct RawMechanic {
    name: String,
    trigger: String,
    #[serde(default)]
    min_damage: u32,
    max_damage: u32,
    #[serde(default = "default_accuracy")]
    accuracy: f64,
    #[serde(default)]
    cooldown_ticks: u64,
}

fn default_style() -> CombatStyle {
    CombatStyle::Accurate
}

fn default_interval() -> u32 {
    DEFAULT_ATTACK_INTERVAL_TICKS
}

fn default_accuracy() -> f64 {
    1.0
}

impl RawMechanic {
    fn into_mechanic(self, monster: &str) -> Result<MonsterMechanic> {
        let malformed = |reason: String| EngineError::MalformedMechanicDefinition {
            monster: monster.to_string(),
            mechanic: self.name.clone(),
            reason,
        };

        let trigger: TriggerCondition = self.trigger.parse().map_err(malformed)?;
        let mechanic = MonsterMechanic {
            name: self.name.clone(),
            trigger,
            min_damage: self.min_damage,
            max_damage: self.max_damage,
            accuracy: self.accuracy,
            cooldown_ticks: self.cooldown_ticks,
        };
        match mechanic.problem() {
            Some(reason) => Err(malformed(reason)),
            None => Ok(mechanic),
        }
    }
}

impl RawMonster {
    fn into_monster(self) -> Result<Monster> {
        validate_drop_table(&self.name, &self.drop_table)?;

        let mut seen = BTreeSet::new();
        let mut mechanics = Vec::with_capacity(self.mechanics.len());
        for raw in self.mechanics {
            if !seen.insert(raw.name.clone()) {
                return Err(EngineError::MalformedMechanicDefinition {
                    monster: self.name.clone(),
                    mechanic: raw.name,
                    reason: "duplicate mechanic name".to_string(),
                });
            }
            mechanics.push(raw.into_mechanic(&self.name)?);
        }

        if self.attack_interval_ticks == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "monster '{}' has an attack interval of 0 ticks",
                self.name
            )));
        }

        Ok(Monster {
            combat_level: self.combat_level.unwrap_or_else(|| combat_level(&self.stats)),
            name: self.name,
            stats: self.stats,
            equipment: self.equipment,
            attack_type: self.attack_type,
            style: self.style,
            attack_interval_ticks: self.attack_interval_ticks,
            aggressive: self.aggressive,
            drop_table: self.drop_table,
            mechanics,
            weaknesses: self.weaknesses,
        })
    }
}

fn validate_drop_table(monster: &str, table: &DropTable) -> Result<()> {
    for (tier, item) in table.entries() {
        let reason = if item.min > item.max {
            Some(format!(
                "{tier} entry '{}' has inverted quantity range {}..{}",
                item.item_id, item.min, item.max
            ))
        } else if !(0.0..=1.0).contains(&item.rarity) {
            Some(format!(
                "{tier} entry '{}' has rarity {} outside [0, 1]",
                item.item_id, item.rarity
            ))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(EngineError::MalformedDropTable {
                monster: monster.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

/// Read-only monster definitions keyed by lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct MonsterCatalog {
    monsters: BTreeMap<String, Monster>,
}

impl MonsterCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut monsters = BTreeMap::new();
        for raw in file.monsters {
            let monster = raw.into_monster()?;
            let key = monster.name.to_lowercase();
            if monsters.contains_key(&key) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate monster '{}'",
                    monster.name
                )));
            }
            monsters.insert(key, monster);
        }
        info!(count = monsters.len(), "Loaded monster catalog");
        Ok(Self { monsters })
    }

    /// Look up a monster by name, ignoring case.
    pub fn get(&self, name: &str) -> Result<&Monster> {
        self.monsters
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| EngineError::unknown("monster", name))
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values()
    }
}
