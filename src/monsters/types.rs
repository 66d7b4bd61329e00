use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::types::{
    AttackSetup, AttackType, CombatStats, CombatStyle, Combatant, EquipmentBonus,
};
use crate::items::types::DropTable;

/// When a mechanic is eligible to fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerCondition {
    /// Fires while the monster's hitpoints are below this percentage.
    HealthThreshold(f64),
    /// Fires on every tick whose counter is a multiple of this interval.
    PeriodicTick(u64),
}

impl TriggerCondition {
    pub fn fires(&self, hp_percent: f64, tick_counter: u64) -> bool {
        match *self {
            TriggerCondition::HealthThreshold(threshold) => hp_percent < threshold,
            TriggerCondition::PeriodicTick(0) => false,
            TriggerCondition::PeriodicTick(interval) => tick_counter % interval == 0,
        }
    }

    /// Reason this condition can never be valid, if any.
    pub fn problem(&self) -> Option<String> {
        match *self {
            TriggerCondition::HealthThreshold(threshold)
                if !(threshold > 0.0 && threshold <= 100.0) =>
            {
                Some(format!("health threshold {threshold} is outside (0, 100]"))
            }
            TriggerCondition::PeriodicTick(0) => Some("tick interval must be at least 1".into()),
            _ => None,
        }
    }
}

impl fmt::Display for TriggerCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerCondition::HealthThreshold(threshold) => write!(f, "hp < {threshold}%"),
            TriggerCondition::PeriodicTick(1) => write!(f, "every 1 tick"),
            TriggerCondition::PeriodicTick(interval) => write!(f, "every {interval} ticks"),
        }
    }
}

/// Parses the catalog forms `"hp < 50%"` and `"every 5 ticks"`.
///
/// Whitespace and case are ignored; `health` is accepted for `hp` and the
/// percent sign is optional.
impl FromStr for TriggerCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some(rest) = text
            .strip_prefix("hp<")
            .or_else(|| text.strip_prefix("health<"))
        {
            let number = rest.strip_suffix('%').unwrap_or(rest);
            let threshold: f64 = number
                .parse()
                .map_err(|_| format!("cannot read health threshold from '{s}'"))?;
            return Ok(TriggerCondition::HealthThreshold(threshold));
        }

        if let Some(rest) = text.strip_prefix("every") {
            let number = rest
                .strip_suffix("ticks")
                .or_else(|| rest.strip_suffix("tick"))
                .ok_or_else(|| format!("expected 'every N ticks', got '{s}'"))?;
            let interval: u64 = number
                .parse()
                .map_err(|_| format!("cannot read tick interval from '{s}'"))?;
            return Ok(TriggerCondition::PeriodicTick(interval));
        }

        Err(format!("unrecognized trigger '{s}'"))
    }
}

/// A scripted special attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterMechanic {
    pub name: String,
    pub trigger: TriggerCondition,
    pub min_damage: u32,
    pub max_damage: u32,
    /// Chance the mechanic lands once triggered.
    pub accuracy: f64,
    /// Ticks before the mechanic may fire again after landing.
    pub cooldown_ticks: u64,
}

impl MonsterMechanic {
    /// Reason this mechanic is unusable, if any.
    pub fn problem(&self) -> Option<String> {
        if let Some(problem) = self.trigger.problem() {
            return Some(problem);
        }
        if self.min_damage > self.max_damage {
            return Some(format!(
                "damage range {}..{} is inverted",
                self.min_damage, self.max_damage
            ));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Some(format!("accuracy {} is outside [0, 1]", self.accuracy));
        }
        None
    }
}

/// Static monster definition. Loaded once from a catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Monster {
    pub name: String,
    pub combat_level: u32,
    pub stats: CombatStats,
    pub equipment: EquipmentBonus,
    pub attack_type: AttackType,
    pub style: CombatStyle,
    pub attack_interval_ticks: u32,
    pub aggressive: bool,
    pub drop_table: DropTable,
    pub mechanics: Vec<MonsterMechanic>,
    pub weaknesses: BTreeSet<AttackType>,
}

impl Monster {
    pub fn is_weak_to(&self, attack_type: AttackType) -> bool {
        self.weaknesses.contains(&attack_type)
    }

    /// The monster's own stat block as an attacker or defender, holding its style.
    pub fn combatant(&self) -> Combatant<'_> {
        Combatant::new(&self.stats, &self.equipment).with_style(self.style)
    }

    pub fn attack_setup(&self) -> AttackSetup {
        AttackSetup::new(self.style, self.attack_type)
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.stats.hitpoints()
    }
}
