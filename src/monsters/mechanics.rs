//! Per-encounter special-attack scheduling.
//!
//! One engine is created when an encounter starts and dropped when it ends.
//! Each call to [`MonsterMechanicsEngine::tick`] is one game tick: cooldowns
//! count down first, then every mechanic that is off cooldown and whose
//! trigger holds gets an accuracy roll.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use tracing::debug;

use super::types::{Monster, MonsterMechanic};
use crate::combat::logic::{roll_chance, roll_damage};
use crate::error::{EngineError, Result};

/// A mechanic that landed this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanicHit {
    pub name: String,
    pub damage: u32,
}

#[derive(Debug, Clone)]
pub struct MonsterMechanicsEngine {
    monster: String,
    mechanics: Vec<MonsterMechanic>,
    tick_counter: u64,
    active_cooldowns: BTreeMap<String, u64>,
}

impl MonsterMechanicsEngine {
    /// Engine for a catalog monster. Its mechanics were validated at load.
    pub fn for_monster(monster: &Monster) -> Self {
        Self {
            monster: monster.name.clone(),
            mechanics: monster.mechanics.clone(),
            tick_counter: 0,
            active_cooldowns: BTreeMap::new(),
        }
    }

    /// Engine over an ad-hoc mechanic list, validated here. Names must be
    /// unique since cooldowns are tracked by name.
    pub fn new(monster: impl Into<String>, mechanics: Vec<MonsterMechanic>) -> Result<Self> {
        let monster = monster.into();
        let mut seen = BTreeSet::new();
        for mechanic in &mechanics {
            let problem = if !seen.insert(mechanic.name.as_str()) {
                Some("duplicate mechanic name".to_string())
            } else {
                mechanic.problem()
            };
            if let Some(reason) = problem {
                return Err(EngineError::MalformedMechanicDefinition {
                    monster,
                    mechanic: mechanic.name.clone(),
                    reason,
                });
            }
        }
        Ok(Self {
            monster,
            mechanics,
            tick_counter: 0,
            active_cooldowns: BTreeMap::new(),
        })
    }

    /// Advance one tick and return every mechanic that landed.
    pub fn tick(&mut self, hp_percent: f64, rng: &mut impl Rng) -> Vec<MechanicHit> {
        self.active_cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });

        let mut hits = Vec::new();
        for mechanic in &self.mechanics {
            if self.active_cooldowns.contains_key(&mechanic.name) {
                continue;
            }
            if !mechanic.trigger.fires(hp_percent, self.tick_counter) {
                continue;
            }
            if !roll_chance(mechanic.accuracy, rng) {
                continue;
            }

            let damage = roll_damage(mechanic.min_damage, mechanic.max_damage, rng);
            debug!(
                monster = %self.monster,
                mechanic = %mechanic.name,
                damage,
                tick = self.tick_counter,
                "mechanic fired"
            );
            if mechanic.cooldown_ticks > 0 {
                self.active_cooldowns
                    .insert(mechanic.name.clone(), mechanic.cooldown_ticks);
            }
            hits.push(MechanicHit {
                name: mechanic.name.clone(),
                damage,
            });
        }

        self.tick_counter += 1;
        hits
    }

    /// Whether the named mechanic is off cooldown.
    pub fn can_trigger(&self, name: &str) -> Result<bool> {
        self.find(name)?;
        Ok(!self.active_cooldowns.contains_key(name))
    }

    /// Names of the mechanics currently on cooldown, in definition order.
    pub fn active_mechanics(&self) -> Vec<&str> {
        self.mechanics
            .iter()
            .filter(|m| self.active_cooldowns.contains_key(&m.name))
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Ticks left on the named mechanic's cooldown (0 when ready).
    pub fn cooldown_remaining(&self, name: &str) -> Result<u64> {
        self.find(name)?;
        Ok(self.active_cooldowns.get(name).copied().unwrap_or(0))
    }

    pub fn tick_counter(&self) -> u64 {
        self.tick_counter
    }

    pub fn mechanics(&self) -> &[MonsterMechanic] {
        &self.mechanics
    }

    fn find(&self, name: &str) -> Result<&MonsterMechanic> {
        self.mechanics
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| EngineError::unknown("mechanic", name))
    }
}
