//! Loot resolution.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::types::{DropTable, DropTableItem, DropTier, ItemDrop};
use crate::combat::logic::roll_chance;
use crate::core::config::DropRules;
use crate::monsters::types::Monster;

/// Player-side conditions that scale drop rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DropModifiers {
    /// Wealth effect active.
    pub wealth: bool,
    /// Killing the monster as part of an active task.
    pub on_task: bool,
    /// Number of elite-tier achievements held.
    pub elite_achievements: u32,
    /// Number of master-tier achievements held.
    pub master_achievements: u32,
}

/// Rolls drop tables under a fixed set of [`DropRules`].
#[derive(Debug, Clone, Default)]
pub struct DropTableEngine {
    rules: DropRules,
}

impl DropTableEngine {
    pub fn new(rules: DropRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DropRules {
        &self.rules
    }

    /// Product of the independent wealth, task and achievement bonuses.
    pub fn aggregate_modifier(&self, modifiers: &DropModifiers) -> f64 {
        let wealth = if modifiers.wealth {
            1.0 + self.rules.wealth_bonus
        } else {
            1.0
        };
        let task = if modifiers.on_task {
            1.0 + self.rules.task_bonus
        } else {
            1.0
        };
        let achievements = 1.0
            + self.rules.elite_achievement_bonus * modifiers.elite_achievements as f64
            + self.rules.master_achievement_bonus * modifiers.master_achievements as f64;
        wealth * task * achievements
    }

    /// Roll the monster's drop table for one kill.
    pub fn roll_drops(
        &self,
        monster: &Monster,
        modifiers: &DropModifiers,
        rng: &mut impl Rng,
    ) -> Vec<ItemDrop> {
        let drops = self.roll_table(&monster.drop_table, modifiers, rng);
        debug!(monster = %monster.name, count = drops.len(), "drops resolved");
        drops
    }

    /// Resolve a bare table: always entries, then one gated pick per tier.
    pub fn roll_table(
        &self,
        table: &DropTable,
        modifiers: &DropModifiers,
        rng: &mut impl Rng,
    ) -> Vec<ItemDrop> {
        let modifier = self.aggregate_modifier(modifiers);
        let mut drops: Vec<ItemDrop> = table
            .always
            .iter()
            .map(|item| roll_quantity(item, rng))
            .collect();

        for (tier, gate) in DropTier::GATED.into_iter().zip(self.rules.tier_chances) {
            if !roll_chance(gate, rng) {
                continue;
            }
            let Some(item) = pick_weighted(table.tier(tier), rng) else {
                continue;
            };
            let chance = item.rarity * modifier;
            if roll_chance(chance, rng) {
                let drop = roll_quantity(item, rng);
                trace!(%tier, item = %drop.item_id, quantity = drop.quantity, "tier hit");
                drops.push(drop);
            } else {
                trace!(%tier, item = %item.item_id, chance, "rarity check failed");
            }
        }

        drops
    }
}

/// Weighted pick within one tier. Empty and all-zero tiers yield nothing.
fn pick_weighted<'a>(entries: &'a [DropTableItem], rng: &mut impl Rng) -> Option<&'a DropTableItem> {
    let dist = WeightedIndex::new(entries.iter().map(|item| item.weight)).ok()?;
    entries.get(dist.sample(rng))
}

fn roll_quantity(item: &DropTableItem, rng: &mut impl Rng) -> ItemDrop {
    let (low, high) = if item.min <= item.max {
        (item.min, item.max)
    } else {
        (item.max, item.min)
    };
    ItemDrop::new(item.item_id.clone(), rng.gen_range(low..=high))
}
