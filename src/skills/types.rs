use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::curve::{validate_xp, SkillCurve};
use crate::combat::types::CombatStats;
use crate::core::constants::{MAX_SKILL_XP, MIN_LEVEL};
use crate::error::{EngineError, Result};
use crate::items::types::ItemDrop;

/// Every trainable skill.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Skill {
    Attack,
    Strength,
    Defence,
    Ranged,
    Magic,
    Prayer,
    Hitpoints,
    Mining,
    Woodcutting,
    Fishing,
    Thieving,
    Agility,
    Cooking,
    Herblore,
    Crafting,
    Fletching,
    Smithing,
    Runecrafting,
}

/// How a skill's actions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    /// Trained through combat; no standalone actions.
    Combat,
    /// Each action succeeds with a level-dependent probability.
    Gathering,
    /// Actions always succeed; level raises throughput.
    Production,
    /// Actions always succeed; level raises output multiples.
    Runecrafting,
}

impl Skill {
    /// Parse a host-supplied identifier ("mining", "Mining", ...).
    pub fn parse(id: &str) -> Result<Skill> {
        Skill::from_str(id.trim()).map_err(|_| EngineError::unknown("skill", id))
    }

    pub fn kind(&self) -> SkillKind {
        match self {
            Skill::Attack
            | Skill::Strength
            | Skill::Defence
            | Skill::Ranged
            | Skill::Magic
            | Skill::Prayer
            | Skill::Hitpoints => SkillKind::Combat,
            Skill::Mining
            | Skill::Woodcutting
            | Skill::Fishing
            | Skill::Thieving
            | Skill::Agility
            | Skill::Cooking
            | Skill::Herblore => SkillKind::Gathering,
            Skill::Crafting | Skill::Fletching | Skill::Smithing => SkillKind::Production,
            Skill::Runecrafting => SkillKind::Runecrafting,
        }
    }
}

/// Result of adding experience to one skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpGain {
    pub skill: Skill,
    /// Experience actually added (less than requested at the cap).
    pub added: f64,
    pub old_level: u32,
    pub new_level: u32,
}

impl XpGain {
    pub fn levelled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Per-player experience in every skill.
///
/// Levels are always derived from experience through a [`SkillCurve`];
/// experience only ever grows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerSkillState {
    experience: BTreeMap<Skill, f64>,
}

impl PlayerSkillState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from persisted experience values.
    pub fn from_experience(experience: BTreeMap<Skill, f64>) -> Result<Self> {
        for xp in experience.values() {
            validate_xp(*xp)?;
        }
        let experience = experience
            .into_iter()
            .map(|(skill, xp)| (skill, xp.min(MAX_SKILL_XP)))
            .collect();
        Ok(Self { experience })
    }

    pub fn xp(&self, skill: Skill) -> f64 {
        self.experience.get(&skill).copied().unwrap_or(0.0)
    }

    pub fn level(&self, skill: Skill, curve: &SkillCurve) -> u32 {
        // Stored experience is always finite and non-negative.
        curve.level_for_xp(self.xp(skill)).unwrap_or(MIN_LEVEL)
    }

    /// Add experience, capped at 200M. Negative or non-finite amounts are
    /// rejected without touching the state.
    pub fn add_xp(&mut self, skill: Skill, amount: f64, curve: &SkillCurve) -> Result<XpGain> {
        validate_xp(amount)?;

        let old_xp = self.xp(skill);
        let old_level = self.level(skill, curve);
        let new_xp = (old_xp + amount).min(MAX_SKILL_XP);
        self.experience.insert(skill, new_xp);
        let new_level = self.level(skill, curve);

        if new_level > old_level {
            tracing::debug!(%skill, old_level, new_level, "level up");
        }

        Ok(XpGain {
            skill,
            added: new_xp - old_xp,
            old_level,
            new_level,
        })
    }

    /// Sum of all skill levels.
    pub fn total_level(&self, curve: &SkillCurve) -> u32 {
        Skill::iter().map(|skill| self.level(skill, curve)).sum()
    }

    /// Combat stat block derived from the combat skills, at full health.
    pub fn combat_stats(&self, curve: &SkillCurve) -> Result<CombatStats> {
        let hitpoints = self.level(Skill::Hitpoints, curve);
        CombatStats::builder()
            .attack(self.level(Skill::Attack, curve))
            .strength(self.level(Skill::Strength, curve))
            .defence(self.level(Skill::Defence, curve))
            .ranged(self.level(Skill::Ranged, curve))
            .magic(self.level(Skill::Magic, curve))
            .prayer(self.level(Skill::Prayer, curve))
            .hitpoints(hitpoints)
            .build()
    }
}

/// Item granted by a successful action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReward {
    pub item_id: String,
    #[serde(default = "one")]
    pub min: u32,
    #[serde(default = "one")]
    pub max: u32,
}

fn one() -> u32 {
    1
}

/// A trainable action (mine a rock, cut a tree, fletch a bow, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAction {
    pub id: String,
    pub skill: Skill,
    pub required_level: u32,
    #[serde(default)]
    pub required_items: Vec<String>,
    #[serde(default)]
    pub required_quests: Vec<String>,
    pub xp: f64,
    #[serde(default)]
    pub rewards: Vec<ItemReward>,
    /// Chance per successful action of the rare companion drop.
    #[serde(default)]
    pub companion_chance: f64,
    pub duration_ticks: u32,
}

/// Equipment-derived bonuses for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionModifiers {
    /// Tool or glove bonus added to the player's level.
    pub tool_bonus: u32,
    /// Heat protection (cooking gauntlets) equipped.
    pub heat_protection: bool,
}

impl ActionModifiers {
    pub fn with_tool_bonus(tool_bonus: u32) -> Self {
        Self {
            tool_bonus,
            ..Default::default()
        }
    }
}

/// What the player holds when attempting an action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionContext {
    pub owned_items: BTreeSet<String>,
    pub completed_quests: BTreeSet<String>,
}

impl ActionContext {
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.owned_items.insert(item.into());
        self
    }

    pub fn with_quest(mut self, quest: impl Into<String>) -> Self {
        self.completed_quests.insert(quest.into());
        self
    }
}

/// Outcome of one attempted action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub action_id: String,
    pub success: bool,
    pub xp: Option<XpGain>,
    pub items: Vec<ItemDrop>,
    pub companion: bool,
}
