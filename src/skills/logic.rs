//! Skilling formulas and action resolution.

use rand::Rng;

use super::curve::{validate_level, SkillCurve};
use super::types::{
    ActionContext, ActionModifiers, ActionOutcome, PlayerSkillState, Skill, SkillAction,
    SkillKind,
};
use crate::combat::logic::roll_chance;
use crate::core::constants::{
    AGILITY_FORMULA, AGILITY_MAX_CHANCE, AGILITY_MIN_CHANCE, COOKING_FORMULA,
    COOKING_HEAT_PROTECTION_BONUS, CRAFTING_RATE, FISHING_FORMULA, FLETCHING_RATE,
    GATHERING_MAX_CHANCE, GATHERING_MIN_CHANCE, HERBLORE_FORMULA, HERBLORE_MAX_CHANCE,
    HERBLORE_MIN_CHANCE, MINING_FORMULA, RUNECRAFT_MULTIPLE_THRESHOLDS,
    RUNECRAFT_NO_MULTIPLE_LEVEL, SMITHING_RATE, THIEVING_FORMULA, TICK_SECONDS,
    WOODCUTTING_FORMULA,
};
use crate::error::{EngineError, Result};
use crate::items::types::ItemDrop;

/// `(effective + offset - required) / divisor`, clamped to `[min, max]`.
fn linear_chance(
    effective: u32,
    required: u32,
    (offset, divisor): (i32, f64),
    (min, max): (f64, f64),
) -> f64 {
    let margin = effective as i64 + offset as i64 - required as i64;
    (margin as f64 / divisor).clamp(min, max)
}

fn requirement_not_met(skill: Skill, required: u32, level: u32) -> EngineError {
    EngineError::RequirementNotMet {
        skill: skill.to_string(),
        required,
        level,
    }
}

/// Resolves skilling actions against a shared [`SkillCurve`].
#[derive(Debug, Clone, Default)]
pub struct SkillActionEngine {
    curve: SkillCurve,
}

impl SkillActionEngine {
    pub fn new(curve: SkillCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &SkillCurve {
        &self.curve
    }

    /// Success chance of a gathering action with a tool or glove bonus.
    pub fn success_chance(
        &self,
        skill: Skill,
        level: u32,
        required: u32,
        tool_bonus: u32,
    ) -> Result<f64> {
        self.success_chance_with(skill, level, required, &ActionModifiers::with_tool_bonus(tool_bonus))
    }

    /// Success chance with the full set of equipment modifiers.
    pub fn success_chance_with(
        &self,
        skill: Skill,
        level: u32,
        required: u32,
        modifiers: &ActionModifiers,
    ) -> Result<f64> {
        validate_level(level)?;
        validate_level(required)?;

        let effective = level + modifiers.tool_bonus;
        let standard = (GATHERING_MIN_CHANCE, GATHERING_MAX_CHANCE);

        let chance = match skill {
            Skill::Mining => linear_chance(effective, required, MINING_FORMULA, standard),
            Skill::Woodcutting => linear_chance(effective, required, WOODCUTTING_FORMULA, standard),
            Skill::Fishing => linear_chance(effective, required, FISHING_FORMULA, standard),
            Skill::Thieving => linear_chance(effective, required, THIEVING_FORMULA, standard),
            Skill::Agility => linear_chance(
                level,
                required,
                AGILITY_FORMULA,
                (AGILITY_MIN_CHANCE, AGILITY_MAX_CHANCE),
            ),
            Skill::Cooking => {
                let effective = if modifiers.heat_protection {
                    effective + COOKING_HEAT_PROTECTION_BONUS
                } else {
                    effective
                };
                linear_chance(effective, required, COOKING_FORMULA, standard)
            }
            Skill::Herblore => linear_chance(
                level,
                required,
                HERBLORE_FORMULA,
                (HERBLORE_MIN_CHANCE, HERBLORE_MAX_CHANCE),
            ),
            other => return Err(EngineError::unknown("gathering skill", other.to_string())),
        };
        Ok(chance)
    }

    /// Throughput of a production skill.
    pub fn actions_per_minute(&self, skill: Skill, level: u32, required: u32) -> Result<f64> {
        validate_level(level)?;
        validate_level(required)?;

        let (base, divisor) = match skill {
            Skill::Crafting => CRAFTING_RATE,
            Skill::Fletching => FLETCHING_RATE,
            Skill::Smithing => SMITHING_RATE,
            other => return Err(EngineError::unknown("production skill", other.to_string())),
        };
        if level < required {
            return Err(requirement_not_met(skill, required, level));
        }
        Ok(base + (level - required) as f64 / divisor)
    }

    /// Runes produced per essence.
    pub fn runecraft_multiplier(&self, level: u32, rune_required_level: u32) -> Result<u32> {
        validate_level(level)?;
        validate_level(rune_required_level)?;

        if level < rune_required_level {
            return Err(requirement_not_met(Skill::Runecrafting, rune_required_level, level));
        }
        if rune_required_level >= RUNECRAFT_NO_MULTIPLE_LEVEL {
            return Ok(1);
        }
        let crossed = RUNECRAFT_MULTIPLE_THRESHOLDS
            .iter()
            .filter(|&&threshold| threshold <= level)
            .count() as u32;
        Ok(crossed.max(1))
    }

    /// Expected experience per hour of repeating `action` at `level`.
    pub fn xp_per_hour(
        &self,
        action: &SkillAction,
        level: u32,
        modifiers: &ActionModifiers,
    ) -> Result<f64> {
        match action.skill.kind() {
            SkillKind::Gathering => {
                if action.duration_ticks == 0 {
                    return Ok(0.0);
                }
                let chance =
                    self.success_chance_with(action.skill, level, action.required_level, modifiers)?;
                let attempts_per_hour = 3600.0 / (action.duration_ticks as f64 * TICK_SECONDS);
                Ok(chance * action.xp * attempts_per_hour)
            }
            SkillKind::Production => {
                let rate = self.actions_per_minute(action.skill, level, action.required_level)?;
                Ok(rate * 60.0 * action.xp)
            }
            SkillKind::Runecrafting => {
                validate_level(level)?;
                if level < action.required_level {
                    return Err(requirement_not_met(action.skill, action.required_level, level));
                }
                if action.duration_ticks == 0 {
                    return Ok(0.0);
                }
                Ok(action.xp * 3600.0 / (action.duration_ticks as f64 * TICK_SECONDS))
            }
            SkillKind::Combat => Err(EngineError::unknown("skill action", action.id.clone())),
        }
    }

    /// Attempt `action` once for a player.
    ///
    /// Requirements are checked before anything is rolled or awarded; a
    /// rejected attempt leaves `state` untouched.
    pub fn perform_action(
        &self,
        state: &mut PlayerSkillState,
        action: &SkillAction,
        context: &ActionContext,
        modifiers: &ActionModifiers,
        rng: &mut impl Rng,
    ) -> Result<ActionOutcome> {
        let kind = action.skill.kind();
        if kind == SkillKind::Combat {
            return Err(EngineError::unknown("skill action", action.id.clone()));
        }
        validate_level(action.required_level)?;

        let level = state.level(action.skill, &self.curve);
        if level < action.required_level {
            return Err(requirement_not_met(action.skill, action.required_level, level));
        }
        if let Some(item) = action
            .required_items
            .iter()
            .find(|item| !context.owned_items.contains(*item))
        {
            return Err(EngineError::MissingPrerequisite(format!("item '{item}'")));
        }
        if let Some(quest) = action
            .required_quests
            .iter()
            .find(|quest| !context.completed_quests.contains(*quest))
        {
            return Err(EngineError::MissingPrerequisite(format!("quest '{quest}'")));
        }

        let success = match kind {
            SkillKind::Gathering => {
                let chance =
                    self.success_chance_with(action.skill, level, action.required_level, modifiers)?;
                roll_chance(chance, rng)
            }
            _ => true,
        };

        if !success {
            return Ok(ActionOutcome {
                action_id: action.id.clone(),
                success: false,
                xp: None,
                items: Vec::new(),
                companion: false,
            });
        }

        let multiplier = if kind == SkillKind::Runecrafting {
            self.runecraft_multiplier(level, action.required_level)?
        } else {
            1
        };

        let gain = state.add_xp(action.skill, action.xp, &self.curve)?;
        let items = action
            .rewards
            .iter()
            .map(|reward| {
                let (low, high) = (reward.min.min(reward.max), reward.min.max(reward.max));
                ItemDrop::new(reward.item_id.clone(), rng.gen_range(low..=high) * multiplier)
            })
            .collect();
        let companion = roll_chance(action.companion_chance, rng);
        if companion {
            tracing::debug!(action = %action.id, "companion drop");
        }

        Ok(ActionOutcome {
            action_id: action.id.clone(),
            success: true,
            xp: Some(gain),
            items,
            companion,
        })
    }
}
