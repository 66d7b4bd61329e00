//! Skill action catalog loading.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::info;

use super::curve::{validate_level, validate_xp};
use super::types::{Skill, SkillAction, SkillKind};
use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    actions: Vec<SkillAction>,
}

fn validate_action(action: &SkillAction) -> Result<()> {
    if action.skill.kind() == SkillKind::Combat {
        return Err(EngineError::InvalidConfig(format!(
            "action '{}' trains combat skill {}",
            action.id, action.skill
        )));
    }
    validate_level(action.required_level)?;
    validate_xp(action.xp)?;
    if !(0.0..=1.0).contains(&action.companion_chance) {
        return Err(EngineError::InvalidConfig(format!(
            "action '{}' has companion chance {} outside [0, 1]",
            action.id, action.companion_chance
        )));
    }
    if let Some(reward) = action.rewards.iter().find(|r| r.min > r.max) {
        return Err(EngineError::InvalidConfig(format!(
            "action '{}' reward '{}' has inverted quantity range {}..{}",
            action.id, reward.item_id, reward.min, reward.max
        )));
    }
    Ok(())
}

/// Read-only skill actions keyed by lower-cased id.
#[derive(Debug, Clone, Default)]
pub struct SkillActionCatalog {
    actions: BTreeMap<String, SkillAction>,
}

impl SkillActionCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut actions = BTreeMap::new();
        for action in file.actions {
            validate_action(&action)?;
            let key = action.id.to_lowercase();
            if actions.contains_key(&key) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate action '{}'",
                    action.id
                )));
            }
            actions.insert(key, action);
        }
        info!(count = actions.len(), "Loaded skill action catalog");
        Ok(Self { actions })
    }

    pub fn get(&self, id: &str) -> Result<&SkillAction> {
        self.actions
            .get(&id.trim().to_lowercase())
            .ok_or_else(|| EngineError::unknown("action", id))
    }

    /// Actions of one skill, lowest requirement first.
    pub fn for_skill(&self, skill: Skill) -> Vec<&SkillAction> {
        let mut actions: Vec<&SkillAction> =
            self.actions.values().filter(|a| a.skill == skill).collect();
        actions.sort_by_key(|a| a.required_level);
        actions
    }

    /// Highest-requirement action of `skill` available at `level`.
    pub fn best_for_level(&self, skill: Skill, level: u32) -> Option<&SkillAction> {
        self.for_skill(skill)
            .into_iter()
            .rev()
            .find(|a| a.required_level <= level)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCKS: &str = r#"{
        "actions": [
            {"id": "Copper_ore", "skill": "mining", "required_level": 1, "xp": 17.5,
             "rewards": [{"item_id": "copper_ore"}], "duration_ticks": 4},
            {"id": "iron_ore", "skill": "mining", "required_level": 15, "xp": 35.0,
             "rewards": [{"item_id": "iron_ore"}], "companion_chance": 0.0001,
             "duration_ticks": 4},
            {"id": "oak_logs", "skill": "woodcutting", "required_level": 15, "xp": 37.5,
             "duration_ticks": 4}
        ]
    }"#;

    #[test]
    fn test_loads_and_indexes() {
        let catalog = SkillActionCatalog::from_json_str(ROCKS).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("copper_ore").unwrap().xp, 17.5);
        assert_eq!(catalog.get("IRON_ORE").unwrap().required_level, 15);
        assert!(matches!(
            catalog.get("gold_ore"),
            Err(EngineError::UnknownCatalogEntry { kind: "action", .. })
        ));
    }

    #[test]
    fn test_for_skill_and_best_for_level() {
        let catalog = SkillActionCatalog::from_json_str(ROCKS).unwrap();
        let mining: Vec<&str> = catalog
            .for_skill(Skill::Mining)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(mining, vec!["Copper_ore", "iron_ore"]);
        assert_eq!(catalog.best_for_level(Skill::Mining, 20).unwrap().id, "iron_ore");
        assert_eq!(catalog.best_for_level(Skill::Mining, 14).unwrap().id, "Copper_ore");
        assert!(catalog.best_for_level(Skill::Woodcutting, 10).is_none());
    }

    #[test]
    fn test_rejects_bad_requirement() {
        let json = r#"{"actions": [
            {"id": "x", "skill": "mining", "required_level": 120, "xp": 1.0, "duration_ticks": 4}
        ]}"#;
        assert!(matches!(
            SkillActionCatalog::from_json_str(json),
            Err(EngineError::InvalidLevel { level: 120 })
        ));
    }

    #[test]
    fn test_rejects_combat_skill_action() {
        let json = r#"{"actions": [
            {"id": "spar", "skill": "attack", "required_level": 1, "xp": 4.0, "duration_ticks": 4}
        ]}"#;
        assert!(matches!(
            SkillActionCatalog::from_json_str(json),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_skill_name() {
        let json = r#"{"actions": [
            {"id": "boat", "skill": "sailing", "required_level": 1, "xp": 4.0, "duration_ticks": 4}
        ]}"#;
        assert!(matches!(
            SkillActionCatalog::from_json_str(json),
            Err(EngineError::CatalogParse(_))
        ));
    }
}
