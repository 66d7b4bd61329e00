//! Integration test: skilling actions
//!
//! Loads an action catalog and trains a player through gathering,
//! production and runecrafting actions with a seeded RNG.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rpg_engine::skills::{
    ActionContext, ActionModifiers, PlayerSkillState, Skill, SkillActionCatalog,
    SkillActionEngine,
};
use rpg_engine::EngineError;

const ACTIONS: &str = r#"{
    "actions": [
        {"id": "copper_ore", "skill": "mining", "required_level": 1, "xp": 17.5,
         "rewards": [{"item_id": "copper_ore"}], "duration_ticks": 4},
        {"id": "mithril_ore", "skill": "mining", "required_level": 55, "xp": 80.0,
         "rewards": [{"item_id": "mithril_ore"}], "companion_chance": 0.001, "duration_ticks": 4},
        {"id": "gold_ore", "skill": "mining", "required_level": 40, "xp": 65.0,
         "rewards": [{"item_id": "gold_ore"}], "duration_ticks": 4},
        {"id": "oak_shortbow", "skill": "fletching", "required_level": 20, "xp": 33.0,
         "required_items": ["knife"], "rewards": [{"item_id": "oak_shortbow"}], "duration_ticks": 3},
        {"id": "air_rune", "skill": "runecrafting", "required_level": 1, "xp": 5.0,
         "rewards": [{"item_id": "air_rune"}], "duration_ticks": 2},
        {"id": "law_rune", "skill": "runecrafting", "required_level": 54, "xp": 9.5,
         "required_quests": ["troll_stronghold"], "rewards": [{"item_id": "law_rune"}], "duration_ticks": 2}
    ]
}"#;

fn catalog() -> SkillActionCatalog {
    SkillActionCatalog::from_json_str(ACTIONS).unwrap()
}

#[test]
fn test_mining_chance_at_requirement() {
    let engine = SkillActionEngine::default();
    let chance = engine.success_chance(Skill::Mining, 41, 41, 0).unwrap();
    assert!((chance - 0.06).abs() < 1e-9);
}

#[test]
fn test_catalog_orders_and_picks_best() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 6);
    let ids: Vec<&str> = catalog
        .for_skill(Skill::Mining)
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["copper_ore", "gold_ore", "mithril_ore"]);
    assert_eq!(
        catalog.best_for_level(Skill::Mining, 50).unwrap().id,
        "gold_ore"
    );
    assert!(catalog.best_for_level(Skill::Smithing, 99).is_none());
}

#[test]
fn test_train_mining_from_scratch() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let copper = catalog.get("copper_ore").unwrap();
    let mut state = PlayerSkillState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    let mut ore = 0;
    let mut attempts = 0;
    while state.level(Skill::Mining, engine.curve()) < 10 {
        let outcome = engine
            .perform_action(
                &mut state,
                copper,
                &ActionContext::default(),
                &ActionModifiers::default(),
                &mut rng,
            )
            .unwrap();
        attempts += 1;
        if outcome.success {
            ore += outcome.items.iter().map(|d| d.quantity).sum::<u32>();
        } else {
            assert!(outcome.xp.is_none());
            assert!(outcome.items.is_empty());
        }
    }
    // 1154 xp at 17.5 per ore
    assert_eq!(ore, 66);
    assert!(attempts > ore);
    assert_eq!(state.xp(Skill::Mining), 66.0 * 17.5);
}

#[test]
fn test_level_requirement_leaves_state_untouched() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let mithril = catalog.get("Mithril_Ore").unwrap();
    let mut state = PlayerSkillState::new();
    state.add_xp(Skill::Mining, 1_000.0, engine.curve()).unwrap();
    let before = state.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let result = engine.perform_action(
        &mut state,
        mithril,
        &ActionContext::default(),
        &ActionModifiers::default(),
        &mut rng,
    );
    assert!(matches!(
        result,
        Err(EngineError::RequirementNotMet { required: 55, .. })
    ));
    assert_eq!(state, before);
}

#[test]
fn test_fletching_needs_knife() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let bow = catalog.get("oak_shortbow").unwrap();
    let mut state = PlayerSkillState::new();
    state
        .add_xp(Skill::Fletching, engine.curve().xp_for_level(25).unwrap() as f64, engine.curve())
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let missing = engine.perform_action(
        &mut state,
        bow,
        &ActionContext::default(),
        &ActionModifiers::default(),
        &mut rng,
    );
    assert!(matches!(missing, Err(EngineError::MissingPrerequisite(_))));

    let outcome = engine
        .perform_action(
            &mut state,
            bow,
            &ActionContext::default().with_item("knife"),
            &ActionModifiers::default(),
            &mut rng,
        )
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.items[0].quantity, 1);

    // 12 + (25 - 20) / 4 actions a minute
    let rate = engine.actions_per_minute(Skill::Fletching, 25, 20).unwrap();
    assert!((rate - 13.25).abs() < 1e-9);
    let per_hour = engine.xp_per_hour(bow, 25, &ActionModifiers::default()).unwrap();
    assert!((per_hour - 13.25 * 60.0 * 33.0).abs() < 1e-6);
}

#[test]
fn test_runecrafting_multiples() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let air = catalog.get("air_rune").unwrap();
    let mut state = PlayerSkillState::new();
    state
        .add_xp(Skill::Runecrafting, engine.curve().xp_for_level(22).unwrap() as f64, engine.curve())
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // thresholds 1, 2, 5, 9, 14, 20 crossed at 22
    let outcome = engine
        .perform_action(
            &mut state,
            air,
            &ActionContext::default(),
            &ActionModifiers::default(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(outcome.items[0].quantity, 6);
    assert_eq!(engine.runecraft_multiplier(22, 1).unwrap(), 6);
    // one extra rune per threshold, not a doubling
    assert_eq!(engine.runecraft_multiplier(43, 1).unwrap(), 8);
    assert_eq!(engine.runecraft_multiplier(44, 1).unwrap(), 9);
    assert_eq!(engine.runecraft_multiplier(99, 54).unwrap(), 1);
}

#[test]
fn test_law_runes_need_quest() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let law = catalog.get("law_rune").unwrap();
    let mut state = PlayerSkillState::new();
    state
        .add_xp(Skill::Runecrafting, engine.curve().xp_for_level(60).unwrap() as f64, engine.curve())
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    assert!(matches!(
        engine.perform_action(
            &mut state,
            law,
            &ActionContext::default(),
            &ActionModifiers::default(),
            &mut rng,
        ),
        Err(EngineError::MissingPrerequisite(_))
    ));
    let outcome = engine
        .perform_action(
            &mut state,
            law,
            &ActionContext::default().with_quest("troll_stronghold"),
            &ActionModifiers::default(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(outcome.items[0].quantity, 1);
    assert_eq!(outcome.xp.unwrap().added, 9.5);
}

#[test]
fn test_tool_bonus_raises_xp_rate() {
    let catalog = catalog();
    let engine = SkillActionEngine::default();
    let gold = catalog.get("gold_ore").unwrap();
    let bare = engine.xp_per_hour(gold, 45, &ActionModifiers::default()).unwrap();
    let tooled = engine
        .xp_per_hour(gold, 45, &ActionModifiers::with_tool_bonus(10))
        .unwrap();
    assert!(tooled > bare);
    // (45 + 3 - 40) / 50 success, 1500 attempts an hour
    assert!((bare - 0.16 * 65.0 * 1500.0).abs() < 1e-6);
}

#[test]
fn test_unknown_action_id() {
    let catalog = catalog();
    assert!(matches!(
        catalog.get("rune_essence"),
        Err(EngineError::UnknownCatalogEntry { kind: "action", .. })
    ));
}
