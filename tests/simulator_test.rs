//! Integration test: simulator
//!
//! Runs seeded batch simulations and checks the aggregated report against
//! what the fights and formulas imply.

use rpg_engine::combat::{AttackSetup, AttackType, CombatStats, CombatStyle, EquipmentBonus};
use rpg_engine::core::RulesConfig;
use rpg_engine::encounter::PlayerLoadout;
use rpg_engine::monsters::MonsterCatalog;
use rpg_engine::simulator::{run_simulation, SimConfig};

const CATALOG: &str = r#"{
    "monsters": [
        {
            "name": "Chicken",
            "stats": {"hitpoints": 3},
            "attack_type": "stab",
            "drop_table": {
                "always": [{"item_id": "bones"}, {"item_id": "feather", "min": 5, "max": 15}]
            }
        },
        {
            "name": "Greater demon",
            "stats": {"attack": 76, "strength": 78, "defence": 81, "hitpoints": 87},
            "attack_type": "stab",
            "aggressive": true,
            "weaknesses": ["slash"]
        }
    ]
}"#;

fn player() -> PlayerLoadout {
    let mut equipment = EquipmentBonus::default();
    equipment.attack.slash = 82;
    equipment.melee_strength = 72;
    PlayerLoadout::new(
        CombatStats::maxed(),
        equipment,
        AttackSetup::new(CombatStyle::Aggressive, AttackType::Slash),
    )
}

#[test]
fn test_chicken_farm_report() {
    let catalog = MonsterCatalog::from_json_str(CATALOG).unwrap();
    let chicken = catalog.get("chicken").unwrap();
    let report = run_simulation(&player(), chicken, &RulesConfig::default(), &SimConfig::quick(12345));

    assert_eq!(report.num_runs, 10);
    assert_eq!(report.total_fights, 200);
    assert_eq!(report.total_kills, 200);
    assert_eq!(report.win_rate, 1.0);
    assert_eq!(report.avg_kills_per_run, 20.0);

    let bones = report.drops.iter().find(|d| d.item_id == "bones").unwrap();
    assert_eq!(bones.total_quantity, 200);
    assert_eq!(bones.per_kill, 1.0);
    let feathers = report.drops.iter().find(|d| d.item_id == "feather").unwrap();
    assert!(feathers.per_kill >= 5.0 && feathers.per_kill <= 15.0);

    let text = report.to_text();
    assert!(text.contains("Chicken"));
    assert!(text.contains("SAFE"));
}

#[test]
fn test_demon_report_tracks_formulas() {
    let catalog = MonsterCatalog::from_json_str(CATALOG).unwrap();
    let demon = catalog.get("greater demon").unwrap();
    let config = SimConfig {
        num_runs: 4,
        seed: Some(42),
        kills_per_run: 50,
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&player(), demon, &RulesConfig::default(), &config);

    assert_eq!(report.total_fights, 200);
    assert_eq!(report.run_stats.len(), 4);
    assert!(report.total_kills > 0);
    assert!((report.hit_rate - report.expected_accuracy).abs() < 0.05);
    assert!(report.observed_dps > 0.0);
    assert!(report.avg_damage_taken_per_fight > 0.0);
}

#[test]
fn test_seeded_runs_reproduce() {
    let catalog = MonsterCatalog::from_json_str(CATALOG).unwrap();
    let demon = catalog.get("greater demon").unwrap();
    let rules = RulesConfig::default();
    let first = run_simulation(&player(), demon, &rules, &SimConfig::quick(7));
    let second = run_simulation(&player(), demon, &rules, &SimConfig::quick(7));
    assert_eq!(first.to_json(), second.to_json());
    assert_eq!(first.run_stats, second.run_stats);
}
