//! Integration test: combat formulas
//!
//! Combat level, max hit, accuracy and hit resolution through the public API,
//! including the quantified bounds every attack must respect.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rpg_engine::combat::{
    accuracy, combat_level, dps, max_hit, process_hit, AttackSetup, AttackType, CombatStats,
    CombatStyle, Combatant, EquipmentBonus, TypeBonuses,
};
use rpg_engine::skills::{PlayerSkillState, Skill, SkillCurve};

fn stats(attack: u32, strength: u32, defence: u32, hitpoints: u32) -> CombatStats {
    CombatStats::builder()
        .attack(attack)
        .strength(strength)
        .defence(defence)
        .hitpoints(hitpoints)
        .build()
        .unwrap()
}

fn melee_gear(attack: i32, strength: i32) -> EquipmentBonus {
    EquipmentBonus {
        attack: TypeBonuses {
            stab: attack,
            slash: attack,
            crush: attack,
            ..Default::default()
        },
        melee_strength: strength,
        ..Default::default()
    }
}

// =========================================================================
// Combat level
// =========================================================================

#[test]
fn test_maxed_melee_account_is_126() {
    let maxed = CombatStats::builder()
        .attack(99)
        .strength(99)
        .defence(99)
        .hitpoints(99)
        .ranged(1)
        .magic(1)
        .prayer(99)
        .build()
        .unwrap();
    assert_eq!(combat_level(&maxed), 126);
}

#[test]
fn test_fully_maxed_account_is_126() {
    assert_eq!(combat_level(&CombatStats::maxed()), 126);
}

#[test]
fn test_combat_level_from_skill_state() {
    let curve = SkillCurve::new();
    let mut state = PlayerSkillState::new();
    let level_99 = curve.xp_for_level(99).unwrap() as f64;
    for skill in [
        Skill::Attack,
        Skill::Strength,
        Skill::Defence,
        Skill::Hitpoints,
        Skill::Prayer,
    ] {
        state.add_xp(skill, level_99, &curve).unwrap();
    }
    let stats = state.combat_stats(&curve).unwrap();
    assert_eq!(combat_level(&stats), 126);
}

// =========================================================================
// Max hit and accuracy
// =========================================================================

#[test]
fn test_max_hit_full_melee_gear() {
    let attacker = stats(99, 99, 99, 99);
    let gear = melee_gear(82, 86);
    let setup = AttackSetup::new(CombatStyle::Aggressive, AttackType::Slash);
    assert_eq!(max_hit(&Combatant::new(&attacker, &gear), &setup), 26);
}

#[test]
fn test_ranged_uses_ranged_strength() {
    let attacker = CombatStats::builder().ranged(99).build().unwrap();
    let gear = EquipmentBonus {
        ranged_strength: 60,
        melee_strength: 200,
        ..Default::default()
    };
    let setup = AttackSetup::new(CombatStyle::Accurate, AttackType::Ranged);
    // (99 + 8) * 124 / 640 + 0.5 = 21.23
    assert_eq!(max_hit(&Combatant::new(&attacker, &gear), &setup), 21);
}

#[test]
fn test_higher_defence_lowers_accuracy() {
    let attacker = stats(70, 70, 70, 70);
    let gear = melee_gear(50, 50);
    let bare = EquipmentBonus::default();
    let setup = AttackSetup::new(CombatStyle::Accurate, AttackType::Stab);
    let weak = stats(1, 1, 20, 50);
    let sturdy = stats(1, 1, 80, 50);
    let vs_weak = accuracy(
        &Combatant::new(&attacker, &gear),
        &Combatant::new(&weak, &bare),
        &setup,
    );
    let vs_sturdy = accuracy(
        &Combatant::new(&attacker, &gear),
        &Combatant::new(&sturdy, &bare),
        &setup,
    );
    assert!(vs_weak > vs_sturdy);
}

#[test]
fn test_prayer_raises_accuracy() {
    let attacker = stats(75, 75, 75, 75);
    let defender = stats(60, 60, 60, 60);
    let gear = melee_gear(40, 40);
    let base = AttackSetup::new(CombatStyle::Accurate, AttackType::Crush);
    let prayed = base.with_prayer(1.2);
    let a = Combatant::new(&attacker, &gear);
    let d = Combatant::new(&defender, &gear);
    assert!(accuracy(&a, &d, &prayed) > accuracy(&a, &d, &base));
}

// =========================================================================
// Hit resolution
// =========================================================================

#[test]
fn test_average_damage_tracks_dps() {
    let attacker = stats(80, 80, 80, 80);
    let defender = stats(50, 50, 50, 50);
    let gear = melee_gear(60, 60);
    let setup = AttackSetup::new(CombatStyle::Aggressive, AttackType::Slash);
    let a = Combatant::new(&attacker, &gear);
    let d = Combatant::new(&defender, &gear);

    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let swings = 20_000;
    let total: u64 = (0..swings)
        .map(|_| process_hit(&a, &d, &setup, &mut rng).damage as u64)
        .sum();
    let observed_per_swing = total as f64 / swings as f64;
    // dps * interval seconds = expected damage per swing
    let expected_per_swing = dps(&a, &d, &setup, 4) * 4.0 * 0.6;
    let tolerance = expected_per_swing * 0.05;
    assert!(
        (observed_per_swing - expected_per_swing).abs() < tolerance,
        "observed {observed_per_swing}, expected {expected_per_swing}"
    );
}

#[test]
fn test_same_seed_same_hits() {
    let attacker = stats(60, 60, 60, 60);
    let gear = melee_gear(30, 30);
    let setup = AttackSetup::new(CombatStyle::Controlled, AttackType::Stab);
    let a = Combatant::new(&attacker, &gear);
    let run = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..100)
            .map(|_| process_hit(&a, &a, &setup, &mut rng).damage)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

fn any_style() -> impl Strategy<Value = CombatStyle> {
    prop_oneof![
        Just(CombatStyle::Accurate),
        Just(CombatStyle::Aggressive),
        Just(CombatStyle::Defensive),
        Just(CombatStyle::Controlled),
        Just(CombatStyle::Rapid),
        Just(CombatStyle::Longrange),
    ]
}

fn any_attack_type() -> impl Strategy<Value = AttackType> {
    prop_oneof![
        Just(AttackType::Stab),
        Just(AttackType::Slash),
        Just(AttackType::Crush),
        Just(AttackType::Magic),
        Just(AttackType::Ranged),
    ]
}

proptest! {
    #[test]
    fn prop_accuracy_within_unit_interval(
        attack in 1u32..=99,
        defence in 1u32..=99,
        offence_bonus in 0i32..300,
        defence_bonus in 0i32..300,
        prayer in 1.0f64..1.5,
        style in any_style(),
        attack_type in any_attack_type(),
    ) {
        let attacker = CombatStats::builder()
            .attack(attack)
            .ranged(attack)
            .magic(attack)
            .build()
            .unwrap();
        let defender = CombatStats::builder().defence(defence).build().unwrap();
        let offence = EquipmentBonus {
            attack: TypeBonuses {
                stab: offence_bonus,
                slash: offence_bonus,
                crush: offence_bonus,
                magic: offence_bonus,
                ranged: offence_bonus,
            },
            ..Default::default()
        };
        let armour = EquipmentBonus {
            defence: TypeBonuses {
                stab: defence_bonus,
                slash: defence_bonus,
                crush: defence_bonus,
                magic: defence_bonus,
                ranged: defence_bonus,
            },
            ..Default::default()
        };
        let setup = AttackSetup::new(style, attack_type).with_prayer(prayer);
        let chance = accuracy(
            &Combatant::new(&attacker, &offence),
            &Combatant::new(&defender, &armour),
            &setup,
        );
        prop_assert!((0.0..=1.0).contains(&chance));
    }

    #[test]
    fn prop_max_hit_monotone_in_strength_level(
        strength in 1u32..99,
        bonus in 0i32..200,
        style in any_style(),
    ) {
        let gear = melee_gear(0, bonus);
        let setup = AttackSetup::new(style, AttackType::Crush);
        let low = CombatStats::builder().strength(strength).build().unwrap();
        let high = CombatStats::builder().strength(strength + 1).build().unwrap();
        prop_assert!(
            max_hit(&Combatant::new(&low, &gear), &setup)
                <= max_hit(&Combatant::new(&high, &gear), &setup)
        );
    }

    #[test]
    fn prop_max_hit_monotone_in_strength_bonus(
        strength in 1u32..=99,
        bonus in -100i32..200,
    ) {
        let attacker = CombatStats::builder().strength(strength).build().unwrap();
        let setup = AttackSetup::new(CombatStyle::Aggressive, AttackType::Slash);
        let low = melee_gear(0, bonus);
        let high = melee_gear(0, bonus + 1);
        prop_assert!(
            max_hit(&Combatant::new(&attacker, &low), &setup)
                <= max_hit(&Combatant::new(&attacker, &high), &setup)
        );
    }

    #[test]
    fn prop_damage_never_exceeds_max_hit(seed in any::<u64>(), strength in 1u32..=99) {
        let attacker = CombatStats::builder().attack(99).strength(strength).build().unwrap();
        let defender = CombatStats::builder().build().unwrap();
        let gear = melee_gear(100, 100);
        let setup = AttackSetup::new(CombatStyle::Aggressive, AttackType::Stab);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let a = Combatant::new(&attacker, &gear);
        let d = Combatant::new(&defender, &gear);
        for _ in 0..20 {
            let hit = process_hit(&a, &d, &setup, &mut rng);
            prop_assert!(hit.damage <= hit.max_hit);
        }
    }
}
