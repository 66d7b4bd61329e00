//! Combat formulas.
//!
//! Pure functions over stat snapshots. Nothing here mutates state; randomness
//! only enters through the `rng` argument of [`process_hit`] and the two roll
//! primitives, which the mechanics engine and encounter loop reuse.

use rand::Rng;

use super::types::{
    AttackSetup, AttackType, CombatStats, CombatStyle, Combatant, HitResult, StyleStat,
};
use crate::core::constants::{
    COMBAT_LEVEL_BASE_WEIGHT, COMBAT_LEVEL_DENOMINATOR, COMBAT_LEVEL_STYLE_WEIGHT,
    EQUIPMENT_BONUS_OFFSET, INVISIBLE_LEVEL_BOOST, MAX_HIT_DIVISOR, MIN_ATTACK_INTERVAL_TICKS,
    TICK_SECONDS,
};

/// Combat level from the seven combat skills.
///
/// `(defence + hitpoints + prayer/2) / 4 + 13/40 · max(melee, ranged, magic)`,
/// evaluated exactly over a denominator of 40 and floored once.
pub fn combat_level(stats: &CombatStats) -> u32 {
    let base = (stats.defence() + stats.hitpoints() + stats.prayer() / 2) as u64;
    let melee = (stats.attack() + stats.strength()) as u64;
    let ranged = (stats.ranged() * 3 / 2) as u64;
    let magic = (stats.magic() * 3 / 2) as u64;
    let style = melee.max(ranged).max(magic);

    let scaled = COMBAT_LEVEL_BASE_WEIGHT * base + COMBAT_LEVEL_STYLE_WEIGHT * style;
    (scaled / COMBAT_LEVEL_DENOMINATOR) as u32
}

/// `floor(level · multiplier)`, treating negative or NaN multipliers as 0.
fn scale_level(level: u32, multiplier: f64) -> u32 {
    let multiplier = if multiplier.is_nan() { 0.0 } else { multiplier.max(0.0) };
    (level as f64 * multiplier).floor() as u32
}

/// Equipment bonus shifted by 64, floored at 0.
fn offset_bonus(bonus: i32) -> u64 {
    (bonus + EQUIPMENT_BONUS_OFFSET).max(0) as u64
}

fn accuracy_base_level(stats: &CombatStats, attack_type: AttackType) -> u32 {
    match attack_type {
        AttackType::Magic => stats.magic(),
        AttackType::Ranged => stats.ranged(),
        _ => stats.attack(),
    }
}

fn damage_base_level(stats: &CombatStats, attack_type: AttackType) -> u32 {
    match attack_type {
        AttackType::Magic => stats.magic(),
        AttackType::Ranged => stats.ranged(),
        _ => stats.strength(),
    }
}

/// Effective accuracy level: (base + style) · prayer, floored, + 8.
pub fn effective_attack_level(stats: &CombatStats, setup: &AttackSetup) -> u32 {
    let base = accuracy_base_level(stats, setup.attack_type);
    let styled = base + setup.style.bonus_for(StyleStat::Attack);
    scale_level(styled, setup.prayer_multiplier).saturating_add(INVISIBLE_LEVEL_BOOST)
}

/// Effective strength level: (base + style) · prayer, floored, + 8.
pub fn effective_strength_level(stats: &CombatStats, setup: &AttackSetup) -> u32 {
    let base = damage_base_level(stats, setup.attack_type);
    let styled = base + setup.style.bonus_for(StyleStat::Strength);
    scale_level(styled, setup.prayer_multiplier).saturating_add(INVISIBLE_LEVEL_BOOST)
}

/// Effective defence level of the side being attacked: defence plus the
/// defender's style bonus, + 8.
pub fn effective_defence_level(stats: &CombatStats, style: Option<CombatStyle>) -> u32 {
    let styled = stats.defence() + style.map_or(0, |s| s.bonus_for(StyleStat::Defence));
    styled.saturating_add(INVISIBLE_LEVEL_BOOST)
}

/// Highest damage a single attack can deal.
pub fn max_hit(attacker: &Combatant, setup: &AttackSetup) -> u32 {
    let raw = match setup.attack_type {
        AttackType::Magic => {
            // Magic level stands in for the spell's base damage.
            let styled = attacker.stats.magic() + setup.style.bonus_for(StyleStat::Strength);
            let spell_damage = scale_level(styled, setup.prayer_multiplier) as f64;
            let multiplier = (1.0 + attacker.equipment.magic_damage).max(0.0);
            (spell_damage * multiplier).floor()
        }
        attack_type => {
            let effective = effective_strength_level(attacker.stats, setup) as f64;
            let strength = offset_bonus(attacker.equipment.strength_bonus(attack_type)) as f64;
            (0.5 + effective * strength / MAX_HIT_DIVISOR).floor()
        }
    };

    let other = if setup.other_bonus.is_nan() {
        0.0
    } else {
        setup.other_bonus.max(0.0)
    };
    (raw * other).floor() as u32
}

/// Attacker's roll: effective attack level × (offensive bonus + 64).
pub fn attack_roll(attacker: &Combatant, setup: &AttackSetup) -> u64 {
    let effective = effective_attack_level(attacker.stats, setup) as u64;
    effective * offset_bonus(attacker.equipment.attack_bonus(setup.attack_type))
}

/// Defender's roll: effective defence level × (defensive bonus + 64). The
/// defender's style counts when [`Combatant::style`] is set.
pub fn defence_roll(defender: &Combatant, attack_type: AttackType) -> u64 {
    let effective = effective_defence_level(defender.stats, defender.style) as u64;
    effective * offset_bonus(defender.equipment.defence_bonus(attack_type))
}

/// Hit chance from the two rolls, within [0, 1].
pub fn hit_chance(attack_roll: u64, defence_roll: u64) -> f64 {
    let attack = attack_roll as f64;
    let defence = defence_roll as f64;
    let chance = if attack_roll > defence_roll {
        1.0 - (defence + 2.0) / (2.0 * (attack + 1.0))
    } else {
        attack / (2.0 * (defence + 1.0))
    };
    chance.clamp(0.0, 1.0)
}

/// Probability that an attack lands.
pub fn accuracy(attacker: &Combatant, defender: &Combatant, setup: &AttackSetup) -> f64 {
    hit_chance(
        attack_roll(attacker, setup),
        defence_roll(defender, setup.attack_type),
    )
}

/// Bernoulli trial; `probability` is clamped to [0, 1] first.
pub fn roll_chance(probability: f64, rng: &mut impl Rng) -> bool {
    let probability = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    rng.gen::<f64>() < probability
}

/// Uniform damage in `[min, max]` inclusive. Swapped bounds are reordered.
pub fn roll_damage(min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(low..=high)
}

/// Resolve an attack with a known accuracy and max hit.
pub fn roll_hit(accuracy: f64, max_hit: u32, rng: &mut impl Rng) -> HitResult {
    let landed = roll_chance(accuracy, rng);
    let damage = if landed { roll_damage(0, max_hit, rng) } else { 0 };
    HitResult {
        landed,
        damage,
        accuracy,
        max_hit,
    }
}

/// Resolve one attack: accuracy roll, then uniform damage up to max hit.
pub fn process_hit(
    attacker: &Combatant,
    defender: &Combatant,
    setup: &AttackSetup,
    rng: &mut impl Rng,
) -> HitResult {
    let chance = accuracy(attacker, defender, setup);
    let max = max_hit(attacker, setup);
    roll_hit(chance, max, rng)
}

/// Weapon interval adjusted for the combat style, at least one tick.
pub fn attack_interval(weapon_interval_ticks: u32, setup: &AttackSetup) -> u32 {
    weapon_interval_ticks
        .saturating_sub(setup.style.interval_reduction())
        .max(MIN_ATTACK_INTERVAL_TICKS)
}

/// Expected damage per second.
pub fn dps(
    attacker: &Combatant,
    defender: &Combatant,
    setup: &AttackSetup,
    attack_interval_ticks: u32,
) -> f64 {
    if attack_interval_ticks == 0 {
        return 0.0;
    }
    let chance = accuracy(attacker, defender, setup);
    let average_hit = max_hit(attacker, setup) as f64 / 2.0;
    chance * average_hit / (attack_interval_ticks as f64 * TICK_SECONDS)
}
