use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::core::constants::{
    MAX_LEVEL, MIN_LEVEL, RAPID_INTERVAL_REDUCTION_TICKS, STYLE_BONUS_CONTROLLED,
    STYLE_BONUS_MAJOR,
};
use crate::error::{EngineError, Result};

/// Combat levels and current vitals.
///
/// Every level is within [1, 99] and current hitpoints never exceed the
/// hitpoints level. Fields are private so the invariant holds after
/// construction; deserialization goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CombatStatsBuilder")]
pub struct CombatStats {
    attack: u32,
    strength: u32,
    defence: u32,
    ranged: u32,
    magic: u32,
    prayer: u32,
    hitpoints: u32,
    current_hitpoints: u32,
    prayer_points: u32,
}

/// Builder (and serialized form) for [`CombatStats`].
///
/// Unset levels default to 1, hitpoints to 10. Current hitpoints and prayer
/// points default to full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CombatStatsBuilder {
    attack: Option<u32>,
    strength: Option<u32>,
    defence: Option<u32>,
    ranged: Option<u32>,
    magic: Option<u32>,
    prayer: Option<u32>,
    hitpoints: Option<u32>,
    current_hitpoints: Option<u32>,
    prayer_points: Option<u32>,
}

macro_rules! builder_setters {
    ($($field:ident),*) => {
        $(
            pub fn $field(mut self, value: u32) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl CombatStatsBuilder {
    builder_setters!(
        attack,
        strength,
        defence,
        ranged,
        magic,
        prayer,
        hitpoints,
        current_hitpoints,
        prayer_points
    );

    pub fn build(self) -> Result<CombatStats> {
        let hitpoints = self.hitpoints.unwrap_or(10);
        let prayer = self.prayer.unwrap_or(MIN_LEVEL);
        let stats = CombatStats {
            attack: self.attack.unwrap_or(MIN_LEVEL),
            strength: self.strength.unwrap_or(MIN_LEVEL),
            defence: self.defence.unwrap_or(MIN_LEVEL),
            ranged: self.ranged.unwrap_or(MIN_LEVEL),
            magic: self.magic.unwrap_or(MIN_LEVEL),
            prayer,
            hitpoints,
            current_hitpoints: self.current_hitpoints.unwrap_or(hitpoints),
            prayer_points: self.prayer_points.unwrap_or(prayer),
        };
        stats.validate()?;
        Ok(stats)
    }
}

impl TryFrom<CombatStatsBuilder> for CombatStats {
    type Error = EngineError;

    fn try_from(builder: CombatStatsBuilder) -> Result<Self> {
        builder.build()
    }
}

impl CombatStats {
    pub fn builder() -> CombatStatsBuilder {
        CombatStatsBuilder::default()
    }

    /// Every level at 99, full health.
    pub fn maxed() -> Self {
        Self {
            attack: MAX_LEVEL,
            strength: MAX_LEVEL,
            defence: MAX_LEVEL,
            ranged: MAX_LEVEL,
            magic: MAX_LEVEL,
            prayer: MAX_LEVEL,
            hitpoints: MAX_LEVEL,
            current_hitpoints: MAX_LEVEL,
            prayer_points: MAX_LEVEL,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, level) in [
            ("attack", self.attack),
            ("strength", self.strength),
            ("defence", self.defence),
            ("ranged", self.ranged),
            ("magic", self.magic),
            ("prayer", self.prayer),
            ("hitpoints", self.hitpoints),
        ] {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
                return Err(EngineError::InvalidStats(format!(
                    "{name} level {level} is outside [{MIN_LEVEL}, {MAX_LEVEL}]"
                )));
            }
        }
        if self.current_hitpoints > self.hitpoints {
            return Err(EngineError::InvalidStats(format!(
                "current hitpoints {} exceed maximum {}",
                self.current_hitpoints, self.hitpoints
            )));
        }
        Ok(())
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn defence(&self) -> u32 {
        self.defence
    }

    pub fn ranged(&self) -> u32 {
        self.ranged
    }

    pub fn magic(&self) -> u32 {
        self.magic
    }

    pub fn prayer(&self) -> u32 {
        self.prayer
    }

    /// Hitpoints level, which is also maximum hitpoints.
    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    pub fn current_hitpoints(&self) -> u32 {
        self.current_hitpoints
    }

    pub fn prayer_points(&self) -> u32 {
        self.prayer_points
    }

    pub fn is_alive(&self) -> bool {
        self.current_hitpoints > 0
    }

    /// Current hitpoints as a percentage of maximum (0.0 to 100.0).
    pub fn hp_percent(&self) -> f64 {
        self.current_hitpoints as f64 * 100.0 / self.hitpoints as f64
    }

    /// Apply damage, returning the hitpoints left (minimum 0).
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current_hitpoints = self.current_hitpoints.saturating_sub(amount);
        self.current_hitpoints
    }

    /// Restore hitpoints up to the maximum.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.current_hitpoints = self
            .current_hitpoints
            .saturating_add(amount)
            .min(self.hitpoints);
        self.current_hitpoints
    }

    /// Drain prayer points, returning what is left.
    pub fn drain_prayer(&mut self, amount: u32) -> u32 {
        self.prayer_points = self.prayer_points.saturating_sub(amount);
        self.prayer_points
    }

    /// Full hitpoints and prayer.
    pub fn restore(&mut self) {
        self.current_hitpoints = self.hitpoints;
        self.prayer_points = self.prayer;
    }
}

/// Attack type of a single hit.
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
pub enum AttackType {
    Stab,
    Slash,
    Crush,
    Magic,
    Ranged,
}

impl AttackType {
    pub fn is_melee(&self) -> bool {
        matches!(self, AttackType::Stab | AttackType::Slash | AttackType::Crush)
    }
}

/// Per-attack-type bonus values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeBonuses {
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub ranged: i32,
}

impl TypeBonuses {
    pub fn get(&self, attack_type: AttackType) -> i32 {
        match attack_type {
            AttackType::Stab => self.stab,
            AttackType::Slash => self.slash,
            AttackType::Crush => self.crush,
            AttackType::Magic => self.magic,
            AttackType::Ranged => self.ranged,
        }
    }
}

/// Summed equipment bonuses. Recompute whenever gear changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentBonus {
    pub attack: TypeBonuses,
    pub defence: TypeBonuses,
    pub melee_strength: i32,
    pub ranged_strength: i32,
    /// Fractional magic damage bonus (0.15 = +15%).
    pub magic_damage: f64,
    pub prayer: i32,
}

impl EquipmentBonus {
    pub fn attack_bonus(&self, attack_type: AttackType) -> i32 {
        self.attack.get(attack_type)
    }

    pub fn defence_bonus(&self, attack_type: AttackType) -> i32 {
        self.defence.get(attack_type)
    }

    /// Strength bonus that scales max hit for the given attack type.
    pub fn strength_bonus(&self, attack_type: AttackType) -> i32 {
        if attack_type == AttackType::Ranged {
            self.ranged_strength
        } else {
            self.melee_strength
        }
    }
}

/// Which effective level a combat style boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleStat {
    Attack,
    Strength,
    Defence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleBonus {
    pub stat: StyleStat,
    pub amount: u32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CombatStyle {
    Accurate,
    Aggressive,
    Defensive,
    Controlled,
    Rapid,
    Longrange,
}

impl CombatStyle {
    /// The fixed additive bonus this style grants.
    pub fn bonus(&self) -> StyleBonus {
        let (stat, amount) = match self {
            CombatStyle::Accurate => (StyleStat::Attack, STYLE_BONUS_MAJOR),
            CombatStyle::Aggressive => (StyleStat::Strength, STYLE_BONUS_MAJOR),
            CombatStyle::Defensive => (StyleStat::Defence, STYLE_BONUS_MAJOR),
            CombatStyle::Controlled => (StyleStat::Attack, STYLE_BONUS_CONTROLLED),
            CombatStyle::Rapid => (StyleStat::Attack, 0),
            CombatStyle::Longrange => (StyleStat::Defence, STYLE_BONUS_MAJOR),
        };
        StyleBonus { stat, amount }
    }

    /// Bonus this style adds to `stat`, 0 if it boosts something else.
    pub fn bonus_for(&self, stat: StyleStat) -> u32 {
        let bonus = self.bonus();
        if bonus.stat == stat {
            bonus.amount
        } else {
            0
        }
    }

    /// Ticks removed from the weapon's attack interval.
    pub fn interval_reduction(&self) -> u32 {
        match self {
            CombatStyle::Rapid => RAPID_INTERVAL_REDUCTION_TICKS,
            _ => 0,
        }
    }
}

/// Stats and gear of one side of an exchange.
#[derive(Debug, Clone, Copy)]
pub struct Combatant<'a> {
    pub stats: &'a CombatStats,
    pub equipment: &'a EquipmentBonus,
    /// Style held while being attacked; its defence bonus raises the defence roll.
    pub style: Option<CombatStyle>,
}

impl<'a> Combatant<'a> {
    pub fn new(stats: &'a CombatStats, equipment: &'a EquipmentBonus) -> Self {
        Self {
            stats,
            equipment,
            style: None,
        }
    }

    pub fn with_style(mut self, style: CombatStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// How an attack is made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackSetup {
    pub style: CombatStyle,
    pub attack_type: AttackType,
    /// Multiplier on effective levels from active prayers (1.0 = none).
    #[serde(default = "unit_multiplier")]
    pub prayer_multiplier: f64,
    /// Final max-hit multiplier from other sources (1.0 = none).
    #[serde(default = "unit_multiplier")]
    pub other_bonus: f64,
}

fn unit_multiplier() -> f64 {
    1.0
}

impl AttackSetup {
    pub fn new(style: CombatStyle, attack_type: AttackType) -> Self {
        Self {
            style,
            attack_type,
            prayer_multiplier: 1.0,
            other_bonus: 1.0,
        }
    }

    pub fn with_prayer(mut self, multiplier: f64) -> Self {
        self.prayer_multiplier = multiplier;
        self
    }

    pub fn with_other_bonus(mut self, bonus: f64) -> Self {
        self.other_bonus = bonus;
        self
    }
}

/// Outcome of a single resolved attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub landed: bool,
    pub damage: u32,
    pub accuracy: f64,
    pub max_hit: u32,
}
