//! Tick-driven fight between one player and one monster.
//!
//! An [`Encounter`] owns all of its mutable state: the player's vitals, the
//! monster's hitpoints, attack timers and a fresh mechanics engine. The
//! monster definition itself is borrowed from the catalog and never touched.
//! Callers advance it with [`Encounter::step`] once per game tick, or let
//! [`Encounter::run_to_completion`] loop until an outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::logic::{attack_interval, process_hit};
use crate::combat::types::{AttackSetup, CombatStats, Combatant, EquipmentBonus, HitResult};
use crate::core::config::EncounterRules;
use crate::core::constants::DEFAULT_ATTACK_INTERVAL_TICKS;
use crate::items::drops::{DropModifiers, DropTableEngine};
use crate::items::types::ItemDrop;
use crate::monsters::mechanics::{MechanicHit, MonsterMechanicsEngine};
use crate::monsters::types::Monster;

/// Everything about the player that matters in a fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLoadout {
    pub stats: CombatStats,
    #[serde(default)]
    pub equipment: EquipmentBonus,
    pub setup: AttackSetup,
    #[serde(default = "default_weapon_interval")]
    pub weapon_interval_ticks: u32,
}

fn default_weapon_interval() -> u32 {
    DEFAULT_ATTACK_INTERVAL_TICKS
}

impl PlayerLoadout {
    pub fn new(stats: CombatStats, equipment: EquipmentBonus, setup: AttackSetup) -> Self {
        Self {
            stats,
            equipment,
            setup,
            weapon_interval_ticks: DEFAULT_ATTACK_INTERVAL_TICKS,
        }
    }

    /// Ticks between the player's attacks after the style adjustment.
    pub fn attack_interval(&self) -> u32 {
        attack_interval(self.weapon_interval_ticks, &self.setup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    PlayerWon,
    PlayerDied,
    TimedOut,
}

/// Something that happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterEvent {
    PlayerAttack(HitResult),
    MonsterAttack(HitResult),
    Mechanic(MechanicHit),
    Finished(EncounterOutcome),
}

/// Totals for a finished encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterSummary {
    pub outcome: EncounterOutcome,
    pub ticks: u64,
    pub player_attacks: u32,
    pub player_hits: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub mechanic_hits: u32,
    /// Rolled only when the player won.
    pub drops: Vec<ItemDrop>,
}

pub struct Encounter<'m> {
    monster: &'m Monster,
    player: PlayerLoadout,
    monster_stats: CombatStats,
    mechanics: MonsterMechanicsEngine,
    rules: EncounterRules,
    tick: u64,
    player_timer: u32,
    monster_timer: u32,
    outcome: Option<EncounterOutcome>,
    player_attacks: u32,
    player_hits: u32,
    damage_dealt: u64,
    damage_taken: u64,
    mechanic_hits: u32,
}

impl<'m> Encounter<'m> {
    /// Start a fight with a freshly spawned monster. The player keeps
    /// whatever hitpoints the loadout carries.
    pub fn new(player: PlayerLoadout, monster: &'m Monster, rules: EncounterRules) -> Self {
        let mut monster_stats = monster.stats;
        monster_stats.restore();
        // Passive monsters only swing back after their first interval.
        let monster_timer = if monster.aggressive {
            0
        } else {
            attack_interval(monster.attack_interval_ticks, &monster.attack_setup())
        };

        Self {
            monster,
            player,
            monster_stats,
            mechanics: MonsterMechanicsEngine::for_monster(monster),
            rules,
            tick: 0,
            player_timer: 0,
            monster_timer,
            outcome: None,
            player_attacks: 0,
            player_hits: 0,
            damage_dealt: 0,
            damage_taken: 0,
            mechanic_hits: 0,
        }
    }

    pub fn monster(&self) -> &Monster {
        self.monster
    }

    pub fn player(&self) -> &PlayerLoadout {
        &self.player
    }

    /// Hand the player back, with their remaining vitals, once done.
    pub fn into_player(self) -> PlayerLoadout {
        self.player
    }

    pub fn monster_hitpoints(&self) -> u32 {
        self.monster_stats.current_hitpoints()
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Setup for the player's next swing, with the weakness bonus applied.
    fn player_setup(&self) -> AttackSetup {
        let setup = self.player.setup;
        if self.monster.is_weak_to(setup.attack_type) {
            setup.with_other_bonus(setup.other_bonus * self.rules.weakness_multiplier)
        } else {
            setup
        }
    }

    fn finish(&mut self, outcome: EncounterOutcome, events: &mut Vec<EncounterEvent>) {
        debug!(
            monster = %self.monster.name,
            ?outcome,
            ticks = self.tick,
            damage_dealt = self.damage_dealt,
            damage_taken = self.damage_taken,
            "encounter finished"
        );
        self.outcome = Some(outcome);
        events.push(EncounterEvent::Finished(outcome));
    }

    /// Advance one game tick. Does nothing once an outcome is reached.
    pub fn step(&mut self, rng: &mut impl Rng) -> Vec<EncounterEvent> {
        let mut events = Vec::new();
        if self.outcome.is_some() {
            return events;
        }

        // Player swing
        if self.player_timer == 0 {
            let setup = self.player_setup();
            let hit = process_hit(
                &Combatant::new(&self.player.stats, &self.player.equipment),
                &Combatant::new(&self.monster_stats, &self.monster.equipment)
                    .with_style(self.monster.style),
                &setup,
                rng,
            );
            self.player_timer = self.player.attack_interval();
            self.player_attacks += 1;
            if hit.landed {
                self.player_hits += 1;
            }
            self.damage_dealt += hit.damage as u64;
            self.monster_stats.take_damage(hit.damage);
            events.push(EncounterEvent::PlayerAttack(hit));

            if !self.monster_stats.is_alive() {
                self.tick += 1;
                self.finish(EncounterOutcome::PlayerWon, &mut events);
                return events;
            }
        }

        // Monster swing
        if self.monster_timer == 0 {
            let setup = self.monster.attack_setup();
            let hit = process_hit(
                &Combatant::new(&self.monster_stats, &self.monster.equipment),
                &Combatant::new(&self.player.stats, &self.player.equipment)
                    .with_style(self.player.setup.style),
                &setup,
                rng,
            );
            self.monster_timer = attack_interval(self.monster.attack_interval_ticks, &setup);
            self.damage_taken += hit.damage as u64;
            self.player.stats.take_damage(hit.damage);
            events.push(EncounterEvent::MonsterAttack(hit));
        }

        // Special attacks
        for hit in self.mechanics.tick(self.monster_stats.hp_percent(), rng) {
            self.mechanic_hits += 1;
            self.damage_taken += hit.damage as u64;
            self.player.stats.take_damage(hit.damage);
            events.push(EncounterEvent::Mechanic(hit));
        }

        self.player_timer = self.player_timer.saturating_sub(1);
        self.monster_timer = self.monster_timer.saturating_sub(1);
        self.tick += 1;

        if !self.player.stats.is_alive() {
            self.finish(EncounterOutcome::PlayerDied, &mut events);
        } else if self.tick >= self.rules.max_ticks {
            self.finish(EncounterOutcome::TimedOut, &mut events);
        }
        events
    }

    /// Step until an outcome, then roll drops if the player won.
    pub fn run_to_completion(
        &mut self,
        drops: &DropTableEngine,
        modifiers: &DropModifiers,
        rng: &mut impl Rng,
    ) -> EncounterSummary {
        while self.outcome.is_none() {
            self.step(rng);
        }

        // The loop above only exits once an outcome is set.
        let outcome = self.outcome.unwrap_or(EncounterOutcome::TimedOut);
        let drops = if outcome == EncounterOutcome::PlayerWon {
            drops.roll_drops(self.monster, modifiers, rng)
        } else {
            Vec::new()
        };

        EncounterSummary {
            outcome,
            ticks: self.tick,
            player_attacks: self.player_attacks,
            player_hits: self.player_hits,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            mechanic_hits: self.mechanic_hits,
            drops,
        }
    }
}
