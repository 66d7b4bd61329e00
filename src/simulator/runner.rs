//! Simulation runner built on the encounter loop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::config::RulesConfig;
use crate::encounter::{Encounter, EncounterOutcome, PlayerLoadout};
use crate::items::drops::DropTableEngine;
use crate::monsters::types::Monster;

/// Run the full simulation and return a report.
pub fn run_simulation(
    player: &PlayerLoadout,
    monster: &Monster,
    rules: &RulesConfig,
    config: &SimConfig,
) -> SimReport {
    let drops = DropTableEngine::new(rules.drops.clone());
    let mut encounter_rules = rules.encounter.clone();
    encounter_rules.max_ticks = config.max_ticks_per_kill.max(1);

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut stats = RunStats::default();
        for _ in 0..config.kills_per_run {
            let mut fighter = player.clone();
            fighter.stats.restore();

            let mut encounter = Encounter::new(fighter, monster, encounter_rules.clone());
            let summary = encounter.run_to_completion(&drops, &config.modifiers, &mut rng);

            stats.fights += 1;
            stats.total_ticks += summary.ticks + encounter_rules.respawn_delay_ticks as u64;
            stats.attacks += summary.player_attacks as u64;
            stats.hits += summary.player_hits as u64;
            stats.damage_dealt += summary.damage_dealt;
            stats.damage_taken += summary.damage_taken;
            match summary.outcome {
                EncounterOutcome::PlayerWon => stats.kills += 1,
                EncounterOutcome::PlayerDied => stats.deaths += 1,
                EncounterOutcome::TimedOut => stats.timeouts += 1,
            }
            for drop in summary.drops {
                *stats.drops.entry(drop.item_id).or_insert(0) += drop.quantity as u64;
            }
        }

        if config.verbosity >= 2 {
            info!(
                "Run {}/{} - Kills {}, Deaths {}, Timeouts {}, Ticks {}",
                run_idx + 1,
                config.num_runs,
                stats.kills,
                stats.deaths,
                stats.timeouts,
                stats.total_ticks
            );
        }
        all_runs.push(stats);
    }

    let report = SimReport::from_runs(player, monster, all_runs);
    if config.verbosity >= 1 {
        info!(
            monster = %monster.name,
            runs = report.num_runs,
            win_rate = report.win_rate,
            "Simulation complete"
        );
    }
    report
}
