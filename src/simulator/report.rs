//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::combat::logic::{accuracy, dps, max_hit};
use crate::combat::types::Combatant;
use crate::core::constants::TICK_SECONDS;
use crate::encounter::PlayerLoadout;
use crate::monsters::types::Monster;

/// Totals from one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub fights: u64,
    pub kills: u64,
    pub deaths: u64,
    pub timeouts: u64,
    /// Fight ticks plus respawn delays.
    pub total_ticks: u64,
    pub attacks: u64,
    pub hits: u64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub drops: BTreeMap<String, u64>,
}

/// Loot totals for one item across all runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropSummary {
    pub item_id: String,
    pub total_quantity: u64,
    pub per_kill: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub monster: String,
    pub num_runs: u32,
    pub total_fights: u64,
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_timeouts: u64,

    // Aggregated stats
    pub win_rate: f64,
    pub avg_kills_per_run: f64,
    pub avg_deaths_per_run: f64,
    pub avg_ticks_per_fight: f64,
    pub kills_per_hour: f64,
    pub hit_rate: f64,
    pub avg_damage_taken_per_fight: f64,

    // Player versus monster, from the formulas
    pub max_hit: u32,
    pub expected_accuracy: f64,
    pub expected_dps: f64,
    pub observed_dps: f64,

    // Loot analysis
    pub drops: Vec<DropSummary>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(player: &PlayerLoadout, monster: &Monster, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let total = |f: fn(&RunStats) -> u64| runs.iter().map(f).sum::<u64>();

        let total_fights = total(|r| r.fights);
        let total_kills = total(|r| r.kills);
        let total_deaths = total(|r| r.deaths);
        let total_timeouts = total(|r| r.timeouts);
        let total_ticks = total(|r| r.total_ticks);
        let total_attacks = total(|r| r.attacks);
        let total_hits = total(|r| r.hits);
        let total_dealt = total(|r| r.damage_dealt);
        let total_taken = total(|r| r.damage_taken);

        let hours = total_ticks as f64 * TICK_SECONDS / 3600.0;
        let seconds = total_ticks as f64 * TICK_SECONDS;

        let setup = player.setup;
        let fighter = Combatant::new(&player.stats, &player.equipment);
        let target = monster.combatant();

        // Loot totals
        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for run in &runs {
            for (item, quantity) in &run.drops {
                *totals.entry(item.clone()).or_insert(0) += quantity;
            }
        }
        let drops = totals
            .into_iter()
            .map(|(item_id, total_quantity)| DropSummary {
                per_kill: ratio(total_quantity as f64, total_kills as f64),
                item_id,
                total_quantity,
            })
            .collect();

        Self {
            monster: monster.name.clone(),
            num_runs,
            total_fights,
            total_kills,
            total_deaths,
            total_timeouts,
            win_rate: ratio(total_kills as f64, total_fights as f64),
            avg_kills_per_run: ratio(total_kills as f64, num_runs as f64),
            avg_deaths_per_run: ratio(total_deaths as f64, num_runs as f64),
            avg_ticks_per_fight: ratio(total_ticks as f64, total_fights as f64),
            kills_per_hour: ratio(total_kills as f64, hours),
            hit_rate: ratio(total_hits as f64, total_attacks as f64),
            avg_damage_taken_per_fight: ratio(total_taken as f64, total_fights as f64),
            max_hit: max_hit(&fighter, &setup),
            expected_accuracy: accuracy(&fighter, &target, &setup),
            expected_dps: dps(&fighter, &target, &setup, player.attack_interval()),
            observed_dps: ratio(total_dealt as f64, seconds),
            drops,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                 vs. {}\n", self.monster));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} fights, {} kills, {} deaths, {} timed out\n\n",
            self.num_runs, self.total_fights, self.total_kills, self.total_deaths, self.total_timeouts
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Kills / Hour:        {:.1}\n", self.kills_per_hour));
        report.push_str(&format!("  Avg Ticks / Fight:   {:.1}\n", self.avg_ticks_per_fight));
        report.push_str(&format!("  Max Hit:             {}\n", self.max_hit));
        report.push_str(&format!(
            "  Accuracy:            {:.1}% expected, {:.1}% observed\n",
            self.expected_accuracy * 100.0,
            self.hit_rate * 100.0
        ));
        report.push_str(&format!(
            "  DPS:                 {:.2} expected, {:.2} observed\n",
            self.expected_dps, self.observed_dps
        ));
        report.push_str(&format!(
            "  Avg Damage Taken:    {:.1} per fight\n\n",
            self.avg_damage_taken_per_fight
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        if self.drops.is_empty() {
            report.push_str("  (no drops)\n");
        }
        for drop in &self.drops {
            report.push_str(&format!(
                "  {:<24} {:>10}   {:.3} / kill\n",
                drop.item_id, drop.total_quantity, drop.per_kill
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let death_rate = ratio(self.total_deaths as f64, self.total_fights as f64);
        let rating = if death_rate == 0.0 {
            "SAFE - Player never dies"
        } else if death_rate < 0.05 {
            "GOOD - Occasional deaths"
        } else if death_rate < 0.25 {
            "RISKY - Frequent deaths"
        } else {
            "TOO HARD - Player dies in most fights"
        };
        report.push_str(&format!("  Death Rate:   {:.1}%\n", death_rate * 100.0));
        report.push_str(&format!("  Rating:       {}\n", rating));
        if self.total_timeouts > 0 {
            report.push_str("  ⚠️  Some fights timed out - player cannot damage this monster?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
