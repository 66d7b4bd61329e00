//! Experience ↔ level conversion.
//!
//! The threshold for level L is the running sum, over l = 1..L-1, of
//! `floor(l + 300 · 2^(l/7))`, divided by 4 and floored. The table is built
//! once in [`SkillCurve::new`]; every lookup afterwards is a slice search.

use crate::core::constants::{
    MAX_LEVEL, MAX_VIRTUAL_LEVEL, MIN_LEVEL, XP_CURVE_BASE_POINTS, XP_CURVE_DIVISOR,
    XP_CURVE_DOUBLING_LEVELS,
};
use crate::error::{EngineError, Result};

/// Precomputed experience table.
///
/// Owned by the caller and shared by reference; there is no global copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCurve {
    /// `thresholds[level]` for level 1..=MAX_VIRTUAL_LEVEL; index 0 is unused.
    thresholds: Vec<u32>,
}

impl Default for SkillCurve {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillCurve {
    pub fn new() -> Self {
        let mut thresholds = vec![0u32; MAX_VIRTUAL_LEVEL as usize + 1];
        let mut points: u64 = 0;

        for level in 2..=MAX_VIRTUAL_LEVEL {
            let l = (level - 1) as f64;
            points += (l + XP_CURVE_BASE_POINTS * 2f64.powf(l / XP_CURVE_DOUBLING_LEVELS))
                .floor() as u64;
            thresholds[level as usize] = (points / XP_CURVE_DIVISOR) as u32;
        }

        Self { thresholds }
    }

    /// Experience required to reach `level` (1..=99).
    pub fn xp_for_level(&self, level: u32) -> Result<u32> {
        validate_level(level)?;
        Ok(self.thresholds[level as usize])
    }

    /// Highest level (1..=99) whose threshold is at or below `xp`.
    pub fn level_for_xp(&self, xp: f64) -> Result<u32> {
        validate_xp(xp)?;
        Ok(self.search(xp, MAX_LEVEL))
    }

    /// Display-only level that keeps counting past 99, up to 126.
    pub fn virtual_level_for_xp(&self, xp: f64) -> Result<u32> {
        validate_xp(xp)?;
        Ok(self.search(xp, MAX_VIRTUAL_LEVEL))
    }

    /// Experience still needed for the next level; 0 at level 99.
    pub fn xp_to_next_level(&self, xp: f64) -> Result<f64> {
        let level = self.level_for_xp(xp)?;
        if level >= MAX_LEVEL {
            return Ok(0.0);
        }
        Ok(self.thresholds[level as usize + 1] as f64 - xp)
    }

    /// Fraction (0.0 to 1.0) of the way through the current level.
    pub fn level_progress(&self, xp: f64) -> Result<f64> {
        let level = self.level_for_xp(xp)?;
        if level >= MAX_LEVEL {
            return Ok(1.0);
        }
        let current = self.thresholds[level as usize] as f64;
        let next = self.thresholds[level as usize + 1] as f64;
        Ok(((xp - current) / (next - current)).clamp(0.0, 1.0))
    }

    fn search(&self, xp: f64, max_level: u32) -> u32 {
        let table = &self.thresholds[1..=max_level as usize];
        // thresholds[1] == 0, so at least one entry always matches.
        table.partition_point(|&threshold| threshold as f64 <= xp) as u32
    }
}

pub(crate) fn validate_level(level: u32) -> Result<()> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(EngineError::InvalidLevel {
            level: level as i64,
        })
    }
}

pub(crate) fn validate_xp(xp: f64) -> Result<()> {
    if xp.is_finite() && xp >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidExperience { xp })
    }
}
