//! Skill progression: experience curve, player state, action catalog and
//! skilling formulas.

pub mod catalog;
pub mod curve;
pub mod logic;
pub mod types;

pub use catalog::SkillActionCatalog;
pub use curve::SkillCurve;
pub use logic::SkillActionEngine;
pub use types::*;
