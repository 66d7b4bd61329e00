//! Monster definitions, catalog loading and scripted mechanics.

pub mod catalog;
pub mod mechanics;
pub mod types;

pub use catalog::MonsterCatalog;
pub use mechanics::{MechanicHit, MonsterMechanicsEngine};
pub use types::*;
