//! Item stacks, drop tables and loot resolution.

pub mod drops;
pub mod types;

pub use drops::*;
pub use types::*;
