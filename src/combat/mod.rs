//! Combat stat types and resolution formulas.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
