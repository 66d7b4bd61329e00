//! RPG Engine - simulation core for a chat-driven RPG
//!
//! Combat resolution, skill progression, loot tables and scripted monster
//! mechanics, exposed for the chat command layer and for testing. The engine
//! does no I/O beyond reading an optional rules file: catalogs arrive as text,
//! state is owned by the caller, and every random decision draws from an RNG
//! passed in explicitly.

pub mod combat;
pub mod core;
pub mod encounter;
pub mod error;
pub mod items;
pub mod monsters;
pub mod simulator;
pub mod skills;

pub use error::{EngineError, Result};
