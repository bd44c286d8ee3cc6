//! Encounter engine - owns all hostile state and advances it one tick at a time.
//!
//! The engine handles:
//! - The active map and its fog of war
//! - Hostile actors, their projectiles and the monster roster
//! - Per-tick orchestration in a fixed, deterministic order
//! - Map transitions
//!
//! The player is owned by the caller and lent to the engine for each call.

mod encounter;
pub mod map_transition;
mod simulation;

pub use encounter::Encounter;
pub use map_transition::{MapTransitionError, MapTransitionResult};
