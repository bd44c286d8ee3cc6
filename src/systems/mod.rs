//! Game systems organized by domain.
//!
//! This module contains the per-concern behavior, split into focused submodules:
//! - `boss`, `ambush`, `sentinel`: per-kind actor brains
//! - `projectile`: arcing thrown projectiles
//! - `movement`: continuous movement with tile collision
//! - `combat`: player melee and corpse removal
//! - `experience`: XP and leveling

pub mod ambush;
pub mod boss;
pub mod combat;
pub mod experience;
pub mod movement;
pub mod projectile;
pub mod sentinel;

pub use experience::xp_progress;
pub use movement::{step_away, step_toward, try_move};
