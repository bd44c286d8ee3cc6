//! Combat helpers shared by the encounter: player melee and corpse removal.

use crate::actor::{Actor, ActorId};
use crate::components::Stats;
use crate::constants::*;

/// Damage of a player melee hit
pub fn melee_damage(stats: &Stats) -> i32 {
    PLAYER_UNARMED_DAMAGE + (stats.strength - STRENGTH_BONUS_BASELINE).max(0) / 2
}

/// Drop dead actors from the active set, keeping spawn order.
/// Their death hooks have already run; returns who was removed.
pub fn remove_dead_actors(actors: &mut Vec<Actor>) -> Vec<ActorId> {
    let removed: Vec<ActorId> = actors.iter().filter(|a| !a.is_alive()).map(Actor::id).collect();
    actors.retain(Actor::is_alive);
    for id in &removed {
        tracing::debug!("removed dead actor {:?}", id);
    }
    removed
}
