//! Map transitions.
//!
//! Nothing survives a map change except the player: actors are cleared
//! (releasing any grab they hold), projectiles and roster monsters are
//! dropped, and fog of war starts over at the new map's size.

use glam::Vec2;

use crate::events::GameEvent;
use crate::grid::{world_to_tile, Grid};
use crate::player::Player;

use super::Encounter;

/// Errors that abort a transition before anything is changed
#[derive(Debug, thiserror::Error)]
pub enum MapTransitionError {
    #[error("arrival point ({x}, {y}) is not walkable on the new map")]
    BlockedArrival { x: i32, y: i32 },
}

/// Summary of what a transition threw away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapTransitionResult {
    pub width: usize,
    pub height: usize,
    pub cleared_actors: usize,
    pub cleared_projectiles: usize,
    pub cleared_monsters: usize,
}

/// Check that the player can stand at `arrival` on `grid`.
pub fn can_arrive(grid: &Grid, arrival: Vec2) -> Result<(), MapTransitionError> {
    if grid.is_walkable_world(arrival) {
        Ok(())
    } else {
        let (x, y) = world_to_tile(arrival);
        Err(MapTransitionError::BlockedArrival { x, y })
    }
}

impl Encounter {
    /// Replace the active map and move the player to `arrival` on it.
    pub fn change_map(
        &mut self,
        grid: Grid,
        player: &mut Player,
        arrival: Vec2,
    ) -> Result<MapTransitionResult, MapTransitionError> {
        can_arrive(&grid, arrival)?;

        let cleared_actors = self.actors.iter().filter(|a| a.is_alive()).count();
        for actor in self.actors.iter_mut() {
            let mut ctx = Self::context(
                &self.grid,
                Some(&mut *player),
                &mut self.roster,
                &mut self.events,
                &mut self.projectiles,
                &mut self.rng,
                &self.tuning,
            );
            actor.clear(&mut ctx);
        }
        self.actors.clear();

        let cleared_projectiles = self.projectiles.len();
        self.projectiles.clear();

        let cleared_monsters = self.roster.len() as usize;
        self.roster.clear();

        let (width, height) = grid.dimensions();
        self.grid = grid;
        self.visibility.reset(width, height);

        player.position = arrival;
        self.visibility
            .update_for_viewer(&self.grid, player.position, &self.tuning.vision, player.stats.wisdom);

        tracing::info!(
            "map changed to {}x{}: cleared {} actor(s), {} projectile(s), {} monster(s)",
            width,
            height,
            cleared_actors,
            cleared_projectiles,
            cleared_monsters
        );
        self.events.push(GameEvent::MapChanged { width, height });

        Ok(MapTransitionResult {
            width,
            height,
            cleared_actors,
            cleared_projectiles,
            cleared_monsters,
        })
    }
}
