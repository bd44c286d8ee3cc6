//! Encounter state - owns the simulation data.

use glam::Vec2;
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::actor::{Actor, ActorId, TickContext};
use crate::config::Tuning;
use crate::events::{EventQueue, GameEvent};
use crate::fov::Visibility;
use crate::grid::Grid;
use crate::player::{Player, StatusTarget};
use crate::roster::HostileId;
use crate::spawning::{ActorDef, MonsterDef};
use crate::systems::projectile::Projectile;

/// Everything that lives on the current map besides the player
pub struct Encounter {
    pub(super) grid: Grid,
    pub(super) visibility: Visibility,
    /// Living and not-yet-reaped actors, in spawn order
    pub(super) actors: Vec<Actor>,
    pub(super) projectiles: Vec<Projectile>,
    /// Third-party monsters hunted by sentinels
    pub(super) roster: World,
    pub(super) events: EventQueue,
    pub(super) tuning: Tuning,
    pub(super) rng: StdRng,
    pub(super) tick_count: u64,
    next_actor_id: u32,
}

impl Encounter {
    pub fn new(grid: Grid, tuning: Tuning, seed: u64) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            grid,
            visibility: Visibility::new(width, height),
            actors: Vec::new(),
            projectiles: Vec::new(),
            roster: World::new(),
            events: EventQueue::new(),
            tuning,
            rng: StdRng::seed_from_u64(seed),
            tick_count: 0,
            next_actor_id: 1,
        }
    }

    /// Spawn an actor of the given type; it joins the end of the update order
    pub fn spawn_actor(&mut self, def: &ActorDef, position: Vec2) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        if !self.grid.is_walkable_world(position) {
            tracing::warn!("{} {:?} spawned on a blocked tile at {:?}", def.name, id, position);
        }
        self.actors.push(def.build(id, position, &self.tuning));
        id
    }

    pub fn spawn_monster(&mut self, def: &MonsterDef, position: Vec2) -> HostileId {
        def.spawn(&mut self.roster, position)
    }

    /// Builds the per-actor context from the encounter's parts
    pub(super) fn context<'a>(
        grid: &'a Grid,
        player: Option<&'a mut Player>,
        roster: &'a mut World,
        events: &'a mut EventQueue,
        spawned: &'a mut Vec<Projectile>,
        rng: &'a mut StdRng,
        tuning: &Tuning,
    ) -> TickContext<'a> {
        TickContext {
            grid,
            player: player.map(|p| p as &mut dyn StatusTarget),
            roster,
            events,
            spawned,
            rng,
            contact: tuning.contact,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn roster(&self) -> &World {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut World {
        &mut self.roster
    }

    /// The actor currently holding the player, if any
    pub fn player_grabbed_by(&self) -> Option<ActorId> {
        self.actors
            .iter()
            .find(|a| a.as_ambush().map(|b| b.is_player_grabbed()).unwrap_or(false))
            .map(Actor::id)
    }

    /// Escape inputs counted against the current grab (zero when free)
    pub fn escape_progress(&self) -> u32 {
        self.player_grabbed_by()
            .and_then(|id| self.actor(id))
            .and_then(Actor::as_ambush)
            .map(|b| b.escape_progress())
            .unwrap_or(0)
    }

    /// Debug utility: mark the whole map explored and visible
    pub fn reveal_all(&mut self) {
        self.visibility.reveal_all();
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
