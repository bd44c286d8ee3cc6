//! Shared contract for hostile actors.
//!
//! An [`Actor`] is a common [`ActorBody`] (position, health, stats, timers)
//! plus a [`Brain`] selecting the per-kind [`Behavior`]. Each tick the actor:
//! 1. counts down shared timers,
//! 2. lets its behavior evaluate transitions and act,
//! 3. applies body contact damage.
//!
//! Death is terminal: the behavior's removal hook runs exactly once, pending
//! attacks are dropped and any grab on the player is released.

use glam::Vec2;
use rand::rngs::StdRng;

use crate::components::{ActorStats, Facing, Health};
use crate::config::ContactTuning;
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::player::StatusTarget;
use crate::roster::HostileRoster;
use crate::systems::ambush::AmbushBrain;
use crate::systems::boss::BossBrain;
use crate::systems::projectile::Projectile;
use crate::systems::sentinel::SentinelBrain;

/// Stable identity of an actor within an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

/// Why an actor is leaving the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Died,
    /// Dropped by its owner, e.g. on a map change
    Cleared,
}

/// Everything an actor may touch during its update
pub struct TickContext<'a> {
    pub grid: &'a Grid,
    /// `None` when there is no target this tick; behaviors skip target-dependent steps
    pub player: Option<&'a mut dyn StatusTarget>,
    pub roster: &'a mut dyn HostileRoster,
    pub events: &'a mut EventQueue,
    /// Projectiles launched this tick, adopted by the owner afterwards
    pub spawned: &'a mut Vec<Projectile>,
    pub rng: &'a mut StdRng,
    pub contact: ContactTuning,
}

impl<'a> TickContext<'a> {
    /// Current target position, if a living target exists
    pub fn target_position(&self) -> Option<Vec2> {
        self.player
            .as_deref()
            .filter(|p| p.is_alive())
            .map(|p| p.position())
    }

    pub fn target_mut(&mut self) -> Option<&mut (dyn StatusTarget + 'a)> {
        self.player.as_deref_mut()
    }
}

/// Data shared by every hostile actor
#[derive(Debug, Clone)]
pub struct ActorBody {
    pub id: ActorId,
    pub position: Vec2,
    /// Displacement applied during the last tick
    pub velocity: Vec2,
    pub health: Health,
    pub stats: ActorStats,
    pub facing: Facing,
    /// Where the actor was placed; sentinels return here
    pub anchor: Vec2,
    pub alive_ticks: u32,
    alive: bool,
    contact_cooldown: u32,
}

impl ActorBody {
    pub fn new(id: ActorId, position: Vec2, health: i32, stats: ActorStats) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            health: Health::new(health),
            stats,
            facing: Facing::default(),
            anchor: position,
            alive_ticks: 0,
            alive: true,
            contact_cooldown: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    /// Move to `new_pos`, recording the displacement as velocity
    pub fn move_to(&mut self, new_pos: Vec2) {
        self.velocity = new_pos - self.position;
        self.position = new_pos;
    }

    pub fn face_toward(&mut self, point: Vec2) {
        if let Some(facing) = Facing::from_delta(point - self.position) {
            self.facing = facing;
        }
    }
}

/// Per-kind AI hooks
pub trait Behavior {
    /// Name of the current state, for events and logs
    fn state_name(&self) -> &'static str;

    /// Evaluate transitions and perform the current state's side effects
    fn think(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>);

    /// Adjust incoming damage before it reaches health
    fn modify_damage(&self, amount: i32) -> i32 {
        amount
    }

    /// React to being hurt (after health changed, actor still alive)
    fn on_damaged(&mut self, _body: &mut ActorBody, _ctx: &mut TickContext<'_>) {}

    /// Drop pending attacks and release anything held. Runs once.
    fn on_removed(&mut self, _body: &mut ActorBody, _ctx: &mut TickContext<'_>, _removal: Removal) {}

    fn deals_contact_damage(&self) -> bool {
        true
    }
}

/// Kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Boss,
    Ambusher,
    Sentinel,
}

/// Per-kind state, dispatched through [`Behavior`]
#[derive(Debug, Clone)]
pub enum Brain {
    Boss(BossBrain),
    Ambush(AmbushBrain),
    Sentinel(SentinelBrain),
}

impl Brain {
    pub fn kind(&self) -> ActorKind {
        match self {
            Brain::Boss(_) => ActorKind::Boss,
            Brain::Ambush(_) => ActorKind::Ambusher,
            Brain::Sentinel(_) => ActorKind::Sentinel,
        }
    }

    pub fn behavior(&self) -> &dyn Behavior {
        match self {
            Brain::Boss(b) => b,
            Brain::Ambush(b) => b,
            Brain::Sentinel(b) => b,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Brain::Boss(b) => b,
            Brain::Ambush(b) => b,
            Brain::Sentinel(b) => b,
        }
    }
}

/// A hostile actor: shared body plus kind-specific brain
#[derive(Debug, Clone)]
pub struct Actor {
    pub body: ActorBody,
    pub brain: Brain,
}

impl Actor {
    pub fn new(body: ActorBody, brain: Brain) -> Self {
        Self { body, brain }
    }

    pub fn id(&self) -> ActorId {
        self.body.id
    }

    pub fn kind(&self) -> ActorKind {
        self.brain.kind()
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn health(&self) -> Health {
        self.body.health
    }

    pub fn state_name(&self) -> &'static str {
        self.brain.behavior().state_name()
    }

    pub fn as_boss(&self) -> Option<&BossBrain> {
        match &self.brain {
            Brain::Boss(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_ambush(&self) -> Option<&AmbushBrain> {
        match &self.brain {
            Brain::Ambush(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_ambush_mut(&mut self) -> Option<&mut AmbushBrain> {
        match &mut self.brain {
            Brain::Ambush(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_sentinel(&self) -> Option<&SentinelBrain> {
        match &self.brain {
            Brain::Sentinel(b) => Some(b),
            _ => None,
        }
    }

    /// Per-tick entry point
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        puffin::profile_function!();

        if !self.body.alive {
            return;
        }

        self.body.alive_ticks = self.body.alive_ticks.saturating_add(1);
        self.body.contact_cooldown = self.body.contact_cooldown.saturating_sub(1);
        self.body.velocity = Vec2::ZERO;

        let before = self.state_name();
        self.brain.behavior_mut().think(&mut self.body, ctx);
        let after = self.state_name();

        if before != after {
            tracing::debug!("{:?} {:?}: {} -> {}", self.kind(), self.body.id, before, after);
            ctx.events.push(GameEvent::ActorStateChanged {
                actor: self.body.id,
                from: before,
                to: after,
            });
        }

        if self.body.alive {
            self.apply_contact_damage(ctx);
        }
    }

    fn apply_contact_damage(&mut self, ctx: &mut TickContext<'_>) {
        let damage = self.body.stats.contact_damage;
        if damage <= 0 || self.body.contact_cooldown > 0 || !self.brain.behavior().deals_contact_damage() {
            return;
        }
        let range = ctx.contact.range;
        let cooldown = ctx.contact.cooldown_ticks;
        let position = self.body.position;
        let Some(target) = ctx.target_mut() else {
            return;
        };
        if !target.is_alive() || target.position().distance(position) > range {
            return;
        }
        let dealt = target.take_damage(damage);
        self.body.contact_cooldown = cooldown;
        ctx.events.push(GameEvent::ContactHit {
            actor: self.body.id,
            damage: dealt,
        });
    }

    /// Damage entry point. Returns the health actually removed.
    pub fn take_damage(&mut self, amount: i32, ctx: &mut TickContext<'_>) -> i32 {
        if !self.body.alive {
            return 0;
        }
        let adjusted = self.brain.behavior().modify_damage(amount);
        let dealt = self.body.health.apply_damage(adjusted);

        if self.body.health.is_dead() {
            self.kill(ctx);
        } else {
            self.brain.behavior_mut().on_damaged(&mut self.body, ctx);
        }
        dealt
    }

    /// Terminal death transition
    pub fn kill(&mut self, ctx: &mut TickContext<'_>) {
        if !self.body.alive {
            return;
        }
        self.body.alive = false;
        self.brain.behavior_mut().on_removed(&mut self.body, ctx, Removal::Died);
        tracing::info!("{:?} {:?} died at {:?}", self.kind(), self.body.id, self.body.position);
        ctx.events.push(GameEvent::ActorDied {
            actor: self.body.id,
            position: self.body.position,
        });
    }

    /// Removal by the owner without dying (map change). Releases holds.
    pub fn clear(&mut self, ctx: &mut TickContext<'_>) {
        if !self.body.alive {
            return;
        }
        self.body.alive = false;
        self.brain.behavior_mut().on_removed(&mut self.body, ctx, Removal::Cleared);
    }
}
