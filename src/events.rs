//! Game event system for decoupled communication between systems.
//!
//! Actors and projectiles emit events while they update; the owner drains
//! them at the end of the tick for presentation, audio, UI, etc.

use glam::Vec2;

use crate::actor::ActorId;
use crate::roster::HostileId;

/// Why a grab ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabEndReason {
    /// The player mashed their way out
    Escaped,
    /// The grabbing actor died
    HolderDied,
    /// The actor was removed by its owner (map change)
    Cleared,
}

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An actor's state machine moved to a new state
    ActorStateChanged {
        actor: ActorId,
        from: &'static str,
        to: &'static str,
    },
    /// The boss escalated
    BossEnraged { actor: ActorId },
    /// A projectile left the thrower
    ProjectileLaunched { from: Vec2, to: Vec2 },
    /// A projectile landed
    ProjectileImpacted { position: Vec2, hit: bool },
    /// The player was stunned
    PlayerStunned { ticks: u32 },
    /// An ambusher dropped its disguise
    ActorRevealed { actor: ActorId },
    /// A tongue lash started toward a point
    TongueLaunched { actor: ActorId, aim: Vec2 },
    /// A tongue lash missed
    TongueWhiffed { actor: ActorId },
    /// A tongue lash caught the player and the actor is reeling in
    PullStarted { actor: ActorId },
    /// The player was grabbed
    PlayerGrabbed { actor: ActorId },
    /// A grabbed player took periodic damage
    GrabDamage { actor: ActorId, damage: i32 },
    /// The player is free again
    GrabReleased { actor: ActorId, reason: GrabEndReason },
    /// A sentinel picked a hostile to chase
    SentinelEngaged { actor: ActorId, hostile: HostileId },
    /// A sentinel strike landed
    SentinelStruck {
        actor: ActorId,
        hostile: HostileId,
        damage: i32,
        killed: bool,
    },
    /// An actor's body touched the player
    ContactHit { actor: ActorId, damage: i32 },
    /// An actor died
    ActorDied { actor: ActorId, position: Vec2 },
    /// A roster monster was removed; `xp` is zero for no-reward kills
    MonsterSlain { hostile: HostileId, xp: u32 },
    /// The player leveled up
    LevelUp { new_level: u32 },
    /// The active map was replaced
    MapChanged { width: usize, height: usize },
}

/// Simple event queue - events are pushed during update, processed at end of tick
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Pending events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
