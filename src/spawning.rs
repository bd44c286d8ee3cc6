//! Data-driven spawning.
//!
//! Actor kinds and roster monsters are described by plain definitions so new
//! variants can be added without touching the spawning code.

use glam::Vec2;
use hecs::World;

use crate::actor::{Actor, ActorBody, ActorId, ActorKind, Brain};
use crate::components::ActorStats;
use crate::config::Tuning;
use crate::grid::tile_center;
use crate::roster::{spawn_monster, HostileId};
use crate::systems::ambush::AmbushBrain;
use crate::systems::boss::BossBrain;
use crate::systems::sentinel::SentinelBrain;

/// Definition of a hostile actor type. Numbers come from [`Tuning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDef {
    /// Display name (for logs)
    pub name: &'static str,
    pub kind: ActorKind,
}

pub const BOSS: ActorDef = ActorDef {
    name: "Boss",
    kind: ActorKind::Boss,
};

pub const AMBUSHER: ActorDef = ActorDef {
    name: "Ambusher",
    kind: ActorKind::Ambusher,
};

pub const SENTINEL: ActorDef = ActorDef {
    name: "Sentinel",
    kind: ActorKind::Sentinel,
};

impl ActorDef {
    /// Build a fresh actor of this type at `position`
    pub fn build(&self, id: ActorId, position: Vec2, tuning: &Tuning) -> Actor {
        let (health, stats, brain) = match self.kind {
            ActorKind::Boss => {
                let t = tuning.boss;
                let stats = ActorStats {
                    speed: t.speed,
                    contact_damage: t.contact_damage,
                    detection_radius: t.detection_radius,
                    attack_radius: t.attack_range,
                };
                (t.health, stats, Brain::Boss(BossBrain::new(t, tuning.projectile)))
            }
            ActorKind::Ambusher => {
                let t = tuning.ambush;
                let stats = ActorStats {
                    speed: t.speed,
                    contact_damage: t.contact_damage,
                    detection_radius: t.detection_radius,
                    attack_radius: t.tongue_max_length,
                };
                (t.health, stats, Brain::Ambush(AmbushBrain::new(t)))
            }
            ActorKind::Sentinel => {
                let t = tuning.sentinel;
                let stats = ActorStats {
                    speed: t.speed,
                    // Sentinels only fight roster hostiles
                    contact_damage: 0,
                    detection_radius: t.detection_radius,
                    attack_radius: t.attack_range,
                };
                (t.health, stats, Brain::Sentinel(SentinelBrain::new(t)))
            }
        };
        tracing::debug!("built {} {:?} at {:?}", self.name, id, position);
        Actor::new(ActorBody::new(id, position, health, stats), brain)
    }
}

/// Definition of a roster monster - all the data needed to spawn one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterDef {
    pub name: &'static str,
    pub health: i32,
    pub xp_value: u32,
}

impl MonsterDef {
    pub fn spawn(&self, world: &mut World, position: Vec2) -> HostileId {
        spawn_monster(world, position, self.name, self.health, self.xp_value)
    }
}

/// Predefined roster monsters
pub mod monsters {
    use super::*;
    use crate::constants::*;

    pub const RAT: MonsterDef = MonsterDef {
        name: "Rat",
        health: RAT_HEALTH,
        xp_value: RAT_XP,
    };

    pub const SKELETON: MonsterDef = MonsterDef {
        name: "Skeleton",
        health: SKELETON_HEALTH,
        xp_value: SKELETON_XP,
    };
}

/// A single spawn entry: which monster and how many
pub struct SpawnEntry {
    pub monster: MonsterDef,
    pub count: usize,
}

/// Monster population for a map
pub struct SpawnConfig {
    pub entries: Vec<SpawnEntry>,
}

impl SpawnConfig {
    /// Scatter monsters over free tiles, one per tile.
    /// Returns the number of monsters spawned.
    pub fn spawn_all(
        &self,
        world: &mut World,
        walkable_tiles: &[(i32, i32)],
        excluded_positions: &[(i32, i32)],
        rng: &mut impl rand::Rng,
    ) -> usize {
        let mut spawned = 0;
        let mut used_positions: Vec<(i32, i32)> = excluded_positions.to_vec();

        for entry in &self.entries {
            for _ in 0..entry.count {
                let available: Vec<_> = walkable_tiles
                    .iter()
                    .filter(|pos| !used_positions.contains(pos))
                    .collect();

                if available.is_empty() {
                    tracing::warn!("ran out of free tiles spawning {}", entry.monster.name);
                    return spawned;
                }

                let &(x, y) = available[rng.gen_range(0..available.len())];
                entry.monster.spawn(world, tile_center(x, y));
                used_positions.push((x, y));
                spawned += 1;
            }
        }

        spawned
    }
}
