//! Third-party hostiles that sentinels hunt.
//!
//! Monsters live in their own `hecs::World`. Sentinels only see them through
//! [`HostileRoster`], which also provides the damage path that grants the
//! player no experience.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Health, Monster, NoReward, Position};
use crate::events::{EventQueue, GameEvent};
use crate::player::Player;

/// Stable handle to a roster hostile
pub type HostileId = Entity;

/// Read-only snapshot of one hostile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileView {
    pub id: HostileId,
    pub position: Vec2,
    pub alive: bool,
}

/// Collection of hostile entities a sentinel can scan and strike
pub trait HostileRoster {
    /// All hostiles in a stable order
    fn hostiles(&self) -> Vec<HostileView>;

    fn hostile(&self, id: HostileId) -> Option<HostileView>;

    /// Damage that awards nothing to the player. Returns whether it killed.
    fn damage_no_reward(&mut self, id: HostileId, amount: i32) -> bool;
}

impl HostileRoster for World {
    fn hostiles(&self) -> Vec<HostileView> {
        let mut views: Vec<HostileView> = self
            .query::<(&Position, &Health, &Monster)>()
            .iter()
            .map(|(id, (pos, health, _))| HostileView {
                id,
                position: pos.0,
                alive: !health.is_dead(),
            })
            .collect();
        // Archetype iteration order shifts on despawn; sort for a stable scan
        views.sort_by_key(|v| v.id.to_bits());
        views
    }

    fn hostile(&self, id: HostileId) -> Option<HostileView> {
        let mut query = self.query_one::<(&Position, &Health, &Monster)>(id).ok()?;
        let (pos, health, _) = query.get()?;
        Some(HostileView {
            id,
            position: pos.0,
            alive: !health.is_dead(),
        })
    }

    fn damage_no_reward(&mut self, id: HostileId, amount: i32) -> bool {
        let killed = match self.get::<&mut Health>(id) {
            Ok(mut health) => {
                if health.is_dead() {
                    return false;
                }
                health.apply_damage(amount);
                health.is_dead()
            }
            Err(_) => return false,
        };
        if killed {
            let _ = self.insert_one(id, NoReward);
        }
        killed
    }
}

/// Spawn a roster monster
pub fn spawn_monster(world: &mut World, position: Vec2, name: &'static str, health: i32, xp_value: u32) -> HostileId {
    world.spawn((Position(position), Health::new(health), Monster { name, xp_value }))
}

/// Damage dealt by the player; kills from this path grant XP when reaped
pub fn damage_from_player(world: &mut World, id: HostileId, amount: i32) -> bool {
    match world.get::<&mut Health>(id) {
        Ok(mut health) => {
            health.apply_damage(amount);
            health.is_dead()
        }
        Err(_) => false,
    }
}

/// Move a roster monster (driven by whatever AI owns it)
pub fn set_monster_position(world: &mut World, id: HostileId, position: Vec2) {
    if let Ok(mut pos) = world.get::<&mut Position>(id) {
        pos.0 = position;
    }
}

/// Despawn dead monsters, granting XP to the player unless the kill was no-reward
pub fn reap_monsters(world: &mut World, player: &mut Player, events: &mut EventQueue) {
    let dead: Vec<(Entity, u32, bool)> = world
        .query::<(&Health, &Monster, Option<&NoReward>)>()
        .iter()
        .filter(|(_, (health, _, _))| health.is_dead())
        .map(|(id, (_, monster, no_reward))| (id, monster.xp_value, no_reward.is_some()))
        .collect();

    for (id, xp_value, no_reward) in dead {
        let xp = if no_reward { 0 } else { xp_value };
        if xp > 0 && player.grant_xp(xp) {
            events.push(GameEvent::LevelUp {
                new_level: player.experience.level,
            });
        }
        tracing::debug!("monster {:?} reaped, {} xp awarded", id, xp);
        events.push(GameEvent::MonsterSlain { hostile: id, xp });
        let _ = world.despawn(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostiles_listed_in_spawn_order() {
        let mut world = World::new();
        let a = spawn_monster(&mut world, Vec2::new(1.0, 0.0), "Rat", 10, 5);
        let b = spawn_monster(&mut world, Vec2::new(2.0, 0.0), "Rat", 10, 5);
        let c = spawn_monster(&mut world, Vec2::new(3.0, 0.0), "Rat", 10, 5);
        let _ = world.despawn(a);
        let ids: Vec<_> = world.hostiles().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![b, c]);
    }

    #[test]
    fn test_no_reward_kill_grants_nothing() {
        let mut world = World::new();
        let mut player = Player::new(Vec2::ZERO);
        let mut events = EventQueue::new();
        let rat = spawn_monster(&mut world, Vec2::ZERO, "Rat", 10, 40);

        assert!(!world.damage_no_reward(rat, 4));
        assert!(world.damage_no_reward(rat, 6));
        // Already dead: no second kill
        assert!(!world.damage_no_reward(rat, 6));

        reap_monsters(&mut world, &mut player, &mut events);
        assert_eq!(player.experience.current, 0);
        assert!(world.hostile(rat).is_none());
        assert!(events.iter().any(|e| matches!(e, GameEvent::MonsterSlain { xp: 0, .. })));
    }

    #[test]
    fn test_player_kill_grants_xp() {
        let mut world = World::new();
        let mut player = Player::new(Vec2::ZERO);
        let mut events = EventQueue::new();
        let rat = spawn_monster(&mut world, Vec2::ZERO, "Rat", 10, 40);

        assert!(damage_from_player(&mut world, rat, 10));
        reap_monsters(&mut world, &mut player, &mut events);
        assert_eq!(player.experience.current, 40);
    }

    #[test]
    fn test_hostile_lookup() {
        let mut world = World::new();
        let rat = spawn_monster(&mut world, Vec2::new(4.0, 5.0), "Rat", 10, 1);
        set_monster_position(&mut world, rat, Vec2::new(6.0, 5.0));
        let view = world.hostile(rat).unwrap();
        assert_eq!(view.position, Vec2::new(6.0, 5.0));
        assert!(view.alive);
    }
}
