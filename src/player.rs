//! The player as seen by hostile actors: a shared target mutated through a
//! narrow status interface.

use glam::Vec2;

use crate::actor::ActorId;
use crate::components::{Experience, Health, Stats};
use crate::constants::*;
use crate::grid::Grid;
use crate::systems::experience::grant_xp;
use crate::systems::movement::try_move;

/// Everything an actor or projectile may read from or do to its target.
///
/// All calls take effect immediately. Grab ownership is enforced here: only
/// one holder at a time, and only the holder may release.
pub trait StatusTarget {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);

    fn health(&self) -> Health;
    fn is_alive(&self) -> bool {
        !self.health().is_dead()
    }
    /// Returns the damage actually dealt
    fn take_damage(&mut self, amount: i32) -> i32;

    /// Returns whether a new stun was applied (false if already stunned or immune)
    fn apply_stun(&mut self, ticks: u32) -> bool;
    fn is_stunned(&self) -> bool;

    /// Claim the grab lock. Succeeds if free or already held by `holder`.
    fn try_grab(&mut self, holder: ActorId) -> bool;
    /// Release the grab lock. Only the holder can release; anything else is a no-op.
    fn release_grab(&mut self, holder: ActorId) -> bool;
    fn grab_holder(&self) -> Option<ActorId>;
    fn is_grabbed(&self) -> bool {
        self.grab_holder().is_some()
    }
}

/// Concrete player state
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub health: Health,
    pub stats: Stats,
    pub experience: Experience,
    stun_ticks: u32,
    grabbed_by: Option<ActorId>,
    /// Rejects new stuns (e.g. from an item)
    pub stun_immune: bool,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            health: Health::new(PLAYER_STARTING_HEALTH),
            stats: Stats::new(PLAYER_STRENGTH, PLAYER_INTELLIGENCE, PLAYER_AGILITY, PLAYER_WISDOM),
            experience: Experience::new(),
            stun_ticks: 0,
            grabbed_by: None,
            stun_immune: false,
        }
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Per-tick status upkeep
    pub fn tick(&mut self) {
        self.stun_ticks = self.stun_ticks.saturating_sub(1);
    }

    pub fn stun_remaining(&self) -> u32 {
        self.stun_ticks
    }

    /// Stunned or grabbed players cannot walk
    pub fn can_move(&self) -> bool {
        !self.is_stunned() && !self.is_grabbed() && self.is_alive()
    }

    /// Walk by `delta` with tile collision, sliding along walls, unless
    /// movement-locked. Returns whether the player moved.
    pub fn try_move(&mut self, grid: &Grid, delta: Vec2) -> bool {
        if !self.can_move() {
            return false;
        }
        let next = try_move(grid, self.position, delta);
        let moved = next != self.position;
        self.position = next;
        moved
    }

    /// Add XP and report whether a level was gained
    pub fn grant_xp(&mut self, amount: u32) -> bool {
        grant_xp(&mut self.experience, amount)
    }
}

impl StatusTarget for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    fn health(&self) -> Health {
        self.health
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        self.health.apply_damage(amount)
    }

    fn apply_stun(&mut self, ticks: u32) -> bool {
        if self.stun_immune || self.is_stunned() || ticks == 0 {
            return false;
        }
        self.stun_ticks = ticks;
        true
    }

    fn is_stunned(&self) -> bool {
        self.stun_ticks > 0
    }

    fn try_grab(&mut self, holder: ActorId) -> bool {
        match self.grabbed_by {
            None => {
                self.grabbed_by = Some(holder);
                true
            }
            Some(current) if current == holder => true,
            Some(current) => {
                tracing::warn!("{:?} tried to grab the player but {:?} already holds them", holder, current);
                false
            }
        }
    }

    fn release_grab(&mut self, holder: ActorId) -> bool {
        if self.grabbed_by == Some(holder) {
            self.grabbed_by = None;
            true
        } else {
            false
        }
    }

    fn grab_holder(&self) -> Option<ActorId> {
        self.grabbed_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stun_only_when_not_stunned() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.apply_stun(10));
        assert!(!player.apply_stun(50));
        assert_eq!(player.stun_remaining(), 10);
        for _ in 0..10 {
            player.tick();
        }
        assert!(!player.is_stunned());
        assert!(player.apply_stun(5));
    }

    #[test]
    fn test_stun_immunity() {
        let mut player = Player::new(Vec2::ZERO);
        player.stun_immune = true;
        assert!(!player.apply_stun(10));
        assert!(!player.is_stunned());
    }

    #[test]
    fn test_single_grab_holder() {
        let mut player = Player::new(Vec2::ZERO);
        let a = ActorId(1);
        let b = ActorId(2);

        assert!(player.try_grab(a));
        assert!(player.try_grab(a));
        assert!(!player.try_grab(b));
        assert_eq!(player.grab_holder(), Some(a));

        // Only the holder releases
        assert!(!player.release_grab(b));
        assert!(player.is_grabbed());
        assert!(player.release_grab(a));
        assert!(!player.is_grabbed());

        // Double release is a no-op
        assert!(!player.release_grab(a));
    }

    #[test]
    fn test_movement_lock() {
        let grid = Grid::new(4, 4);
        let mut player = Player::new(Vec2::new(48.0, 48.0));
        assert!(player.try_move(&grid, Vec2::new(1.0, 0.0)));
        player.try_grab(ActorId(7));
        assert!(!player.try_move(&grid, Vec2::new(1.0, 0.0)));
        assert_eq!(player.position, Vec2::new(49.0, 48.0));
        player.release_grab(ActorId(7));
        player.apply_stun(2);
        assert!(!player.can_move());
    }

    #[test]
    fn test_walls_stop_the_player() {
        let grid = Grid::from_ascii(&["...", ".#.", "..."]).unwrap();
        let start = Vec2::new(16.0, 48.0);
        let mut player = Player::new(start);

        // Straight into the wall: nothing moves
        assert!(!player.try_move(&grid, Vec2::new(32.0, 0.0)));
        assert_eq!(player.position, start);

        // Diagonal into the wall slides along the free axis
        player.position = Vec2::new(16.0, 16.0);
        assert!(player.try_move(&grid, Vec2::new(32.0, 32.0)));
        assert_eq!(player.position, Vec2::new(48.0, 16.0));
    }

    #[test]
    fn test_take_damage() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(player.take_damage(30), 30);
        assert_eq!(player.health().current, PLAYER_STARTING_HEALTH - 30);
        assert!(player.is_alive());
        player.take_damage(1000);
        assert!(!player.is_alive());
    }
}
