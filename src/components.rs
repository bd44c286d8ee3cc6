use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position component - continuous world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Health component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Subtract damage, clamping at zero. Returns the damage actually dealt.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let dealt = amount.min(self.current.max(0));
        self.current = (self.current - amount).max(0);
        dealt
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Stats component - character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub intelligence: i32,
    pub agility: i32,
    /// Scales the vision radius
    pub wisdom: i32,
}

impl Stats {
    pub fn new(strength: i32, intelligence: i32, agility: i32, wisdom: i32) -> Self {
        Self {
            strength,
            intelligence,
            agility,
            wisdom,
        }
    }
}

/// Experience component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Experience {
    pub current: u32,
    pub level: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self { current: 0, level: 1 }
    }
}

/// Third-party hostile creature living in the roster world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub name: &'static str,
    /// XP granted to the player when it dies from player damage
    pub xp_value: u32,
}

/// Marks a monster killed by a source that earns the player nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoReward;

/// Four-way facing, presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing toward `delta`, chosen by the sign of its larger axis.
    /// A zero vector returns `None` so callers keep their current facing.
    pub fn from_delta(delta: Vec2) -> Option<Self> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        if delta.x.abs() > delta.y.abs() {
            Some(if delta.x > 0.0 { Facing::Right } else { Facing::Left })
        } else {
            Some(if delta.y > 0.0 { Facing::Down } else { Facing::Up })
        }
    }
}

/// Fixed combat and movement stats of a hostile actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    /// Movement per tick
    pub speed: f32,
    pub contact_damage: i32,
    pub detection_radius: f32,
    pub attack_radius: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_clamps() {
        let mut health = Health::new(10);
        assert_eq!(health.apply_damage(4), 4);
        assert_eq!(health.current, 6);
        assert_eq!(health.apply_damage(20), 6);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
        assert_eq!(health.apply_damage(-5), 0);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_health_percentage() {
        let mut health = Health::new(200);
        health.apply_damage(50);
        assert!((health.percentage() - 0.75).abs() < 1e-6);
        health.heal(500);
        assert_eq!(health.current, 200);
    }

    #[test]
    fn test_facing_from_delta() {
        assert_eq!(Facing::from_delta(Vec2::new(5.0, 1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_delta(Vec2::new(-5.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_delta(Vec2::new(1.0, 3.0)), Some(Facing::Down));
        assert_eq!(Facing::from_delta(Vec2::new(1.0, -3.0)), Some(Facing::Up));
        assert_eq!(Facing::from_delta(Vec2::ZERO), None);
    }
}
