//! Arcing thrown projectiles.
//!
//! The projectile lifecycle:
//! 1. Launched at a fixed ground point captured when the throw began
//! 2. Flies in a straight line at constant speed; the arc is presentation only
//! 3. Snaps to the point on the final step and resolves damage once
//! 4. Lingers for the impact window, then becomes inactive and is removed

use glam::Vec2;

use crate::config::ProjectileTuning;
use crate::events::{EventQueue, GameEvent};
use crate::player::StatusTarget;

/// Height above the ground at travel progress `p` for an arc peaking at `peak`
pub fn arc_height(progress: f32, peak: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    4.0 * peak * p * (1.0 - p)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectilePhase {
    Flying,
    /// Landed; counting down the splash window
    Impacted { ticks: u32 },
    /// Terminal
    Expired,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub start: Vec2,
    /// Ground point fixed at launch
    pub target: Vec2,
    pub position: Vec2,
    total_distance: f32,
    pub phase: ProjectilePhase,
    /// Whether the impact caught the victim
    pub hit: bool,
    tuning: ProjectileTuning,
}

impl Projectile {
    pub fn new(start: Vec2, target: Vec2, tuning: ProjectileTuning) -> Self {
        Self {
            start,
            target,
            position: start,
            total_distance: start.distance(target),
            phase: ProjectilePhase::Flying,
            hit: false,
            tuning,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != ProjectilePhase::Expired
    }

    pub fn is_flying(&self) -> bool {
        self.phase == ProjectilePhase::Flying
    }

    /// Fraction of the path covered, from 0 at launch to 1 on arrival
    pub fn progress(&self) -> f32 {
        if self.total_distance <= f32::EPSILON {
            return 1.0;
        }
        let remaining = self.position.distance(self.target);
        (1.0 - remaining / self.total_distance).clamp(0.0, 1.0)
    }

    /// Current presentational height above the ground
    pub fn height(&self) -> f32 {
        if self.is_flying() {
            arc_height(self.progress(), self.tuning.arc_height)
        } else {
            0.0
        }
    }

    /// Advance one tick against the fixed victim
    pub fn update(&mut self, victim: Option<&mut (dyn StatusTarget + '_)>, events: &mut EventQueue) {
        match self.phase {
            ProjectilePhase::Expired => {}
            ProjectilePhase::Impacted { ticks } => {
                let ticks = ticks.saturating_sub(1);
                self.phase = if ticks == 0 {
                    ProjectilePhase::Expired
                } else {
                    ProjectilePhase::Impacted { ticks }
                };
            }
            ProjectilePhase::Flying => {
                let to_target = self.target - self.position;
                let remaining = to_target.length();
                if remaining <= self.tuning.speed {
                    self.position = self.target;
                    self.impact(victim, events);
                } else {
                    self.position += to_target / remaining * self.tuning.speed;
                }
            }
        }
    }

    fn impact(&mut self, victim: Option<&mut (dyn StatusTarget + '_)>, events: &mut EventQueue) {
        if let Some(victim) = victim {
            if victim.is_alive() && victim.position().distance(self.target) <= self.tuning.impact_radius {
                self.hit = true;
                victim.take_damage(self.tuning.damage);
                if victim.apply_stun(self.tuning.stun_ticks) {
                    events.push(GameEvent::PlayerStunned {
                        ticks: self.tuning.stun_ticks,
                    });
                }
            }
        }

        tracing::debug!("projectile landed at {:?} (hit: {})", self.target, self.hit);
        events.push(GameEvent::ProjectileImpacted {
            position: self.target,
            hit: self.hit,
        });

        self.phase = if self.tuning.impact_ticks == 0 {
            ProjectilePhase::Expired
        } else {
            ProjectilePhase::Impacted {
                ticks: self.tuning.impact_ticks,
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn run_until_landed(projectile: &mut Projectile, player: &mut Player, events: &mut EventQueue) {
        for _ in 0..1000 {
            if !projectile.is_flying() {
                return;
            }
            projectile.update(Some(&mut *player), events);
        }
        panic!("projectile never landed");
    }

    #[test]
    fn test_arc_height_shape() {
        let peak = 48.0;
        assert_eq!(arc_height(0.0, peak), 0.0);
        assert_eq!(arc_height(1.0, peak), 0.0);
        assert!((arc_height(0.5, peak) - peak).abs() < 1e-5);
        assert!(arc_height(0.25, peak) < peak);
        assert!((arc_height(0.25, peak) - arc_height(0.75, peak)).abs() < 1e-5);
    }

    #[test]
    fn test_progress_and_height_in_flight() {
        let tuning = ProjectileTuning {
            speed: 10.0,
            ..ProjectileTuning::default()
        };
        let mut projectile = Projectile::new(Vec2::ZERO, Vec2::new(100.0, 0.0), tuning);
        let mut events = EventQueue::new();
        assert_eq!(projectile.progress(), 0.0);

        for _ in 0..5 {
            projectile.update(None, &mut events);
        }
        assert!((projectile.progress() - 0.5).abs() < 1e-5);
        assert!((projectile.height() - tuning.arc_height).abs() < 1e-3);
    }

    #[test]
    fn test_hit_damages_and_stuns() {
        let tuning = ProjectileTuning::default();
        let target = Vec2::new(200.0, 100.0);
        let mut player = Player::new(target + Vec2::new(10.0, 0.0));
        let mut projectile = Projectile::new(Vec2::new(100.0, 100.0), target, tuning);
        let mut events = EventQueue::new();

        run_until_landed(&mut projectile, &mut player, &mut events);

        assert_eq!(projectile.position, target);
        assert!(projectile.hit);
        assert_eq!(player.health.current, player.health.max - tuning.damage);
        assert_eq!(player.stun_remaining(), tuning.stun_ticks);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerStunned { .. })));
    }

    #[test]
    fn test_miss_outside_radius() {
        let tuning = ProjectileTuning::default();
        let target = Vec2::new(200.0, 100.0);
        let mut player = Player::new(target + Vec2::new(tuning.impact_radius + 1.0, 0.0));
        let mut projectile = Projectile::new(Vec2::new(100.0, 100.0), target, tuning);
        let mut events = EventQueue::new();

        run_until_landed(&mut projectile, &mut player, &mut events);

        assert!(!projectile.hit);
        assert_eq!(player.health.current, player.health.max);
        assert!(!player.is_stunned());
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileImpacted { hit: false, .. })));
    }

    #[test]
    fn test_stunned_player_still_takes_damage() {
        let tuning = ProjectileTuning::default();
        let target = Vec2::new(50.0, 0.0);
        let mut player = Player::new(target);
        player.apply_stun(5);
        let mut projectile = Projectile::new(Vec2::ZERO, target, tuning);
        let mut events = EventQueue::new();

        run_until_landed(&mut projectile, &mut player, &mut events);

        assert_eq!(player.health.current, player.health.max - tuning.damage);
        assert_eq!(player.stun_remaining(), 5);
    }

    #[test]
    fn test_impact_window_then_expired() {
        let tuning = ProjectileTuning {
            impact_ticks: 3,
            ..ProjectileTuning::default()
        };
        let mut player = Player::new(Vec2::new(500.0, 500.0));
        let mut projectile = Projectile::new(Vec2::ZERO, Vec2::new(2.0, 0.0), tuning);
        let mut events = EventQueue::new();

        projectile.update(Some(&mut player), &mut events);
        assert_eq!(projectile.phase, ProjectilePhase::Impacted { ticks: 3 });
        for _ in 0..3 {
            assert!(projectile.is_active());
            projectile.update(Some(&mut player), &mut events);
        }
        assert!(!projectile.is_active());

        // Inactive projectiles do nothing
        let before = events.len();
        projectile.update(Some(&mut player), &mut events);
        assert_eq!(events.len(), before);
        assert_eq!(projectile.phase, ProjectilePhase::Expired);
    }
}
