//! Sentinel AI: a guard that hunts roster hostiles, never the player.
//!
//! Patrols around its anchor, chases the nearest hostile that comes within
//! detection range, strikes it through the no-reward damage path, and walks
//! home once the hunt is over.

use glam::Vec2;
use rand::Rng;

use crate::actor::{ActorBody, Behavior, TickContext};
use crate::config::SentinelTuning;
use crate::events::GameEvent;
use crate::roster::{HostileId, HostileView};
use crate::systems::movement::step_toward;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SentinelState {
    Patrol,
    Pursue { target: HostileId },
    /// `windup` counts down to a strike; `cooldown` runs after one
    Attack { target: HostileId, windup: u32, cooldown: u32 },
    Return,
}

#[derive(Debug, Clone)]
pub struct SentinelBrain {
    pub state: SentinelState,
    waypoint: Option<Vec2>,
    tuning: SentinelTuning,
}

impl SentinelBrain {
    pub fn new(tuning: SentinelTuning) -> Self {
        Self {
            state: SentinelState::Patrol,
            waypoint: None,
            tuning,
        }
    }

    /// Hostile currently being hunted, if any
    pub fn target(&self) -> Option<HostileId> {
        match self.state {
            SentinelState::Pursue { target } | SentinelState::Attack { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Nearest living hostile inside the detection radius (first in roster order on ties)
    fn scan(&self, body: &ActorBody, ctx: &TickContext<'_>) -> Option<HostileView> {
        ctx.roster
            .hostiles()
            .into_iter()
            .filter(|h| h.alive && body.distance_to(h.position) <= self.tuning.detection_radius)
            .fold(None, |best: Option<HostileView>, h| match best {
                Some(b) if body.distance_to(b.position) <= body.distance_to(h.position) => Some(b),
                _ => Some(h),
            })
    }

    fn living(&self, ctx: &TickContext<'_>, id: HostileId) -> Option<HostileView> {
        ctx.roster.hostile(id).filter(|h| h.alive)
    }

    fn wander(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        let reached = self
            .waypoint
            .map(|w| body.distance_to(w) <= self.tuning.return_tolerance)
            .unwrap_or(true);
        if reached {
            let r = self.tuning.patrol_radius.max(0.0);
            let offset = Vec2::new(ctx.rng.gen_range(-r..=r), ctx.rng.gen_range(-r..=r));
            let candidate = body.anchor + offset;
            // Unreachable picks are dropped; try again next tick
            self.waypoint = ctx.grid.is_walkable_world(candidate).then_some(candidate);
        }
        if let Some(waypoint) = self.waypoint {
            let next = step_toward(ctx.grid, body.position, waypoint, body.stats.speed);
            if next == body.position {
                self.waypoint = None;
            }
            body.move_to(next);
        }
    }

    fn strike(&self, body: &ActorBody, ctx: &mut TickContext<'_>, target: HostileId) -> bool {
        let damage = self.tuning.strike_damage;
        let killed = ctx.roster.damage_no_reward(target, damage);
        tracing::debug!("sentinel {:?} struck {:?} for {} (killed: {})", body.id, target, damage, killed);
        ctx.events.push(GameEvent::SentinelStruck {
            actor: body.id,
            hostile: target,
            damage,
            killed,
        });
        killed
    }

    fn attack(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>, target: HostileId, windup: u32, cooldown: u32) {
        let Some(view) = self.living(ctx, target) else {
            self.state = SentinelState::Return;
            return;
        };
        body.face_toward(view.position);
        let in_range = body.distance_to(view.position) <= self.tuning.attack_range;

        if cooldown > 0 {
            let cooldown = cooldown - 1;
            self.state = if !in_range {
                SentinelState::Pursue { target }
            } else if cooldown == 0 {
                SentinelState::Attack {
                    target,
                    windup: self.tuning.windup_ticks,
                    cooldown: 0,
                }
            } else {
                SentinelState::Attack {
                    target,
                    windup: 0,
                    cooldown,
                }
            };
            return;
        }

        if !in_range {
            self.state = SentinelState::Pursue { target };
            return;
        }

        let windup = windup.saturating_sub(1);
        if windup > 0 {
            self.state = SentinelState::Attack {
                target,
                windup,
                cooldown: 0,
            };
            return;
        }

        if self.strike(body, ctx, target) {
            self.state = SentinelState::Return;
        } else if self.tuning.cooldown_ticks == 0 {
            self.state = SentinelState::Attack {
                target,
                windup: self.tuning.windup_ticks,
                cooldown: 0,
            };
        } else {
            self.state = SentinelState::Attack {
                target,
                windup: 0,
                cooldown: self.tuning.cooldown_ticks,
            };
        }
    }
}

impl Behavior for SentinelBrain {
    fn state_name(&self) -> &'static str {
        match self.state {
            SentinelState::Patrol => "patrol",
            SentinelState::Pursue { .. } => "pursue",
            SentinelState::Attack { .. } => "attack",
            SentinelState::Return => "return",
        }
    }

    fn think(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        puffin::profile_function!();

        match self.state {
            SentinelState::Patrol => {
                if let Some(hostile) = self.scan(body, ctx) {
                    tracing::debug!("sentinel {:?} engaging {:?}", body.id, hostile.id);
                    ctx.events.push(GameEvent::SentinelEngaged {
                        actor: body.id,
                        hostile: hostile.id,
                    });
                    self.waypoint = None;
                    self.state = SentinelState::Pursue { target: hostile.id };
                } else {
                    self.wander(body, ctx);
                }
            }
            SentinelState::Pursue { target } => {
                let leash = 2.0 * self.tuning.detection_radius;
                match self.living(ctx, target) {
                    Some(view) if body.distance_to(view.position) <= leash => {
                        body.face_toward(view.position);
                        if body.distance_to(view.position) <= self.tuning.attack_range {
                            self.state = SentinelState::Attack {
                                target,
                                windup: self.tuning.windup_ticks,
                                cooldown: 0,
                            };
                        } else {
                            body.move_to(step_toward(ctx.grid, body.position, view.position, body.stats.speed));
                        }
                    }
                    _ => self.state = SentinelState::Return,
                }
            }
            SentinelState::Attack {
                target,
                windup,
                cooldown,
            } => self.attack(body, ctx, target, windup, cooldown),
            SentinelState::Return => {
                let home = body.anchor;
                if body.distance_to(home) <= self.tuning.return_tolerance {
                    self.state = SentinelState::Patrol;
                } else {
                    body.face_toward(home);
                    body.move_to(step_toward(ctx.grid, body.position, home, body.stats.speed));
                }
            }
        }
    }

    fn deals_contact_damage(&self) -> bool {
        false
    }
}
