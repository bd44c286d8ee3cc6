//! Boss AI: a kiting ranged attacker.
//!
//! The boss holds its target inside a distance band, throws an arcing
//! projectile at a snapshotted point after a windup, then recovers. It takes
//! reduced damage and enrages once, either from low health or from time alive.

use glam::Vec2;

use crate::actor::{ActorBody, Behavior, Removal, TickContext};
use crate::config::{BossTuning, ProjectileTuning};
use crate::events::GameEvent;
use crate::systems::movement::{step_away, step_toward};
use crate::systems::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossState {
    /// Target not yet noticed
    Idle,
    KiteAway,
    KiteToward,
    /// Inside the preferred band
    Hold,
    /// Telegraphing a throw at `aim`
    Windup { ticks: u32, aim: Vec2 },
    /// Post-throw cooldown; distance regulation continues
    Recover { ticks: u32 },
}

#[derive(Debug, Clone)]
pub struct BossBrain {
    pub state: BossState,
    enraged: bool,
    tuning: BossTuning,
    projectile: ProjectileTuning,
}

impl BossBrain {
    pub fn new(tuning: BossTuning, projectile: ProjectileTuning) -> Self {
        Self {
            state: BossState::Idle,
            enraged: false,
            tuning,
            projectile,
        }
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    fn windup_ticks(&self) -> u32 {
        self.scaled(self.tuning.windup_ticks)
    }

    fn recover_ticks(&self) -> u32 {
        self.scaled(self.tuning.recover_ticks)
    }

    /// Halve a duration while enraged, never below one tick
    fn scaled(&self, ticks: u32) -> u32 {
        if self.enraged {
            (ticks / 2).max(1)
        } else {
            ticks
        }
    }

    fn check_enrage(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        if self.enraged {
            return;
        }
        let health_trigger =
            body.health.current as f32 <= self.tuning.enrage_health_fraction * body.health.max as f32;
        let time_trigger = body.alive_ticks >= self.tuning.enrage_after_ticks;
        if !(health_trigger || time_trigger) {
            return;
        }

        self.enraged = true;
        body.stats.speed *= self.tuning.enrage_speed_mult;
        tracing::info!(
            "boss {:?} enraged ({} hp, {} ticks alive)",
            body.id,
            body.health.current,
            body.alive_ticks
        );
        ctx.events.push(GameEvent::BossEnraged { actor: body.id });
    }

    /// Keep the target inside the kite band. Returns the band state.
    fn regulate_distance(&self, body: &mut ActorBody, ctx: &TickContext<'_>, target: Vec2) -> BossState {
        let distance = body.distance_to(target);
        let speed = body.stats.speed;
        if distance < self.tuning.kite_inner {
            body.move_to(step_away(ctx.grid, body.position, target, speed));
            BossState::KiteAway
        } else if distance > self.tuning.kite_outer {
            body.move_to(step_toward(ctx.grid, body.position, target, speed));
            BossState::KiteToward
        } else {
            BossState::Hold
        }
    }

    fn throw(&self, body: &ActorBody, ctx: &mut TickContext<'_>, aim: Vec2) {
        tracing::debug!("boss {:?} throws at {:?}", body.id, aim);
        ctx.spawned.push(Projectile::new(body.position, aim, self.projectile));
        ctx.events.push(GameEvent::ProjectileLaunched {
            from: body.position,
            to: aim,
        });
    }
}

impl Behavior for BossBrain {
    fn state_name(&self) -> &'static str {
        match self.state {
            BossState::Idle => "idle",
            BossState::KiteAway => "kite_away",
            BossState::KiteToward => "kite_toward",
            BossState::Hold => "hold",
            BossState::Windup { .. } => "windup",
            BossState::Recover { .. } => "recover",
        }
    }

    fn think(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        puffin::profile_function!();

        self.check_enrage(body, ctx);

        let Some(target) = ctx.target_position() else {
            return;
        };
        body.face_toward(target);

        match self.state {
            BossState::Windup { ticks, aim } => {
                let ticks = ticks.saturating_sub(1);
                if ticks == 0 {
                    self.throw(body, ctx, aim);
                    self.state = BossState::Recover {
                        ticks: self.recover_ticks(),
                    };
                } else {
                    self.state = BossState::Windup { ticks, aim };
                }
            }
            BossState::Recover { ticks } => {
                self.regulate_distance(body, ctx, target);
                let ticks = ticks.saturating_sub(1);
                self.state = if ticks == 0 {
                    // Settle back into the band state next tick
                    BossState::Hold
                } else {
                    BossState::Recover { ticks }
                };
            }
            BossState::Idle if body.distance_to(target) > body.stats.detection_radius => {}
            BossState::Idle | BossState::KiteAway | BossState::KiteToward | BossState::Hold => {
                self.state = self.regulate_distance(body, ctx, target);
                if body.distance_to(target) <= self.tuning.attack_range {
                    self.state = BossState::Windup {
                        ticks: self.windup_ticks(),
                        aim: target,
                    };
                }
            }
        }
    }

    fn modify_damage(&self, amount: i32) -> i32 {
        (amount.max(0) as f32 * self.tuning.damage_taken_mult).floor() as i32
    }

    fn on_removed(&mut self, _body: &mut ActorBody, _ctx: &mut TickContext<'_>, _removal: Removal) {
        // Any pending throw is dropped
        self.state = BossState::Idle;
    }
}
