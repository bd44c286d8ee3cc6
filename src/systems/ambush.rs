//! Ambusher AI: hides in plain sight, lashes a tongue, reels in and holds.
//!
//! Flow: disguised until the player comes close, a short reveal, an attack
//! telegraph, then the first tongue lash. Afterwards it pursues and lashes
//! again whenever the cooldown allows. A lash that lands turns into a pull;
//! a pull that reaches the player becomes a grab the player must mash out of.

use glam::Vec2;

use crate::actor::{ActorBody, ActorId, Behavior, Removal, TickContext};
use crate::config::AmbushTuning;
use crate::events::{EventQueue, GameEvent, GrabEndReason};
use crate::player::StatusTarget;
use crate::systems::movement::step_toward;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbushState {
    Disguised,
    Revealing { ticks: u32 },
    /// Telegraph before the first lash
    Attacking { ticks: u32 },
    /// Pursuing, lashing when off cooldown
    Active,
    TongueExtend { aim: Vec2, length: f32 },
    TongueRetract { length: f32 },
    /// Reeling toward the live target position
    Pulling { length: f32 },
    Grabbing { damage_timer: u32, escape_progress: u32 },
}

#[derive(Debug, Clone)]
pub struct AmbushBrain {
    pub state: AmbushState,
    /// Ticks until the next lash is allowed
    pub tongue_cooldown: u32,
    tuning: AmbushTuning,
}

impl AmbushBrain {
    pub fn new(tuning: AmbushTuning) -> Self {
        Self {
            state: AmbushState::Disguised,
            tongue_cooldown: 0,
            tuning,
        }
    }

    pub fn is_disguised(&self) -> bool {
        self.state == AmbushState::Disguised
    }

    pub fn is_player_grabbed(&self) -> bool {
        matches!(self.state, AmbushState::Grabbing { .. })
    }

    /// Escape inputs counted so far (zero when not grabbing)
    pub fn escape_progress(&self) -> u32 {
        match self.state {
            AmbushState::Grabbing { escape_progress, .. } => escape_progress,
            _ => 0,
        }
    }

    /// Current tongue length, if the tongue is out
    pub fn tongue_length(&self) -> Option<f32> {
        match self.state {
            AmbushState::TongueExtend { length, .. }
            | AmbushState::TongueRetract { length }
            | AmbushState::Pulling { length } => Some(length),
            _ => None,
        }
    }

    /// One escape input from the player. Ignored unless grabbing.
    /// Returns whether the player broke free.
    pub fn escape_attempt(&mut self, id: ActorId, target: &mut dyn StatusTarget, events: &mut EventQueue) -> bool {
        let AmbushState::Grabbing {
            damage_timer,
            escape_progress,
        } = self.state
        else {
            return false;
        };

        let escape_progress = escape_progress + 1;
        if escape_progress < self.tuning.escape_threshold {
            self.state = AmbushState::Grabbing {
                damage_timer,
                escape_progress,
            };
            return false;
        }

        target.release_grab(id);
        tracing::info!("player escaped the grab of {:?}", id);
        events.push(GameEvent::GrabReleased {
            actor: id,
            reason: GrabEndReason::Escaped,
        });
        self.state = AmbushState::Active;
        self.tongue_cooldown = self.tuning.tongue_cooldown_ticks;
        true
    }

    fn reveal(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>) {
        tracing::debug!("ambusher {:?} revealed at {:?}", body.id, body.position);
        ctx.events.push(GameEvent::ActorRevealed { actor: body.id });
        self.state = AmbushState::Revealing {
            ticks: self.tuning.reveal_ticks,
        };
    }

    fn launch_tongue(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>, aim: Vec2) {
        ctx.events.push(GameEvent::TongueLaunched { actor: body.id, aim });
        self.state = AmbushState::TongueExtend { aim, length: 0.0 };
    }

    fn start_retract(&mut self, length: f32) {
        self.state = AmbushState::TongueRetract { length };
    }

    fn extend(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>, aim: Vec2, length: f32, target: Vec2) {
        let max = self.tuning.tongue_max_length;
        let length = (length + self.tuning.tongue_extend_speed).min(max);
        if length < self.tuning.hit_check_fraction * max {
            self.state = AmbushState::TongueExtend { aim, length };
            return;
        }

        // The single hit check
        let to_aim = aim - body.position;
        let tip = body.position + to_aim.normalize_or_zero() * length.min(to_aim.length());
        let tip_on_aim = tip.distance(aim) <= self.tuning.tip_tolerance;
        let target_on_aim = target.distance(aim) <= self.tuning.target_tolerance;

        if tip_on_aim && target_on_aim {
            tracing::debug!("ambusher {:?} caught the player, pulling", body.id);
            ctx.events.push(GameEvent::PullStarted { actor: body.id });
            self.state = AmbushState::Pulling {
                length: body.distance_to(target),
            };
        } else {
            ctx.events.push(GameEvent::TongueWhiffed { actor: body.id });
            self.start_retract(length);
        }
    }

    fn pull(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>, target: Vec2) {
        let before = body.position;
        body.move_to(step_toward(ctx.grid, before, target, self.tuning.pull_speed));
        let distance = body.distance_to(target);

        if distance <= self.tuning.grab_distance {
            self.try_grab(body, ctx, distance);
        } else if body.position == before {
            // Walls in the way
            self.start_retract(distance);
        } else {
            self.state = AmbushState::Pulling { length: distance };
        }
    }

    fn try_grab(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>, distance: f32) {
        let Some(player) = ctx.target_mut() else {
            return;
        };
        if !player.try_grab(body.id) {
            self.start_retract(distance);
            return;
        }
        player.set_position(body.position);
        tracing::info!("ambusher {:?} grabbed the player", body.id);
        ctx.events.push(GameEvent::PlayerGrabbed { actor: body.id });
        self.state = AmbushState::Grabbing {
            damage_timer: self.tuning.grab_damage_interval,
            escape_progress: 0,
        };
    }

    fn hold(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>, damage_timer: u32, escape_progress: u32) {
        let Some(player) = ctx.target_mut() else {
            return;
        };
        if player.grab_holder() != Some(body.id) {
            self.state = AmbushState::Active;
            return;
        }
        player.set_position(body.position);

        let damage_timer = damage_timer.saturating_sub(1);
        if damage_timer > 0 {
            self.state = AmbushState::Grabbing {
                damage_timer,
                escape_progress,
            };
            return;
        }

        let damage = player.take_damage(self.tuning.grab_damage);
        ctx.events.push(GameEvent::GrabDamage { actor: body.id, damage });
        self.state = AmbushState::Grabbing {
            damage_timer: self.tuning.grab_damage_interval,
            escape_progress,
        };
    }

    /// Drop the player if held; used when the target goes away or on removal
    fn release_hold(&mut self, body: &ActorBody, ctx: &mut TickContext<'_>, reason: GrabEndReason) {
        let released = ctx
            .target_mut()
            .map(|player| player.release_grab(body.id))
            .unwrap_or(false);
        if released {
            tracing::info!("{:?} released the player ({:?})", body.id, reason);
            ctx.events.push(GameEvent::GrabReleased { actor: body.id, reason });
        }
    }

    fn pursue_or_lash(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>, target: Vec2) {
        let distance = body.distance_to(target);
        if self.tongue_cooldown == 0 && distance <= self.tuning.tongue_max_length {
            self.launch_tongue(body, ctx, target);
        } else if distance > self.tuning.stop_distance {
            body.move_to(step_toward(ctx.grid, body.position, target, body.stats.speed));
        }
    }
}

impl Behavior for AmbushBrain {
    fn state_name(&self) -> &'static str {
        match self.state {
            AmbushState::Disguised => "disguised",
            AmbushState::Revealing { .. } => "revealing",
            AmbushState::Attacking { .. } => "attacking",
            AmbushState::Active => "active",
            AmbushState::TongueExtend { .. } => "tongue_extend",
            AmbushState::TongueRetract { .. } => "tongue_retract",
            AmbushState::Pulling { .. } => "pulling",
            AmbushState::Grabbing { .. } => "grabbing",
        }
    }

    fn think(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        puffin::profile_function!();

        self.tongue_cooldown = self.tongue_cooldown.saturating_sub(1);

        let Some(target) = ctx.target_position() else {
            if self.is_player_grabbed() {
                self.release_hold(body, ctx, GrabEndReason::Cleared);
                self.state = AmbushState::Active;
            }
            return;
        };
        if !self.is_disguised() {
            body.face_toward(target);
        }

        match self.state {
            AmbushState::Disguised => {
                // Proximity alone breaks the disguise
                if body.distance_to(target) <= self.tuning.detection_radius {
                    self.reveal(body, ctx);
                }
            }
            AmbushState::Revealing { ticks } => {
                let ticks = ticks.saturating_sub(1);
                self.state = if ticks == 0 {
                    AmbushState::Attacking {
                        ticks: self.tuning.telegraph_ticks,
                    }
                } else {
                    AmbushState::Revealing { ticks }
                };
            }
            AmbushState::Attacking { ticks } => {
                let ticks = ticks.saturating_sub(1);
                if ticks == 0 {
                    self.launch_tongue(body, ctx, target);
                } else {
                    self.state = AmbushState::Attacking { ticks };
                }
            }
            AmbushState::Active => self.pursue_or_lash(body, ctx, target),
            AmbushState::TongueExtend { aim, length } => self.extend(body, ctx, aim, length, target),
            AmbushState::TongueRetract { length } => {
                let length = length - self.tuning.tongue_retract_speed;
                if length <= 0.0 {
                    self.state = AmbushState::Active;
                    self.tongue_cooldown = self.tuning.tongue_cooldown_ticks;
                } else {
                    self.state = AmbushState::TongueRetract { length };
                }
            }
            AmbushState::Pulling { .. } => self.pull(body, ctx, target),
            AmbushState::Grabbing {
                damage_timer,
                escape_progress,
            } => self.hold(body, ctx, damage_timer, escape_progress),
        }
    }

    fn on_damaged(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>) {
        if self.is_disguised() {
            self.reveal(body, ctx);
        }
    }

    fn on_removed(&mut self, body: &mut ActorBody, ctx: &mut TickContext<'_>, removal: Removal) {
        let reason = match removal {
            Removal::Died => GrabEndReason::HolderDied,
            Removal::Cleared => GrabEndReason::Cleared,
        };
        // Unconditional: a no-op unless this actor holds the player
        self.release_hold(body, ctx, reason);
        self.state = AmbushState::Active;
    }

    fn deals_contact_damage(&self) -> bool {
        !matches!(
            self.state,
            AmbushState::Disguised | AmbushState::Pulling { .. } | AmbushState::Grabbing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::testing::Harness;
    use crate::actor::{Actor, Brain};
    use crate::components::ActorStats;

    fn make_ambusher(position: Vec2, state: AmbushState) -> Actor {
        let tuning = AmbushTuning::default();
        let stats = ActorStats {
            speed: tuning.speed,
            contact_damage: tuning.contact_damage,
            detection_radius: tuning.detection_radius,
            attack_radius: tuning.tongue_max_length,
        };
        let mut brain = AmbushBrain::new(tuning);
        brain.state = state;
        Actor::new(ActorBody::new(ActorId(5), position, tuning.health, stats), Brain::Ambush(brain))
    }

    fn state(actor: &Actor) -> AmbushState {
        actor.as_ambush().unwrap().state
    }

    /// Update until the tongue leaves its extend phase
    fn resolve_lash(actor: &mut Actor, harness: &mut Harness) {
        for _ in 0..100 {
            actor.update(&mut harness.ctx());
            if !matches!(state(actor), AmbushState::TongueExtend { .. }) {
                return;
            }
        }
        panic!("tongue never resolved");
    }

    fn grab_player(actor: &mut Actor, harness: &mut Harness) {
        for _ in 0..200 {
            actor.update(&mut harness.ctx());
            if actor.as_ambush().unwrap().is_player_grabbed() {
                return;
            }
        }
        panic!("never grabbed");
    }

    #[test]
    fn test_reveals_on_proximity_without_sight() {
        // A wall between them does not matter
        let grid = crate::grid::Grid::from_ascii(&["..........", "...#......", ".........."]).unwrap();
        let mut harness = Harness::new(grid, crate::grid::tile_center(4, 1));
        let mut actor = make_ambusher(crate::grid::tile_center(2, 1), AmbushState::Disguised);

        actor.update(&mut harness.ctx());
        assert!(matches!(state(&actor), AmbushState::Revealing { .. }));
        assert!(harness.events.iter().any(|e| matches!(e, GameEvent::ActorRevealed { .. })));
    }

    #[test]
    fn test_stays_disguised_when_far() {
        let mut harness = Harness::open(20, 20, Vec2::new(500.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Disguised);
        for _ in 0..30 {
            actor.update(&mut harness.ctx());
        }
        assert_eq!(state(&actor), AmbushState::Disguised);
        assert_eq!(actor.body.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_reveal_then_telegraph_then_lash() {
        let tuning = AmbushTuning::default();
        let mut harness = Harness::open(20, 20, Vec2::new(180.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Disguised);

        actor.update(&mut harness.ctx());
        for _ in 0..tuning.reveal_ticks {
            actor.update(&mut harness.ctx());
        }
        assert!(matches!(state(&actor), AmbushState::Attacking { .. }));
        for _ in 0..tuning.telegraph_ticks {
            actor.update(&mut harness.ctx());
        }
        assert!(matches!(state(&actor), AmbushState::TongueExtend { length, .. } if length == 0.0));
    }

    #[test]
    fn test_damage_breaks_disguise() {
        let mut harness = Harness::open(20, 20, Vec2::new(600.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Disguised);
        actor.take_damage(5, &mut harness.ctx());
        assert!(matches!(state(&actor), AmbushState::Revealing { .. }));
    }

    #[test]
    fn test_lash_converts_to_pull_within_target_tolerance() {
        let aim = Vec2::new(200.0, 100.0);
        let mut harness = Harness::open(20, 20, aim);
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);

        actor.update(&mut harness.ctx());
        assert!(matches!(state(&actor), AmbushState::TongueExtend { .. }));

        harness.player.position = aim + Vec2::new(0.0, 50.0);
        resolve_lash(&mut actor, &mut harness);
        assert!(matches!(state(&actor), AmbushState::Pulling { .. }));
    }

    #[test]
    fn test_lash_whiffs_when_target_drifted() {
        let aim = Vec2::new(200.0, 100.0);
        let mut harness = Harness::open(20, 20, aim);
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);

        actor.update(&mut harness.ctx());
        harness.player.position = aim + Vec2::new(0.0, 70.0);
        resolve_lash(&mut actor, &mut harness);

        assert!(matches!(state(&actor), AmbushState::TongueRetract { .. }));
        assert!(harness.events.iter().any(|e| matches!(e, GameEvent::TongueWhiffed { .. })));

        // Retracts fully, then waits out the cooldown
        for _ in 0..20 {
            actor.update(&mut harness.ctx());
        }
        assert_eq!(state(&actor), AmbushState::Active);
        assert!(actor.as_ambush().unwrap().tongue_cooldown > 0);
    }

    #[test]
    fn test_pull_ends_in_grab() {
        let tuning = AmbushTuning::default();
        let mut harness = Harness::open(20, 20, Vec2::new(230.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);

        grab_player(&mut actor, &mut harness);

        assert_eq!(harness.player.grab_holder(), Some(ActorId(5)));
        assert_eq!(harness.player.position, actor.body.position);
        assert!(actor.body.distance_to(Vec2::new(230.0, 100.0)) <= tuning.grab_distance);
        assert_eq!(actor.as_ambush().unwrap().escape_progress(), 0);
    }

    #[test]
    fn test_grab_deals_periodic_damage() {
        let tuning = AmbushTuning::default();
        let mut harness = Harness::open(20, 20, Vec2::new(230.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);
        grab_player(&mut actor, &mut harness);
        let health = harness.player.health.current;

        for _ in 0..tuning.grab_damage_interval {
            actor.update(&mut harness.ctx());
        }
        assert_eq!(harness.player.health.current, health - tuning.grab_damage);
    }

    #[test]
    fn test_escape_counts_only_while_grabbed() {
        let threshold = AmbushTuning::default().escape_threshold;
        let mut harness = Harness::open(20, 20, Vec2::new(230.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);
        let id = actor.id();

        // Not grabbed yet: ignored
        {
            let brain = actor.as_ambush_mut().unwrap();
            assert!(!brain.escape_attempt(id, &mut harness.player, &mut harness.events));
            assert_eq!(brain.escape_progress(), 0);
        }

        grab_player(&mut actor, &mut harness);
        let brain = actor.as_ambush_mut().unwrap();
        for n in 1..threshold {
            assert!(!brain.escape_attempt(id, &mut harness.player, &mut harness.events));
            assert_eq!(brain.escape_progress(), n);
        }
        assert!(brain.escape_attempt(id, &mut harness.player, &mut harness.events));
        assert!(!brain.is_player_grabbed());
        assert_eq!(brain.state, AmbushState::Active);

        assert!(!harness.player.is_grabbed());
        assert!(harness.events.iter().any(|e| matches!(
            e,
            GameEvent::GrabReleased {
                reason: GrabEndReason::Escaped,
                ..
            }
        )));
    }

    #[test]
    fn test_death_releases_grab() {
        let mut harness = Harness::open(20, 20, Vec2::new(230.0, 100.0));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);
        grab_player(&mut actor, &mut harness);

        actor.take_damage(10_000, &mut harness.ctx());
        assert!(!actor.is_alive());
        assert!(!harness.player.is_grabbed());
        assert!(harness.events.iter().any(|e| matches!(
            e,
            GameEvent::GrabReleased {
                reason: GrabEndReason::HolderDied,
                ..
            }
        )));
    }

    #[test]
    fn test_grab_refused_when_someone_else_holds() {
        let mut harness = Harness::open(20, 20, Vec2::new(230.0, 100.0));
        harness.player.try_grab(ActorId(99));
        let mut actor = make_ambusher(Vec2::new(100.0, 100.0), AmbushState::Active);

        for _ in 0..100 {
            actor.update(&mut harness.ctx());
        }
        assert!(!actor.as_ambush().unwrap().is_player_grabbed());
        assert_eq!(harness.player.grab_holder(), Some(ActorId(99)));
    }
}
