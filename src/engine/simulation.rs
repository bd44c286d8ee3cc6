//! Encounter simulation - the per-tick pass and player-driven inputs.

use crate::actor::ActorId;
use crate::constants::PLAYER_MELEE_RANGE;
use crate::player::Player;
use crate::roster::{damage_from_player, reap_monsters, HostileId, HostileRoster};
use crate::systems::combat::{melee_damage, remove_dead_actors};
use crate::systems::projectile::Projectile;

use super::Encounter;

impl Encounter {
    /// Advance one fixed tick.
    ///
    /// Order: player status upkeep, every living actor in spawn order,
    /// projectiles (including ones thrown this tick), removal of the dead and
    /// the spent, then fog of war for the player's new surroundings.
    pub fn tick(&mut self, player: &mut Player) {
        puffin::profile_function!();

        self.tick_count += 1;
        player.tick();

        let mut spawned: Vec<Projectile> = Vec::new();
        for actor in self.actors.iter_mut() {
            if !actor.is_alive() {
                continue;
            }
            let mut ctx = Self::context(
                &self.grid,
                Some(&mut *player),
                &mut self.roster,
                &mut self.events,
                &mut spawned,
                &mut self.rng,
                &self.tuning,
            );
            actor.update(&mut ctx);
        }

        if !spawned.is_empty() {
            tracing::debug!("{} projectile(s) launched", spawned.len());
        }
        self.projectiles.append(&mut spawned);
        for projectile in self.projectiles.iter_mut() {
            projectile.update(Some(&mut *player), &mut self.events);
        }

        remove_dead_actors(&mut self.actors);
        self.projectiles.retain(Projectile::is_active);
        reap_monsters(&mut self.roster, player, &mut self.events);

        self.visibility
            .update_for_viewer(&self.grid, player.position, &self.tuning.vision, player.stats.wisdom);
    }

    /// Route one escape input to whoever holds the player.
    /// Returns whether the player broke free; a no-op when not grabbed.
    pub fn escape_attempt(&mut self, player: &mut Player) -> bool {
        let Some(holder) = self.player_grabbed_by() else {
            return false;
        };
        let events = &mut self.events;
        self.actors
            .iter_mut()
            .find(|a| a.id() == holder)
            .and_then(|actor| {
                let id = actor.id();
                actor.as_ambush_mut().map(|brain| brain.escape_attempt(id, player, events))
            })
            .unwrap_or(false)
    }

    /// Player melee against an actor within reach.
    /// Returns the health removed, or `None` if the actor is absent, dead or out of reach.
    pub fn player_attack_actor(&mut self, player: &mut Player, target: ActorId) -> Option<i32> {
        if !player.can_move() {
            return None;
        }
        let damage = melee_damage(&player.stats);
        let actor = self
            .actors
            .iter_mut()
            .find(|a| a.id() == target && a.is_alive())?;
        if actor.body.distance_to(player.position) > PLAYER_MELEE_RANGE {
            return None;
        }

        let mut ctx = Self::context(
            &self.grid,
            Some(&mut *player),
            &mut self.roster,
            &mut self.events,
            &mut self.projectiles,
            &mut self.rng,
            &self.tuning,
        );
        Some(actor.take_damage(damage, &mut ctx))
    }

    /// Player melee against a roster monster within reach. Kills earn XP when reaped.
    pub fn player_attack_monster(&mut self, player: &Player, target: HostileId) -> Option<bool> {
        if !player.can_move() {
            return None;
        }
        let view = self.roster.hostile(target).filter(|h| h.alive)?;
        if view.position.distance(player.position) > PLAYER_MELEE_RANGE {
            return None;
        }
        Some(damage_from_player(&mut self.roster, target, melee_damage(&player.stats)))
    }
}
