//! Headless demo: one scripted run through an arena with every hostile kind.
//!
//! Usage: `grid-hostiles [tuning.json]`. Set `RUST_LOG=debug` to see every
//! state transition.

use std::path::Path;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use grid_hostiles::constants::{PLAYER_MELEE_RANGE, TICKS_PER_SECOND};
use grid_hostiles::events::GameEvent;
use grid_hostiles::grid::{tile_center, world_to_tile};
use grid_hostiles::spawning::{monsters, SpawnConfig, SpawnEntry, AMBUSHER, BOSS, SENTINEL};
use grid_hostiles::systems::xp_progress;
use grid_hostiles::{Encounter, Grid, Player, StatusTarget, Tuning};

const ARENA: &[&str] = &[
    "##############################",
    "#............................#",
    "#............................#",
    "#.......~~~..................#",
    "#.......~~~.......#####......#",
    "#.................#..........#",
    "#.................#..........#",
    "#.....+...........#..........#",
    "#############.#####..........#",
    "#............................#",
    "#............................#",
    "#............................#",
    "##############################",
];

const DEMO_SECONDS: u32 = 60;
const PLAYER_WALK_SPEED: f32 = 1.8;
const SEED: u64 = 0x5EED;

/// Walk a fixed loop of waypoints, fight back when something is in reach,
/// mash escape while grabbed.
struct ScriptedPlayer {
    route: Vec<Vec2>,
    next: usize,
}

impl ScriptedPlayer {
    fn new() -> Self {
        let route = [(3, 2), (26, 2), (26, 10), (3, 10), (13, 8), (3, 2)]
            .iter()
            .map(|&(x, y)| tile_center(x, y))
            .collect();
        Self { route, next: 0 }
    }

    fn act(&mut self, encounter: &mut Encounter, player: &mut Player) {
        if player.is_grabbed() {
            if encounter.escape_attempt(player) {
                tracing::info!("player broke free");
            }
            return;
        }

        let in_reach = encounter
            .actors()
            .iter()
            .filter(|a| a.is_alive() && a.body.distance_to(player.position) <= PLAYER_MELEE_RANGE)
            .map(|a| a.id())
            .next();
        if let Some(id) = in_reach {
            if let Some(dealt) = encounter.player_attack_actor(player, id) {
                tracing::debug!("player hit {:?} for {}", id, dealt);
            }
            return;
        }

        let waypoint = self.route[self.next];
        if player.position.distance(waypoint) <= PLAYER_WALK_SPEED {
            self.next = (self.next + 1) % self.route.len();
            return;
        }
        let step = (waypoint - player.position).normalize_or_zero() * PLAYER_WALK_SPEED;
        player.try_move(encounter.grid(), step);
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ActorStateChanged { .. } | GameEvent::ContactHit { .. } | GameEvent::GrabDamage { .. } => {
            tracing::debug!("{:?}", event)
        }
        _ => tracing::info!("{:?}", event),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(Path::new(&path))?,
        None => Tuning::default(),
    };

    let grid = Grid::from_ascii(ARENA)?;
    let mut encounter = Encounter::new(grid, tuning, SEED);
    let mut player = Player::new(tile_center(3, 2));

    encounter.spawn_actor(&BOSS, tile_center(22, 10));
    encounter.spawn_actor(&AMBUSHER, tile_center(15, 2));
    encounter.spawn_actor(&SENTINEL, tile_center(24, 6));

    let mut rng = StdRng::seed_from_u64(SEED);
    let free_tiles: Vec<(i32, i32)> = (0..encounter.grid().height as i32)
        .flat_map(|y| (0..encounter.grid().width as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| encounter.grid().is_walkable(x, y))
        .collect();
    let occupied = [world_to_tile(player.position)];
    let population = SpawnConfig {
        entries: vec![
            SpawnEntry {
                monster: monsters::RAT,
                count: 4,
            },
            SpawnEntry {
                monster: monsters::SKELETON,
                count: 2,
            },
        ],
    };
    let spawned = population.spawn_all(encounter.roster_mut(), &free_tiles, &occupied, &mut rng);
    tracing::info!("arena ready: {} actors, {} monsters", encounter.actors().len(), spawned);

    let mut script = ScriptedPlayer::new();
    for _ in 0..DEMO_SECONDS * TICKS_PER_SECOND {
        script.act(&mut encounter, &mut player);
        encounter.tick(&mut player);
        for event in encounter.drain_events() {
            log_event(&event);
        }
        if !player.is_alive() {
            tracing::info!("player died on tick {}", encounter.tick_count());
            break;
        }
    }

    let visibility = encounter.visibility();
    tracing::info!(
        "after {} ticks: player {}/{} hp, level {} ({:.0}% to next), {} actors left, {} tiles explored",
        encounter.tick_count(),
        player.health.current,
        player.health.max,
        player.experience.level,
        xp_progress(&player.experience) * 100.0,
        encounter.actors().len(),
        visibility.explored_count()
    );
    for actor in encounter.actors() {
        tracing::info!(
            "{:?} {:?}: {} hp, {}",
            actor.kind(),
            actor.id(),
            actor.health().current,
            actor.state_name()
        );
    }

    Ok(())
}
