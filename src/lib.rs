//! Real-time hostile actors on a tile grid.
//!
//! A fixed-tick simulation core: fog of war over a walkability grid, a kiting
//! boss that throws arcing projectiles, a disguised ambusher with a tongue
//! grab, and a sentinel that hunts third-party monsters. The player is owned
//! by the caller and touched only through [`player::StatusTarget`].

pub mod actor;
pub mod components;
pub mod config;
pub mod constants;
pub mod engine;
pub mod events;
pub mod fov;
pub mod grid;
pub mod line;
pub mod player;
pub mod roster;
pub mod spawning;
pub mod systems;
pub mod tile;

pub use actor::{Actor, ActorId, ActorKind};
pub use config::{ConfigError, Tuning};
pub use engine::Encounter;
pub use grid::{Grid, GridError};
pub use player::{Player, StatusTarget};
