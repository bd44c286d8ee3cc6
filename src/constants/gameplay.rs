//! Core simulation constants (units, tick rate, player, contact damage).

/// Fixed simulation rate
pub const TICKS_PER_SECOND: u32 = 60;

/// Side length of one grid tile in world units
pub const TILE_SIZE: f32 = 32.0;

/// Player's default starting health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Player's starting strength
pub const PLAYER_STRENGTH: i32 = 12;
/// Player's starting intelligence
pub const PLAYER_INTELLIGENCE: i32 = 10;
/// Player's starting agility
pub const PLAYER_AGILITY: i32 = 12;
/// Player's starting wisdom (drives vision radius)
pub const PLAYER_WISDOM: i32 = 10;

/// Base XP formula multiplier (XP needed = level * this)
pub const XP_PER_LEVEL_MULTIPLIER: u32 = 100;

/// Distance at which an actor's body touches the player
pub const CONTACT_RANGE: f32 = 20.0;
/// Ticks between two contact hits from the same actor
pub const CONTACT_COOLDOWN_TICKS: u32 = 60;

/// Player melee damage before the strength bonus
pub const PLAYER_UNARMED_DAMAGE: i32 = 4;
/// Strength above which each two points add one melee damage
pub const STRENGTH_BONUS_BASELINE: i32 = 10;

/// Rat health (roster monster)
pub const RAT_HEALTH: i32 = 20;
/// XP for a rat slain by the player
pub const RAT_XP: u32 = 10;
/// Skeleton health (roster monster)
pub const SKELETON_HEALTH: i32 = 40;
/// XP for a skeleton slain by the player
pub const SKELETON_XP: u32 = 25;

/// Reach of a player melee attack
pub const PLAYER_MELEE_RANGE: f32 = 40.0;
