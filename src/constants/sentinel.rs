//! Sentinel (guard) constants.

/// Sentinel health
pub const SENTINEL_HEALTH: i32 = 200;
/// Sentinel movement speed (units per tick)
pub const SENTINEL_SPEED: f32 = 1.4;
/// Radius in which hostiles are noticed; pursuit is dropped at twice this
pub const SENTINEL_DETECTION_RADIUS: f32 = 150.0;
/// Distance at which the sentinel can strike
pub const SENTINEL_ATTACK_RANGE: f32 = 36.0;
/// Windup before a strike lands (ticks)
pub const SENTINEL_WINDUP_TICKS: u32 = 30;
/// Cooldown after a strike (ticks)
pub const SENTINEL_COOLDOWN_TICKS: u32 = 45;
/// Damage per strike
pub const SENTINEL_STRIKE_DAMAGE: i32 = 12;
/// Distance from the anchor that counts as "home"
pub const SENTINEL_RETURN_TOLERANCE: f32 = 6.0;
/// How far from the anchor patrol waypoints may be placed
pub const SENTINEL_PATROL_RADIUS: f32 = 64.0;
