//! Boss (kiting ranged attacker) constants.

/// Boss health
pub const BOSS_HEALTH: i32 = 300;
/// Boss movement speed (units per tick)
pub const BOSS_SPEED: f32 = 1.5;
/// Damage dealt when the player touches the boss
pub const BOSS_CONTACT_DAMAGE: i32 = 10;
/// Distance below which the boss backs away from its target
pub const BOSS_KITE_INNER: f32 = 100.0;
/// Distance above which the boss closes in on its target
pub const BOSS_KITE_OUTER: f32 = 150.0;
/// Maximum distance at which the boss starts a throw
pub const BOSS_ATTACK_RANGE: f32 = 260.0;
/// Distance at which the boss notices the player
pub const BOSS_DETECTION_RADIUS: f32 = 400.0;
/// Telegraph duration before a throw (ticks)
pub const BOSS_WINDUP_TICKS: u32 = 60;
/// Cooldown after a throw (ticks)
pub const BOSS_RECOVER_TICKS: u32 = 90;
/// Incoming damage multiplier (0.5 = 50% reduction)
pub const BOSS_DAMAGE_TAKEN_MULT: f32 = 0.5;
/// Health fraction at or below which the boss enrages
pub const BOSS_ENRAGE_HEALTH_FRACTION: f32 = 0.3;
/// Ticks alive after which the boss enrages regardless of health (one minute)
pub const BOSS_ENRAGE_AFTER_TICKS: u32 = 3600;
/// Movement speed multiplier while enraged
pub const BOSS_ENRAGE_SPEED_MULT: f32 = 1.5;
