//! Arcing projectile constants.

/// Ground speed of a thrown projectile (units per tick)
pub const PROJECTILE_SPEED: f32 = 4.0;
/// Peak height of the arc, reached halfway
pub const PROJECTILE_ARC_HEIGHT: f32 = 48.0;
/// Radius around the impact point that hits the victim (one tile)
pub const PROJECTILE_IMPACT_RADIUS: f32 = 32.0;
/// Damage dealt on a hit
pub const PROJECTILE_DAMAGE: i32 = 15;
/// Stun applied on a hit (ticks)
pub const PROJECTILE_STUN_TICKS: u32 = 90;
/// How long the impact splash lingers before the projectile is removed (ticks)
pub const PROJECTILE_IMPACT_TICKS: u32 = 20;
