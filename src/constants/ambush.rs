//! Ambush actor (disguise / tongue / grab) constants.

/// Ambusher health
pub const AMBUSH_HEALTH: i32 = 120;
/// Ambusher pursuit speed (units per tick)
pub const AMBUSH_SPEED: f32 = 1.2;
/// Damage dealt when the player touches the ambusher
pub const AMBUSH_CONTACT_DAMAGE: i32 = 6;
/// Proximity that breaks the disguise (line of sight is not required)
pub const AMBUSH_DETECTION_RADIUS: f32 = 96.0;
/// Ticks spent revealing before the attack telegraph
pub const AMBUSH_REVEAL_TICKS: u32 = 30;
/// Attack telegraph before the first tongue lash (ticks)
pub const AMBUSH_TELEGRAPH_TICKS: u32 = 45;
/// Maximum reach of the tongue
pub const TONGUE_MAX_LENGTH: f32 = 160.0;
/// Tongue growth per tick while extending
pub const TONGUE_EXTEND_SPEED: f32 = 10.0;
/// Tongue shrink per tick while retracting
pub const TONGUE_RETRACT_SPEED: f32 = 14.0;
/// Fraction of the maximum length at which the hit check fires
pub const TONGUE_HIT_CHECK_FRACTION: f32 = 0.8;
/// How close the tongue tip must land to the aimed point
pub const TONGUE_TIP_TOLERANCE: f32 = 40.0;
/// How far the target may drift from the aimed point and still be caught
pub const TONGUE_TARGET_TOLERANCE: f32 = 60.0;
/// Pull speed toward a caught target (units per tick)
pub const TONGUE_PULL_SPEED: f32 = 6.0;
/// Distance at which a pull turns into a grab
pub const GRAB_DISTANCE: f32 = 30.0;
/// Damage applied to a grabbed player every grab interval
pub const GRAB_DAMAGE: i32 = 5;
/// Ticks between grab damage applications
pub const GRAB_DAMAGE_INTERVAL_TICKS: u32 = 60;
/// Escape inputs needed to break free
pub const GRAB_ESCAPE_THRESHOLD: u32 = 15;
/// Cooldown between tongue lashes while active (ticks)
pub const TONGUE_COOLDOWN_TICKS: u32 = 120;
/// Pursuit stops this close to the target
pub const AMBUSH_STOP_DISTANCE: f32 = 24.0;
