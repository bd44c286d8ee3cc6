//! Fog of war constants.

/// Default vision radius for the player, in tiles
pub const VISION_BASE_RADIUS: f32 = 8.0;
/// Wisdom value at which the vision multiplier is exactly 1.0
pub const VISION_WISDOM_BASELINE: i32 = 10;
/// Vision multiplier gained per wisdom point above the baseline
pub const VISION_PER_WISDOM: f32 = 0.15;
