//! Continuous movement with tile collision.

use glam::Vec2;

use crate::grid::Grid;

/// Move by `delta` if the destination tile is walkable, otherwise slide along
/// one axis. Returns the resulting position (unchanged when fully blocked).
pub fn try_move(grid: &Grid, pos: Vec2, delta: Vec2) -> Vec2 {
    if delta == Vec2::ZERO {
        return pos;
    }

    let full = pos + delta;
    if grid.is_walkable_world(full) {
        return full;
    }

    // Blocked diagonally - try each axis on its own
    if delta.x != 0.0 {
        let slide_x = pos + Vec2::new(delta.x, 0.0);
        if grid.is_walkable_world(slide_x) {
            return slide_x;
        }
    }
    if delta.y != 0.0 {
        let slide_y = pos + Vec2::new(0.0, delta.y);
        if grid.is_walkable_world(slide_y) {
            return slide_y;
        }
    }

    pos
}

/// Step up to `speed` units toward `target` without overshooting it
pub fn step_toward(grid: &Grid, pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let to_target = target - pos;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return pos;
    }
    let delta = if distance <= speed {
        to_target
    } else {
        to_target / distance * speed
    };
    try_move(grid, pos, delta)
}

/// Step `speed` units directly away from `threat`
pub fn step_away(grid: &Grid, pos: Vec2, threat: Vec2, speed: f32) -> Vec2 {
    let away = (pos - threat).normalize_or_zero();
    try_move(grid, pos, away * speed)
}
