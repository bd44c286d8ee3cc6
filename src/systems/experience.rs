//! Experience and leveling rules.

use crate::components::Experience;
use crate::constants::*;

/// XP needed to reach the next level
pub fn xp_for_level(level: u32) -> u32 {
    level * XP_PER_LEVEL_MULTIPLIER
}

/// Calculate XP progress toward next level (0.0 to 1.0)
pub fn xp_progress(exp: &Experience) -> f32 {
    exp.current as f32 / xp_for_level(exp.level.max(1)) as f32
}

/// Add XP to an experience component, handling level ups
pub fn grant_xp(exp: &mut Experience, amount: u32) -> bool {
    exp.level = exp.level.max(1);
    exp.current += amount;
    let mut leveled_up = false;
    while exp.current >= xp_for_level(exp.level) {
        exp.current -= xp_for_level(exp.level);
        exp.level += 1;
        leveled_up = true;
    }
    leveled_up
}
