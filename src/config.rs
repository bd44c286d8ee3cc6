//! Data-driven tuning.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! tuning file only needs to list what it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn require_nonzero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        })
    }
}

fn require_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be within 0..=1, got {value}"),
        })
    }
}

/// Fog of war tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionTuning {
    /// Radius in tiles at baseline wisdom
    pub base_radius: f32,
    pub wisdom_baseline: i32,
    pub per_wisdom: f32,
}

impl Default for VisionTuning {
    fn default() -> Self {
        Self {
            base_radius: VISION_BASE_RADIUS,
            wisdom_baseline: VISION_WISDOM_BASELINE,
            per_wisdom: VISION_PER_WISDOM,
        }
    }
}

/// Boss tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub health: i32,
    pub speed: f32,
    pub contact_damage: i32,
    pub kite_inner: f32,
    pub kite_outer: f32,
    pub attack_range: f32,
    pub detection_radius: f32,
    pub windup_ticks: u32,
    pub recover_ticks: u32,
    pub damage_taken_mult: f32,
    pub enrage_health_fraction: f32,
    pub enrage_after_ticks: u32,
    pub enrage_speed_mult: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            health: BOSS_HEALTH,
            speed: BOSS_SPEED,
            contact_damage: BOSS_CONTACT_DAMAGE,
            kite_inner: BOSS_KITE_INNER,
            kite_outer: BOSS_KITE_OUTER,
            attack_range: BOSS_ATTACK_RANGE,
            detection_radius: BOSS_DETECTION_RADIUS,
            windup_ticks: BOSS_WINDUP_TICKS,
            recover_ticks: BOSS_RECOVER_TICKS,
            damage_taken_mult: BOSS_DAMAGE_TAKEN_MULT,
            enrage_health_fraction: BOSS_ENRAGE_HEALTH_FRACTION,
            enrage_after_ticks: BOSS_ENRAGE_AFTER_TICKS,
            enrage_speed_mult: BOSS_ENRAGE_SPEED_MULT,
        }
    }
}

/// Thrown projectile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub arc_height: f32,
    pub impact_radius: f32,
    pub damage: i32,
    pub stun_ticks: u32,
    pub impact_ticks: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            arc_height: PROJECTILE_ARC_HEIGHT,
            impact_radius: PROJECTILE_IMPACT_RADIUS,
            damage: PROJECTILE_DAMAGE,
            stun_ticks: PROJECTILE_STUN_TICKS,
            impact_ticks: PROJECTILE_IMPACT_TICKS,
        }
    }
}

/// Ambusher tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbushTuning {
    pub health: i32,
    pub speed: f32,
    pub contact_damage: i32,
    pub detection_radius: f32,
    pub reveal_ticks: u32,
    pub telegraph_ticks: u32,
    pub tongue_max_length: f32,
    pub tongue_extend_speed: f32,
    pub tongue_retract_speed: f32,
    pub hit_check_fraction: f32,
    pub tip_tolerance: f32,
    pub target_tolerance: f32,
    pub pull_speed: f32,
    pub grab_distance: f32,
    pub grab_damage: i32,
    pub grab_damage_interval: u32,
    pub escape_threshold: u32,
    pub tongue_cooldown_ticks: u32,
    pub stop_distance: f32,
}

impl Default for AmbushTuning {
    fn default() -> Self {
        Self {
            health: AMBUSH_HEALTH,
            speed: AMBUSH_SPEED,
            contact_damage: AMBUSH_CONTACT_DAMAGE,
            detection_radius: AMBUSH_DETECTION_RADIUS,
            reveal_ticks: AMBUSH_REVEAL_TICKS,
            telegraph_ticks: AMBUSH_TELEGRAPH_TICKS,
            tongue_max_length: TONGUE_MAX_LENGTH,
            tongue_extend_speed: TONGUE_EXTEND_SPEED,
            tongue_retract_speed: TONGUE_RETRACT_SPEED,
            hit_check_fraction: TONGUE_HIT_CHECK_FRACTION,
            tip_tolerance: TONGUE_TIP_TOLERANCE,
            target_tolerance: TONGUE_TARGET_TOLERANCE,
            pull_speed: TONGUE_PULL_SPEED,
            grab_distance: GRAB_DISTANCE,
            grab_damage: GRAB_DAMAGE,
            grab_damage_interval: GRAB_DAMAGE_INTERVAL_TICKS,
            escape_threshold: GRAB_ESCAPE_THRESHOLD,
            tongue_cooldown_ticks: TONGUE_COOLDOWN_TICKS,
            stop_distance: AMBUSH_STOP_DISTANCE,
        }
    }
}

/// Sentinel tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelTuning {
    pub health: i32,
    pub speed: f32,
    pub detection_radius: f32,
    pub attack_range: f32,
    pub windup_ticks: u32,
    pub cooldown_ticks: u32,
    pub strike_damage: i32,
    pub return_tolerance: f32,
    pub patrol_radius: f32,
}

impl Default for SentinelTuning {
    fn default() -> Self {
        Self {
            health: SENTINEL_HEALTH,
            speed: SENTINEL_SPEED,
            detection_radius: SENTINEL_DETECTION_RADIUS,
            attack_range: SENTINEL_ATTACK_RANGE,
            windup_ticks: SENTINEL_WINDUP_TICKS,
            cooldown_ticks: SENTINEL_COOLDOWN_TICKS,
            strike_damage: SENTINEL_STRIKE_DAMAGE,
            return_tolerance: SENTINEL_RETURN_TOLERANCE,
            patrol_radius: SENTINEL_PATROL_RADIUS,
        }
    }
}

/// Body contact damage tuning shared by all actors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactTuning {
    pub range: f32,
    pub cooldown_ticks: u32,
}

impl Default for ContactTuning {
    fn default() -> Self {
        Self {
            range: CONTACT_RANGE,
            cooldown_ticks: CONTACT_COOLDOWN_TICKS,
        }
    }
}

/// All tuning for one encounter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub vision: VisionTuning,
    pub boss: BossTuning,
    pub projectile: ProjectileTuning,
    pub ambush: AmbushTuning,
    pub sentinel: SentinelTuning,
    pub contact: ContactTuning,
}

impl Tuning {
    /// Parse and validate tuning from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load tuning, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!("tuning file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("vision.base_radius", self.vision.base_radius)?;
        if self.vision.per_wisdom < 0.0 {
            return Err(ConfigError::Invalid {
                field: "vision.per_wisdom",
                reason: "must not be negative".to_string(),
            });
        }

        let boss = &self.boss;
        require_positive("boss.speed", boss.speed)?;
        require_positive("boss.kite_inner", boss.kite_inner)?;
        require_positive("boss.attack_range", boss.attack_range)?;
        require_positive("boss.enrage_speed_mult", boss.enrage_speed_mult)?;
        require_nonzero("boss.windup_ticks", boss.windup_ticks)?;
        require_nonzero("boss.recover_ticks", boss.recover_ticks)?;
        require_fraction("boss.enrage_health_fraction", boss.enrage_health_fraction)?;
        if boss.kite_outer < boss.kite_inner {
            return Err(ConfigError::Invalid {
                field: "boss.kite_outer",
                reason: format!("must not be below kite_inner ({})", boss.kite_inner),
            });
        }
        if boss.damage_taken_mult < 0.0 {
            return Err(ConfigError::Invalid {
                field: "boss.damage_taken_mult",
                reason: "must not be negative".to_string(),
            });
        }

        let projectile = &self.projectile;
        require_positive("projectile.speed", projectile.speed)?;
        require_positive("projectile.impact_radius", projectile.impact_radius)?;

        let ambush = &self.ambush;
        require_positive("ambush.speed", ambush.speed)?;
        require_positive("ambush.detection_radius", ambush.detection_radius)?;
        require_positive("ambush.tongue_max_length", ambush.tongue_max_length)?;
        require_positive("ambush.tongue_extend_speed", ambush.tongue_extend_speed)?;
        require_positive("ambush.tongue_retract_speed", ambush.tongue_retract_speed)?;
        require_positive("ambush.pull_speed", ambush.pull_speed)?;
        require_positive("ambush.grab_distance", ambush.grab_distance)?;
        require_fraction("ambush.hit_check_fraction", ambush.hit_check_fraction)?;
        require_nonzero("ambush.grab_damage_interval", ambush.grab_damage_interval)?;
        require_nonzero("ambush.escape_threshold", ambush.escape_threshold)?;

        let sentinel = &self.sentinel;
        require_positive("sentinel.speed", sentinel.speed)?;
        require_positive("sentinel.detection_radius", sentinel.detection_radius)?;
        require_positive("sentinel.attack_range", sentinel.attack_range)?;
        require_positive("sentinel.return_tolerance", sentinel.return_tolerance)?;
        require_nonzero("sentinel.windup_ticks", sentinel.windup_ticks)?;

        require_positive("contact.range", self.contact.range)?;
        Ok(())
    }
}
