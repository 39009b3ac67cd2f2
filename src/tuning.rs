//! Data-driven game balance
//!
//! Every gameplay constant the core consults lives here, so a session can be
//! rebalanced from a JSON file without recompiling. Missing fields fall back
//! to the values in [`crate::consts`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating tuning
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The JSON was malformed or had wrong field types
    Parse(serde_json::Error),
    /// A `(min, max)` pair where min exceeds max
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A value that must be strictly positive
    NonPositive { field: &'static str, value: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::InvalidRange { field, min, max } => {
                write!(f, "invalid range for {}: min {} > max {}", field, min, max)
            }
            TuningError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay balance for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Width used for horizontal wrap-around
    pub game_width: f32,

    // === Platforms ===
    /// Platforms built at level start
    pub platform_count: usize,
    /// Vertical distance between initial platforms
    pub platform_spacing: f32,
    /// Horizontal placement range (inclusive)
    pub platform_x_min: f32,
    pub platform_x_max: f32,
    /// Display size of a platform
    pub platform_size: Vec2,

    // === Recycling ===
    /// A platform at or below `scroll + visibility_margin` is recycled
    pub visibility_margin: f32,
    /// Recycled platforms land `gap` above the scroll offset
    pub recycle_gap_min: f32,
    pub recycle_gap_max: f32,

    // === Player ===
    pub player_start: Vec2,
    pub player_size: Vec2,
    /// Vertical velocity on bounce (negative is up)
    pub bounce_velocity: f32,
    pub horizontal_speed: f32,
    /// Fall distance below the lowest platform that ends the session
    pub termination_margin: f32,

    // === Collectibles ===
    pub collectible_size: Vec2,
    /// Where the seed collectible is placed at level start
    pub seed_collectible: Vec2,
    /// Pool size beyond which growth is reported
    pub collectible_pool_target: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,

            platform_count: PLATFORM_COUNT,
            platform_spacing: PLATFORM_SPACING,
            platform_x_min: PLATFORM_X_MIN,
            platform_x_max: PLATFORM_X_MAX,
            platform_size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),

            visibility_margin: VISIBILITY_MARGIN,
            recycle_gap_min: RECYCLE_GAP_MIN,
            recycle_gap_max: RECYCLE_GAP_MAX,

            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            bounce_velocity: BOUNCE_VELOCITY,
            horizontal_speed: HORIZONTAL_SPEED,
            termination_margin: TERMINATION_MARGIN,

            collectible_size: Vec2::new(COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT),
            seed_collectible: Vec2::new(SEED_COLLECTIBLE_X, SEED_COLLECTIBLE_Y),
            collectible_pool_target: COLLECTIBLE_POOL_TARGET,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        check_range("platform_x", self.platform_x_min, self.platform_x_max)?;
        check_range("recycle_gap", self.recycle_gap_min, self.recycle_gap_max)?;
        check_positive("game_width", self.game_width)?;
        check_positive("platform_size.y", self.platform_size.y)?;
        check_positive("player_size.x", self.player_size.x)?;
        check_positive("visibility_margin", self.visibility_margin)?;
        check_positive("horizontal_speed", self.horizontal_speed)?;
        if self.platform_count == 0 {
            return Err(TuningError::NonPositive {
                field: "platform_count",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    // NaN fails the comparison and is rejected too
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvalidRange { field, min, max })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "termination_margin": 350.0 }"#).unwrap();
        assert_eq!(tuning.termination_margin, 350.0);
        assert_eq!(tuning.platform_count, PLATFORM_COUNT);
        assert_eq!(tuning.platform_size, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT));
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let err = Tuning::from_json(r#"{ "recycle_gap_min": 120.0, "recycle_gap_max": 60.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvalidRange {
                field: "recycle_gap",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse tuning"));
    }

    #[test]
    fn test_zero_platforms_rejected() {
        let err = Tuning::from_json(r#"{ "platform_count": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive {
                field: "platform_count",
                ..
            }
        ));
    }
}
