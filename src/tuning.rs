//! Game balance and field geometry
//!
//! Every constant the simulation reads lives here so variants of the game
//! differ only in data. Loaded from JSON on native, defaults elsewhere.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How the step interprets the dt it is handed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    /// dt is elapsed time in reference frames (frame-rate independent)
    #[default]
    Normalized,
    /// Every step advances exactly one reference frame
    PerFrame,
}

impl DeltaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaMode::Normalized => "normalized",
            DeltaMode::PerFrame => "per_frame",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normalized" | "norm" => Some(DeltaMode::Normalized),
            "per_frame" | "per-frame" | "frame" => Some(DeltaMode::PerFrame),
            _ => None,
        }
    }
}

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Named tuning values for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Doodler ===
    pub doodler_width: f32,
    pub doodler_height: f32,
    /// Downward acceleration per reference frame
    pub gravity: f32,
    /// Vertical velocity set by a bounce (must be negative)
    pub jump_velocity: f32,
    /// Speed applied by a left/right signal
    pub horizontal_speed: f32,
    /// Zero horizontal velocity when bouncing
    pub stop_on_bounce: bool,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_spacing: f32,
    pub anchor_inset: f32,
    pub first_row_inset: f32,
    /// Randomly placed platforms in the initial batch (after the anchor)
    pub random_platforms: usize,

    // === Timing ===
    pub delta_mode: DeltaMode,
    /// Largest dt a single step integrates (reference frames)
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            doodler_width: DOODLER_WIDTH,
            doodler_height: DOODLER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            horizontal_speed: HORIZONTAL_SPEED,
            stop_on_bounce: true,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_spacing: PLATFORM_SPACING,
            anchor_inset: ANCHOR_INSET,
            first_row_inset: FIRST_ROW_INSET,
            random_platforms: RANDOM_PLATFORMS,

            delta_mode: DeltaMode::Normalized,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl Tuning {
    /// Height above which an ascending doodler scrolls the world instead of moving
    #[inline]
    pub fn scroll_line(&self) -> f32 {
        self.field_height / 3.0
    }

    /// Exclusive upper bound for a random platform x
    #[inline]
    pub fn spawn_span(&self) -> f32 {
        self.field_width * 3.0 / 4.0
    }

    /// Total platforms alive at any time
    #[inline]
    pub fn platform_count(&self) -> usize {
        self.random_platforms.saturating_add(1)
    }

    #[inline]
    pub fn doodler_size(&self) -> Vec2 {
        Vec2::new(self.doodler_width, self.doodler_height)
    }

    #[inline]
    pub fn platform_size(&self) -> Vec2 {
        Vec2::new(self.platform_width, self.platform_height)
    }

    /// Doodler position at game start and after restart
    pub fn doodler_start(&self) -> Vec2 {
        Vec2::new(
            self.field_width / 2.0 - self.doodler_width / 2.0,
            self.field_height * 7.0 / 8.0 - self.doodler_height,
        )
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("doodler_width", self.doodler_width)?;
        positive("doodler_height", self.doodler_height)?;
        positive("gravity", self.gravity)?;
        positive("horizontal_speed", self.horizontal_speed)?;
        positive("platform_width", self.platform_width)?;
        positive("platform_height", self.platform_height)?;
        positive("platform_spacing", self.platform_spacing)?;

        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_velocity",
                reason: "must be negative (upward)",
            });
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta >= 1.0) {
            return Err(TuningError::Invalid {
                field: "max_frame_delta",
                reason: "must be at least one reference frame",
            });
        }
        if !(self.anchor_inset >= 0.0) {
            return Err(TuningError::Invalid {
                field: "anchor_inset",
                reason: "insets cannot be negative",
            });
        }
        if !(self.first_row_inset >= 0.0) {
            return Err(TuningError::Invalid {
                field: "first_row_inset",
                reason: "insets cannot be negative",
            });
        }
        if self.random_platforms > MAX_RANDOM_PLATFORMS {
            return Err(TuningError::Invalid {
                field: "random_platforms",
                reason: "too many platforms for one field",
            });
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON (missing keys take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
