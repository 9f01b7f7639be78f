//! Doodle Climb - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling, collisions, game state)
//! - `platform`: Raw input and frame timing helpers for front ends
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{InputEvent, Snapshot, StepReport, World, apply_input, step};
pub use tuning::{DeltaMode, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Reference frame duration in milliseconds (dt = 1.0 is one 60 Hz frame)
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest dt (in reference frames) a single step will integrate
    pub const MAX_FRAME_DELTA: f32 = 3.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 360.0;
    pub const FIELD_HEIGHT: f32 = 576.0;

    /// Doodler defaults
    pub const DOODLER_WIDTH: f32 = 46.0;
    pub const DOODLER_HEIGHT: f32 = 46.0;
    /// Downward acceleration per reference frame
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity after a bounce (negative = up)
    pub const JUMP_VELOCITY: f32 = -10.0;
    /// Horizontal speed while steering
    pub const HORIZONTAL_SPEED: f32 = 4.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 18.0;
    /// Vertical gap between initial platforms
    pub const PLATFORM_SPACING: f32 = 75.0;
    /// Anchor platform distance from the bottom edge
    pub const ANCHOR_INSET: f32 = 50.0;
    /// First random platform distance from the bottom edge
    pub const FIRST_ROW_INSET: f32 = 150.0;
    /// Random platforms generated after the anchor
    pub const RANDOM_PLATFORMS: usize = 6;
    /// Upper bound accepted for the random platform batch
    pub const MAX_RANDOM_PLATFORMS: usize = 64;

    /// Points per unit of scroll offset (floor(offset / 10))
    pub const SCROLL_POINTS_DIVISOR: f32 = 10.0;
}
