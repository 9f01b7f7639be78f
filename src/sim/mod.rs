//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded (or injected) RNG only
//! - Stable iteration order (platform insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod platforms;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Aabb, overlaps};
pub use input::{Direction, InputEvent, apply_input};
pub use platforms::{initial_platforms, spawn_platform};
pub use state::{Doodler, DoodlerView, Facing, GamePhase, Platform, RectView, Snapshot, World};
pub use tick::{StepReport, scroll_world, step, wrap_horizontal};
