//! Platform abstraction layer
//!
//! Turns what a host delivers into what the simulation consumes:
//! - Raw key/touch events into [`InputEvent`](crate::sim::InputEvent)s
//! - Frame timestamps into normalized deltas

pub mod input;
pub mod time;

pub use input::{RawInput, translate};
pub use time::FrameClock;
