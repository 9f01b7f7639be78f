//! Raw input translation
//!
//! Keyboard codes follow the DOM `KeyboardEvent.code` names. Touches steer by
//! which half of the field they land on.

use crate::sim::{Direction, InputEvent};

/// An input event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput<'a> {
    /// Key press by physical key code (`"KeyA"`, `"ArrowRight"`, ...)
    Key(&'a str),
    /// Touch start at an x offset within the field
    Touch { x: f32 },
}

/// Steering direction for a key code, if it has one
pub fn key_direction(code: &str) -> Option<Direction> {
    match code {
        "KeyA" | "ArrowLeft" => Some(Direction::Left),
        "KeyD" | "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Steering direction for a touch at `x`
pub fn touch_direction(x: f32, field_width: f32) -> Option<Direction> {
    let half = field_width / 2.0;
    if x > half {
        Some(Direction::Right)
    } else if x < half {
        Some(Direction::Left)
    } else {
        None
    }
}

/// Translate a raw event. Every key press and touch counts as activate.
pub fn translate(raw: RawInput<'_>, field_width: f32) -> InputEvent {
    let direction = match raw {
        RawInput::Key(code) => key_direction(code),
        RawInput::Touch { x } => touch_direction(x, field_width),
    };
    InputEvent {
        direction,
        activate: true,
    }
}
