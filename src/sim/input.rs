//! Input commands applied directly to the world
//!
//! Signals are discrete: a direction sets a constant horizontal speed, it
//! does not accelerate. They take effect immediately and are seen by the
//! next step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Facing, GamePhase, World};

/// Horizontal steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// One translated input signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Steering, if the signal carried one
    pub direction: Option<Direction>,
    /// Tap/click/any key; restarts a finished game
    pub activate: bool,
}

impl InputEvent {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            activate: false,
        }
    }

    pub fn activate() -> Self {
        Self {
            direction: None,
            activate: true,
        }
    }
}

/// Apply an input event to the world.
///
/// While the game is over only `activate` matters and it restarts the game.
/// Returns true if a restart happened.
pub fn apply_input<R: Rng>(world: &mut World<R>, event: InputEvent) -> bool {
    if world.phase == GamePhase::GameOver {
        if event.activate {
            world.restart();
            return true;
        }
        return false;
    }

    let speed = world.tuning.horizontal_speed;
    match event.direction {
        Some(Direction::Left) => {
            world.doodler.vel.x = -speed;
            world.doodler.facing = Facing::Left;
        }
        Some(Direction::Right) => {
            world.doodler.vel.x = speed;
            world.doodler.facing = Facing::Right;
        }
        None => {}
    }
    false
}
