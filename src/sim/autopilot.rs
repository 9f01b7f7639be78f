//! Autopilot input source
//!
//! Plays the game for demo and headless runs. Decisions depend only on the
//! world, so an autopiloted run is as reproducible as its seed.

use super::input::{Direction, InputEvent};
use super::state::{Facing, World};

/// Simple steering AI: follow the platform the doodler is heading for
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Horizontal distance (center to center) considered "lined up"
    pub dead_zone: f32,
    /// Press activate as soon as the game ends
    pub auto_restart: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            dead_zone: 12.0,
            auto_restart: true,
        }
    }
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self {
            auto_restart,
            ..Default::default()
        }
    }

    /// Pick the input for this frame, or `None` to leave the controls alone
    pub fn decide<R>(&self, world: &World<R>) -> Option<InputEvent> {
        if world.is_game_over() {
            return self.auto_restart.then(InputEvent::activate);
        }

        let doodler = &world.doodler;
        let feet = doodler.pos.y + doodler.size().y;
        let center = doodler.pos.x + doodler.size().x / 2.0;

        // Falling: nearest platform below the feet. Rising: nearest one above.
        let target = if doodler.is_falling() {
            world
                .platforms
                .iter()
                .filter(|p| p.pos.y >= feet)
                .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        } else {
            world
                .platforms
                .iter()
                .filter(|p| p.pos.y < doodler.pos.y)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        }?;

        let target_center = target.pos.x + target.size().x / 2.0;
        let delta = target_center - center;
        if delta.abs() <= self.dead_zone {
            return None;
        }

        let wanted = if delta < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let already = match wanted {
            Direction::Left => doodler.vel.x < 0.0 && doodler.facing == Facing::Left,
            Direction::Right => doodler.vel.x > 0.0 && doodler.facing == Facing::Right,
        };
        (!already).then(|| InputEvent::steer(wanted))
    }
}
