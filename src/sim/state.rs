//! Game state and core simulation types
//!
//! The whole game is one [`World`] value owned by the caller. Several worlds
//! can run side by side; nothing here is global.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::platforms::initial_platforms;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Doodler fell off the bottom; waiting for a restart signal
    GameOver,
}

/// Which way the doodler sprite looks (rendering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doodler {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Fixed at creation
    size: Vec2,
}

impl Doodler {
    /// A doodler at the start position, already moving up
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.doodler_start(),
            vel: Vec2::new(0.0, tuning.jump_velocity),
            facing: Facing::Right,
            size: tuning.doodler_size(),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.vel.y >= 0.0
    }
}

/// A static landing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    size: Vec2,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete game state
///
/// `R` is the random source used for platform placement. Production code uses
/// the seeded [`Pcg32`]; tests may inject anything implementing [`Rng`].
#[derive(Debug, Clone)]
pub struct World<R = Pcg32> {
    /// Constants in effect for this game
    pub tuning: Tuning,
    pub doodler: Doodler,
    /// Live platforms in insertion order; the front is the lowest
    pub platforms: VecDeque<Platform>,
    pub score: u64,
    /// Best score this session (kept across restarts)
    pub max_score: u64,
    pub phase: GamePhase,
    /// Steps that advanced the simulation since the last (re)start
    pub time_ticks: u64,
    /// Restarts performed in this session
    pub restarts: u32,
    /// Random source for platform spawns
    pub(crate) rng: R,
}

impl World<Pcg32> {
    /// Create a new game with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }
}

impl<R: Rng> World<R> {
    /// Create a new game drawing platform positions from `rng`
    pub fn with_rng(mut rng: R, tuning: Tuning) -> Self {
        let platforms = initial_platforms(&mut rng, &tuning);
        Self {
            doodler: Doodler::spawn(&tuning),
            platforms,
            score: 0,
            max_score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            restarts: 0,
            tuning,
            rng,
        }
    }

    /// Reinitialize everything except the session best and the random stream
    pub fn restart(&mut self) {
        self.doodler = Doodler::spawn(&self.tuning);
        self.platforms = initial_platforms(&mut self.rng, &self.tuning);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.restarts += 1;
        log::info!(
            "Restarted (run {}, best so far {})",
            self.restarts + 1,
            self.max_score
        );
    }
}

impl<R> World<R> {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doodler: DoodlerView {
                x: self.doodler.pos.x,
                y: self.doodler.pos.y,
                width: self.doodler.size.x,
                height: self.doodler.size.y,
                facing: self.doodler.facing,
            },
            platforms: self
                .platforms
                .iter()
                .map(|p| RectView {
                    x: p.pos.x,
                    y: p.pos.y,
                    width: p.size.x,
                    height: p.size.y,
                })
                .collect(),
            score: self.score,
            max_score: self.max_score,
            game_over: self.is_game_over(),
        }
    }
}

/// Doodler as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoodlerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
}

/// A plain rectangle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub doodler: DoodlerView,
    pub platforms: Vec<RectView>,
    pub score: u64,
    pub max_score: u64,
    pub game_over: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
