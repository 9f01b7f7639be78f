//! Platform placement
//!
//! Horizontal positions come from the caller's random source; vertical
//! spacing is fixed by tuning. Passing the RNG in keeps layouts reproducible.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::state::Platform;
use crate::tuning::Tuning;

/// Create a platform at a random x in `[0, field_width * 3/4)` and the given y
pub fn spawn_platform<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, top_y: f32) -> Platform {
    let span = tuning.spawn_span();
    let x = if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    };
    Platform::new(Vec2::new(x, top_y), tuning.platform_size())
}

/// Build the opening layout: a fixed anchor under the doodler, then rows of
/// random platforms climbing toward the top of the field.
///
/// Insertion order is bottom to top, so the front is always the next
/// platform to scroll off.
pub fn initial_platforms<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> VecDeque<Platform> {
    let mut platforms = VecDeque::with_capacity(tuning.platform_count());

    let anchor = Vec2::new(
        tuning.field_width / 2.0,
        tuning.field_height - tuning.anchor_inset,
    );
    platforms.push_back(Platform::new(anchor, tuning.platform_size()));

    for row in 0..tuning.random_platforms {
        let y = tuning.field_height - tuning.first_row_inset - tuning.platform_spacing * row as f32;
        platforms.push_back(spawn_platform(rng, tuning, y));
    }

    platforms
}
