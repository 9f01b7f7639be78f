//! Frame timing
//!
//! Hosts report timestamps in milliseconds; the simulation wants elapsed time
//! in reference frames. Clamping of long pauses is left to the step.

use crate::consts::REFERENCE_FRAME_MS;

/// Converts successive frame timestamps into normalized deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return the elapsed reference frames.
    ///
    /// The first frame counts as exactly one reference frame. Timestamps that
    /// go backwards yield 0.0, which the step treats as a no-op.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / REFERENCE_FRAME_MS).max(0.0) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the last timestamp (after the host was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(123_456.0), 1.0);
    }

    #[test]
    fn test_normalizes_to_sixty_hz() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let dt = clock.advance(1000.0 + REFERENCE_FRAME_MS);
        assert!((dt - 1.0).abs() < 1e-6);

        // 30 fps host: two reference frames per call
        let dt = clock.advance(1000.0 + REFERENCE_FRAME_MS + 2.0 * REFERENCE_FRAME_MS);
        assert!((dt - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        clock.reset();
        assert_eq!(clock.advance(90_000.0), 1.0);
    }
}
