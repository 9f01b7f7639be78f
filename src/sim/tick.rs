//! Per-frame simulation step
//!
//! Advances a [`World`] by one time increment measured in reference frames.
//! There is no camera: when the doodler climbs past the scroll line the
//! platforms move down instead, so every collision check happens in screen
//! coordinates.

use rand::Rng;

use super::collision::overlaps;
use super::platforms::spawn_platform;
use super::state::{GamePhase, World};
use crate::consts::SCROLL_POINTS_DIVISOR;
use crate::tuning::{DeltaMode, Tuning};

/// What happened during one call to [`step`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// False when the step was skipped (game over, dt <= 0)
    pub advanced: bool,
    /// dt actually integrated after clamping
    pub dt: f32,
    pub bounced: bool,
    /// Platforms that left the bottom and were replaced at the top
    pub recycled: usize,
    /// Distance the world shifted down this step
    pub scroll_offset: f32,
    /// Score gained this step
    pub points: u64,
    /// The doodler fell out during this step
    pub game_over: bool,
}

/// Advance the world by `dt` reference frames
pub fn step<R: Rng>(world: &mut World<R>, dt: f32) -> StepReport {
    let mut report = StepReport::default();

    if world.phase == GamePhase::GameOver {
        return report;
    }
    let Some(dt) = effective_dt(&world.tuning, dt) else {
        return report;
    };

    report.advanced = true;
    report.dt = dt;
    world.time_ticks += 1;
    let score_before = world.score;

    // Horizontal motion wraps around the field edges
    let doodler = &mut world.doodler;
    doodler.pos.x = wrap_horizontal(
        doodler.pos.x + doodler.vel.x * dt,
        doodler.size().x,
        world.tuning.field_width,
    );

    doodler.vel.y += world.tuning.gravity * dt;
    doodler.pos.y += doodler.vel.y * dt;

    if doodler.pos.y > world.tuning.field_height {
        world.phase = GamePhase::GameOver;
        report.game_over = true;
        log::info!(
            "Game over after {} ticks: score {}, best {}",
            world.time_ticks,
            world.score,
            world.max_score
        );
        return report;
    }

    report.scroll_offset = scroll_world(world, dt);
    report.bounced = resolve_bounces(world);
    report.recycled = recycle_platforms(world);

    // Climbing earns a point every step, on top of the scroll points above
    if world.doodler.vel.y < 0.0 {
        world.score += 1;
        world.max_score = world.max_score.max(world.score);
    }

    report.points = world.score - score_before;
    report
}

/// Resolve the dt a step should integrate, or `None` to skip the step
fn effective_dt(tuning: &Tuning, dt: f32) -> Option<f32> {
    // Also rejects NaN
    if !(dt > 0.0) {
        return None;
    }
    match tuning.delta_mode {
        DeltaMode::PerFrame => Some(1.0),
        DeltaMode::Normalized => Some(dt.min(tuning.max_frame_delta)),
    }
}

/// Wrap an x coordinate around a field of `field_width`.
///
/// Leaving past the right edge re-enters at 0; leaving fully past the left
/// edge re-enters flush with the right edge. The result always lies in
/// `[-width, field_width]`.
#[inline]
pub fn wrap_horizontal(x: f32, width: f32, field_width: f32) -> f32 {
    if x > field_width {
        0.0
    } else if x + width < 0.0 {
        field_width - width
    } else {
        x
    }
}

/// Keep an ascending doodler at the scroll line by pushing every platform
/// down by the distance it would have climbed past it.
///
/// Returns the offset applied (0 when no scrolling happened).
pub fn scroll_world<R>(world: &mut World<R>, dt: f32) -> f32 {
    let line = world.tuning.scroll_line();
    let doodler = &mut world.doodler;
    if !(doodler.vel.y < 0.0 && doodler.pos.y < line) {
        return 0.0;
    }

    let offset = (line - doodler.pos.y) * dt;
    doodler.pos.y = line;
    for platform in world.platforms.iter_mut() {
        platform.pos.y += offset;
    }
    world.score += (offset / SCROLL_POINTS_DIVISOR).floor() as u64;
    offset
}

/// Bounce a falling doodler off any platform it overlaps
fn resolve_bounces<R>(world: &mut World<R>) -> bool {
    let jump_velocity = world.tuning.jump_velocity;
    let stop_on_bounce = world.tuning.stop_on_bounce;
    let doodler = &mut world.doodler;

    let mut bounced = false;
    for platform in &world.platforms {
        // Rising doodlers pass through platforms from below
        if doodler.is_falling() && overlaps(doodler.bounds(), platform.bounds()) {
            doodler.vel.y = jump_velocity;
            if stop_on_bounce {
                doodler.vel.x = 0.0;
            }
            bounced = true;
            log::trace!("Bounce at ({:.1}, {:.1})", platform.pos.x, platform.pos.y);
        }
    }
    bounced
}

/// Replace every platform that scrolled off the bottom with a new one just
/// above the top edge. Returns how many were replaced.
fn recycle_platforms<R: Rng>(world: &mut World<R>) -> usize {
    assert!(
        !world.platforms.is_empty(),
        "world has no platforms; the platform count must stay constant"
    );

    let field_height = world.tuning.field_height;
    let top = -world.tuning.platform_height;
    let mut recycled = 0;
    while world
        .platforms
        .front()
        .is_some_and(|p| p.pos.y >= field_height)
    {
        world.platforms.pop_front();
        let platform = spawn_platform(&mut world.rng, &world.tuning, top);
        world.platforms.push_back(platform);
        recycled += 1;
    }

    if recycled > 0 {
        log::debug!(
            "Recycled {} platform(s) at tick {}",
            recycled,
            world.time_ticks
        );
    }
    recycled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Facing;
    use glam::Vec2;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(12345, Tuning::default())
    }

    /// Doodler falling onto the anchor platform at (180, 526)
    fn world_above_anchor() -> World {
        let mut world = world();
        world.doodler.pos = Vec2::new(180.0, 526.0 - 46.0 - 2.0);
        world.doodler.vel = Vec2::new(0.0, 3.0);
        world
    }

    #[test]
    fn test_first_step_climbs() {
        let mut world = world();
        let report = step(&mut world, 1.0);

        assert!(report.advanced);
        assert_eq!(world.time_ticks, 1);
        assert_eq!(world.doodler.vel.y, -9.5);
        assert_eq!(world.doodler.pos.y, 458.0 - 9.5);
        assert_eq!(world.score, 1);
        assert_eq!(world.max_score, 1);
        assert_eq!(report.points, 1);
    }

    #[test]
    fn test_bounce_is_exact() {
        let mut world = world_above_anchor();
        world.doodler.vel.x = 4.0;

        let report = step(&mut world, 1.0);

        assert!(report.bounced);
        assert_eq!(world.doodler.vel.y, world.tuning.jump_velocity);
        assert_eq!(world.doodler.vel.x, 0.0);
        // Bounce leaves the doodler rising, which earns the climb point
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_bounce_keeps_drift_when_configured() {
        let mut world = world_above_anchor();
        world.tuning.stop_on_bounce = false;
        world.doodler.vel.x = -4.0;

        step(&mut world, 1.0);
        assert_eq!(world.doodler.vel.x, -4.0);
        assert_eq!(world.doodler.vel.y, -10.0);
    }

    #[test]
    fn test_rising_doodler_passes_through() {
        let mut world = world_above_anchor();
        world.doodler.pos.y = 526.0 - 20.0;
        world.doodler.vel.y = -3.0;

        let report = step(&mut world, 1.0);
        assert!(!report.bounced);
        assert_eq!(world.doodler.vel.y, -2.5);
    }

    #[test]
    fn test_double_overlap_bounces_once() {
        let mut world = world_above_anchor();
        // Second platform stacked on the anchor
        let mut twin = world.platforms[0].clone();
        twin.pos.y -= 4.0;
        world.platforms.insert(1, twin);

        let report = step(&mut world, 1.0);
        assert!(report.bounced);
        assert_eq!(world.doodler.vel.y, -10.0);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut world = world();
        world.doodler.pos.x = 358.0;
        world.doodler.vel.x = 4.0;
        step(&mut world, 1.0);
        assert_eq!(world.doodler.pos.x, 0.0);
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut world = world();
        world.doodler.pos.x = -44.0;
        world.doodler.vel.x = -4.0;
        step(&mut world, 1.0);
        assert_eq!(world.doodler.pos.x, 360.0 - 46.0);
    }

    #[test]
    fn test_partially_offscreen_does_not_wrap() {
        assert_eq!(wrap_horizontal(-20.0, 46.0, 360.0), -20.0);
        assert_eq!(wrap_horizontal(360.0, 46.0, 360.0), 360.0);
    }

    #[test]
    fn test_scroll_rule_exact_offset() {
        let mut world = world();
        let line = world.tuning.scroll_line();
        world.doodler.pos.y = line - 1.0;
        world.doodler.vel.y = -5.0;
        let before: Vec<f32> = world.platforms.iter().map(|p| p.pos.y).collect();

        let offset = scroll_world(&mut world, 1.0);

        assert_eq!(offset, 1.0);
        assert_eq!(world.doodler.pos.y, line);
        for (p, y) in world.platforms.iter().zip(before) {
            assert_eq!(p.pos.y, y + 1.0);
        }
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_scroll_during_step() {
        let mut world = world();
        // Lands at line - 1 after integration: vy -5.5 + 0.5 = -5, y 196 - 5 = 191
        world.doodler.pos.y = 196.0;
        world.doodler.vel.y = -5.5;
        let before: Vec<f32> = world.platforms.iter().map(|p| p.pos.y).collect();

        let report = step(&mut world, 1.0);

        assert_eq!(report.scroll_offset, 1.0);
        assert_eq!(world.doodler.pos.y, 192.0);
        for (p, y) in world.platforms.iter().zip(before) {
            assert_eq!(p.pos.y, y + 1.0);
        }
        // floor(1 / 10) = 0 from scrolling, plus the climb point
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_scroll_points_double_count() {
        let mut world = world();
        world.doodler.pos.y = 192.0 - 25.0;
        world.doodler.vel.y = -5.0;

        let offset = scroll_world(&mut world, 1.0);
        assert_eq!(offset, 25.0);
        assert_eq!(world.score, 2);
    }

    #[test]
    fn test_scroll_and_climb_points_in_one_step() {
        let mut world = world();
        // After integration: vy -5, y 167, offset 192 - 167 = 25
        world.doodler.pos.y = 172.0;
        world.doodler.vel.y = -5.5;

        let report = step(&mut world, 1.0);

        assert_eq!(report.scroll_offset, 25.0);
        // floor(25 / 10) = 2 from scrolling, plus the climb point
        assert_eq!(report.points, 3);
        assert_eq!(world.score, 3);
        assert_eq!(world.max_score, 3);
    }

    #[test]
    fn test_no_scroll_while_falling() {
        let mut world = world();
        world.doodler.pos.y = 100.0;
        world.doodler.vel.y = 2.0;
        assert_eq!(scroll_world(&mut world, 1.0), 0.0);
        assert_eq!(world.doodler.pos.y, 100.0);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut world = world();
        world.doodler.pos.y = world.tuning.field_height + 1.0;
        world.doodler.vel.y = 0.0;
        world.score = 40;

        let report = step(&mut world, 1.0);
        assert!(report.game_over);
        assert!(world.is_game_over());

        let frozen = world.snapshot();
        let ticks = world.time_ticks;
        for dt in [1.0, 2.5, 100.0] {
            let report = step(&mut world, dt);
            assert!(!report.advanced);
        }
        assert_eq!(world.snapshot(), frozen);
        assert_eq!(world.time_ticks, ticks);
        assert_eq!(world.score, 40);
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut world = world();
        let before = world.snapshot();
        for dt in [0.0, -1.0, f32::NAN, f32::NEG_INFINITY] {
            let report = step(&mut world, dt);
            assert!(!report.advanced);
        }
        assert_eq!(world.snapshot(), before);
        assert_eq!(world.time_ticks, 0);
    }

    #[test]
    fn test_large_dt_clamped() {
        let mut world = world();
        let report = step(&mut world, 100.0);
        assert_eq!(report.dt, 3.0);
        assert_eq!(world.doodler.vel.y, -8.5);
        assert_eq!(world.doodler.pos.y, 458.0 - 25.5);

        let report = step(&mut world, f32::INFINITY);
        assert_eq!(report.dt, 3.0);
    }

    #[test]
    fn test_per_frame_mode_ignores_dt() {
        let mut tuning = Tuning::default();
        tuning.delta_mode = DeltaMode::PerFrame;
        let mut world = World::new(1, tuning);
        let report = step(&mut world, 2.5);
        assert_eq!(report.dt, 1.0);
        assert_eq!(world.doodler.vel.y, -9.5);
    }

    #[test]
    fn test_recycle_several_in_one_step() {
        let mut world = world();
        for p in world.platforms.iter_mut().take(3) {
            p.pos.y = world.tuning.field_height + 10.0;
        }
        let survivors: Vec<_> = world.platforms.iter().skip(3).cloned().collect();

        let recycled = recycle_platforms(&mut world);

        assert_eq!(recycled, 3);
        assert_eq!(world.platforms.len(), 7);
        assert_eq!(
            world.platforms.iter().take(4).cloned().collect::<Vec<_>>(),
            survivors
        );
        for p in world.platforms.iter().skip(4) {
            assert_eq!(p.pos.y, -18.0);
        }
    }

    #[test]
    fn test_huge_climb_recycles_everything() {
        let mut world = world();
        world.doodler.pos.y = -1000.0;
        world.doodler.vel.y = -10.0;

        let report = step(&mut world, 3.0);

        assert_eq!(report.recycled, 7);
        assert_eq!(world.platforms.len(), 7);
        assert!(world.platforms.iter().all(|p| p.pos.y == -18.0));
        assert!(report.points > 100);
    }

    #[test]
    fn test_front_exactly_at_bottom_is_recycled() {
        let mut world = world();
        world.platforms[0].pos.y = world.tuning.field_height;
        assert_eq!(recycle_platforms(&mut world), 1);
    }

    #[test]
    #[should_panic(expected = "no platforms")]
    fn test_empty_platforms_is_fatal() {
        let mut world = world();
        world.platforms.clear();
        step(&mut world, 1.0);
    }

    #[test]
    fn test_facing_untouched_by_step() {
        let mut world = world();
        world.doodler.facing = Facing::Left;
        step(&mut world, 1.0);
        assert_eq!(world.doodler.facing, Facing::Left);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999, Tuning::default());
        let mut b = World::new(99999, Tuning::default());
        let dts = [1.0, 0.8, 1.2, 3.0, 0.0, 1.0, 2.2];

        for _ in 0..200 {
            for &dt in &dts {
                step(&mut a, dt);
                step(&mut b, dt);
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    proptest! {
        #[test]
        fn prop_wrap_stays_in_band(
            x in -5000.0f32..5000.0,
            width in 1.0f32..100.0,
            field in 100.0f32..1000.0,
        ) {
            let wrapped = wrap_horizontal(x, width, field);
            prop_assert!(wrapped >= -width && wrapped <= field);
            // Applying the rule again changes nothing
            prop_assert_eq!(wrap_horizontal(wrapped, width, field), wrapped);
        }

        #[test]
        fn prop_platform_count_constant(
            seed in any::<u64>(),
            dts in proptest::collection::vec(0.0f32..10.0, 1..300),
            steer in proptest::collection::vec(-1i8..=1, 1..300),
        ) {
            let mut world = World::new(seed, Tuning::default());
            for (i, &dt) in dts.iter().enumerate() {
                world.doodler.vel.x = f32::from(steer[i % steer.len()]) * 4.0;
                step(&mut world, dt);
                prop_assert_eq!(world.platforms.len(), 7);
            }
        }

        #[test]
        fn prop_score_monotonic_and_frozen(
            seed in any::<u64>(),
            dts in proptest::collection::vec(0.1f32..4.0, 1..400),
        ) {
            let mut world = World::new(seed, Tuning::default());
            let mut last = world.score;
            for &dt in &dts {
                let was_over = world.is_game_over();
                step(&mut world, dt);
                prop_assert!(world.score >= last);
                if was_over {
                    prop_assert_eq!(world.score, last);
                }
                prop_assert!(world.max_score >= world.score);
                last = world.score;
            }
        }

        #[test]
        fn prop_bounce_exact_on_contact(
            x_offset in -40.0f32..50.0,
            fall_speed in 0.0f32..6.0,
        ) {
            let mut world = world_above_anchor();
            world.doodler.pos.x = 180.0 + x_offset;
            world.doodler.vel.y = fall_speed;
            let report = step(&mut world, 1.0);
            if report.bounced {
                prop_assert_eq!(world.doodler.vel.y, world.tuning.jump_velocity);
            }
        }
    }
}
