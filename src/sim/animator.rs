//! Per-trajectory comet animation
//!
//! Each animator walks a window of `visible_length` points along its path,
//! one point per tick, styling the window as a fading comet. When the head
//! segment touches the coastline the collision policy decides what happens:
//! `Restart` wipes the trail and starts over on the same tick, `FreezeFade`
//! holds the trail in place while it fades out, then starts over.
//!
//! Tick order:
//! 1. Frozen trails only fade (no cursor movement, no collision test).
//! 2. Build segments from the window ending at the cursor.
//! 3. Test the newest segment; a hit is handled and ends the tick.
//! 4. Style the window (Gaussian opacity, width taper, late global fade).
//! 5. Advance the cursor, wrapping to the start near the end of the path.

use super::coastline::{IntersectionOracle, LineSegment};
use super::path::Path;
use super::style::{gaussian_alphas, global_fade, width_taper};
use crate::error::ConfigError;
use crate::settings::{CollisionPolicy, Settings};

/// Identifies one trail on the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrailId(pub u32);

/// Playback state of a trail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// Moving along the path
    Running,
    /// Stopped on the coastline, fading toward a restart
    FrozenFading { fade_alpha: f32 },
}

/// Everything the render surface needs to draw one trail for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TrailFrame {
    pub id: TrailId,
    /// Cursor after this tick
    pub frame: usize,
    pub lifecycle: Lifecycle,
    pub segments: Vec<LineSegment>,
    /// Per-point opacity, tail first (empty when unstyled)
    pub alphas: Vec<f32>,
    /// Per-point width, tail first (empty when unstyled)
    pub widths: Vec<f32>,
    /// Multiplier applied on top of the per-point opacity
    pub global_alpha: f32,
}

impl TrailFrame {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Running counters for one trail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailStats {
    pub ticks: u64,
    pub collisions: u64,
    /// Restarts caused by a collision (immediately or after fading)
    pub restarts: u64,
    /// Restarts caused by reaching the end of the path
    pub wraps: u64,
}

impl TrailStats {
    pub fn merge(&mut self, other: &TrailStats) {
        self.ticks += other.ticks;
        self.collisions += other.collisions;
        self.restarts += other.restarts;
        self.wraps += other.wraps;
    }
}

/// Comet animation state machine for one path
#[derive(Debug, Clone)]
pub struct TrajectoryAnimator {
    id: TrailId,
    path: Path,
    settings: Settings,
    frame: usize,
    lifecycle: Lifecycle,
    segments: Vec<LineSegment>,
    alphas: Vec<f32>,
    widths: Vec<f32>,
    global_alpha: f32,
    stats: TrailStats,
}

impl TrajectoryAnimator {
    /// Fails when `settings` would leave a trail stuck (e.g. a fade that
    /// never reaches zero)
    pub fn new(id: TrailId, path: Path, settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            id,
            path,
            settings: settings.clone(),
            frame: 0,
            lifecycle: Lifecycle::Running,
            segments: Vec::new(),
            alphas: Vec::new(),
            widths: Vec::new(),
            global_alpha: 1.0,
            stats: TrailStats::default(),
        })
    }

    pub fn id(&self) -> TrailId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.settings.policy
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    /// Advance one tick and return what should be drawn
    pub fn advance(&mut self, oracle: &dyn IntersectionOracle) -> TrailFrame {
        self.stats.ticks += 1;

        if let Lifecycle::FrozenFading { fade_alpha } = self.lifecycle {
            self.fade(fade_alpha);
            return self.snapshot();
        }

        let window = self.path.window(self.frame, self.settings.visible_length);
        let window_len = window.len();
        let finite = window.iter().all(|p| p.is_finite());

        self.segments.clear();
        if finite {
            self.segments
                .extend(window.windows(2).map(|w| LineSegment::new(w[0], w[1])));
        }

        if let Some(head) = self.segments.last().copied() {
            if oracle.intersects(&head) {
                self.stats.collisions += 1;
                match self.settings.policy {
                    CollisionPolicy::Restart => {
                        log::debug!(
                            "Trail {:?} hit coastline at frame {}, restarting",
                            self.id,
                            self.frame
                        );
                        self.restart();
                        self.stats.restarts += 1;
                    }
                    CollisionPolicy::FreezeFade => {
                        log::debug!(
                            "Trail {:?} hit coastline at frame {}, freezing",
                            self.id,
                            self.frame
                        );
                        self.style(window_len);
                        self.lifecycle = Lifecycle::FrozenFading {
                            fade_alpha: self.global_alpha,
                        };
                    }
                }
                return self.snapshot();
            }
        }

        if finite {
            self.style(window_len);
        } else {
            // Unusable samples: draw nothing this tick but keep moving
            self.alphas.clear();
            self.widths.clear();
        }

        let next = self.frame + 1;
        if next >= self.path.len() - 1 {
            self.restart();
            self.stats.wraps += 1;
        } else {
            self.frame = next;
        }

        self.snapshot()
    }

    /// One fade step while frozen; restarts once fully transparent
    fn fade(&mut self, fade_alpha: f32) {
        let alpha = fade_alpha - self.settings.fade_step;
        if alpha <= 0.0 {
            self.restart();
            self.stats.restarts += 1;
        } else {
            self.global_alpha = alpha;
            self.lifecycle = Lifecycle::FrozenFading { fade_alpha: alpha };
        }
    }

    /// Per-point style for a window of `count` points at the current cursor
    fn style(&mut self, count: usize) {
        if count < 2 {
            self.alphas.clear();
            self.widths.clear();
            return;
        }

        self.alphas = gaussian_alphas(count);
        self.widths = width_taper(count, self.settings.min_width, self.settings.max_width);

        self.global_alpha = if self.settings.policy.uses_global_fade() {
            global_fade(
                self.frame,
                self.settings.global_fade_start,
                self.settings.global_fade_span,
            )
        } else {
            1.0
        };
    }

    /// Clear the trail and rewind to the first point
    fn restart(&mut self) {
        self.segments.clear();
        self.alphas.clear();
        self.widths.clear();
        self.global_alpha = 1.0;
        self.frame = 0;
        self.lifecycle = Lifecycle::Running;
    }

    fn snapshot(&self) -> TrailFrame {
        TrailFrame {
            id: self.id,
            frame: self.frame,
            lifecycle: self.lifecycle,
            segments: self.segments.clone(),
            alphas: self.alphas.clone(),
            widths: self.widths.clone(),
            global_alpha: self.global_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::coastline::{Coastline, Polygon};
    use crate::sim::path::{Direction, generate};
    use glam::Vec2;
    use proptest::prelude::*;
    use std::cell::Cell;

    /// Oracle driven by a closure
    struct FnOracle<F: Fn(&LineSegment) -> bool>(F);

    impl<F: Fn(&LineSegment) -> bool> IntersectionOracle for FnOracle<F> {
        fn intersects(&self, segment: &LineSegment) -> bool {
            (self.0)(segment)
        }
    }

    /// Never hits, counts queries
    #[derive(Default)]
    struct CountingOracle {
        calls: Cell<usize>,
    }

    impl IntersectionOracle for CountingOracle {
        fn intersects(&self, _segment: &LineSegment) -> bool {
            self.calls.set(self.calls.get() + 1);
            false
        }
    }

    fn identity_path(length: usize) -> Path {
        generate(|x| x, Vec2::ZERO, length, 1.0, Direction::Forward).unwrap()
    }

    fn square(min: f32, max: f32) -> Coastline {
        Coastline::new(vec![
            Polygon::from_points(vec![
                Vec2::new(min, min),
                Vec2::new(max, min),
                Vec2::new(max, max),
                Vec2::new(min, max),
            ])
            .unwrap(),
        ])
    }

    fn animator(length: usize, policy: CollisionPolicy) -> TrajectoryAnimator {
        TrajectoryAnimator::new(TrailId(1), identity_path(length), &Settings::with_policy(policy))
            .unwrap()
    }

    #[test]
    fn test_end_to_end_identity_wraps_after_four_ticks() {
        let mut anim = animator(5, CollisionPolicy::FreezeFade);
        let coast = Coastline::empty();
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.lifecycle(), Lifecycle::Running);

        let frames: Vec<usize> = (0..4).map(|_| anim.advance(&coast).frame).collect();
        assert_eq!(frames, vec![1, 2, 3, 0]);
        assert_eq!(anim.stats().wraps, 1);
        assert_eq!(anim.stats().collisions, 0);
    }

    #[test]
    fn test_window_grows_then_slides() {
        let mut anim = animator(100, CollisionPolicy::FreezeFade);
        let coast = Coastline::empty();

        // Frame 0 and 1 have fewer than two points in view
        assert!(anim.advance(&coast).is_empty());
        assert!(anim.advance(&coast).is_empty());
        let out = anim.advance(&coast);
        assert_eq!(out.segments.len(), 1);
        assert_eq!(out.alphas.len(), 2);

        for _ in 0..40 {
            anim.advance(&coast);
        }
        let out = anim.advance(&coast);
        assert_eq!(out.segments.len(), 29);
        assert_eq!(out.alphas.len(), 30);
        assert_eq!(out.widths.len(), 30);
    }

    #[test]
    fn test_style_shape_in_emission() {
        let mut anim = animator(100, CollisionPolicy::FreezeFade);
        let coast = Coastline::empty();
        let out = (0..50).map(|_| anim.advance(&coast)).last().unwrap();

        for pair in out.alphas.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for pair in out.widths.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(out.widths[0], 0.5);
        assert_eq!(*out.widths.last().unwrap(), 1.5);
        assert_eq!(out.global_alpha, 1.0);
    }

    #[test]
    fn test_restart_policy_clears_on_hit() {
        let mut anim = animator(101, CollisionPolicy::Restart);
        let coast = square(0.495, 0.605);

        let mut hit = None;
        for _ in 0..100 {
            let out = anim.advance(&coast);
            if anim.stats().collisions > 0 {
                hit = Some(out);
                break;
            }
        }

        let out = hit.expect("trail should reach the square");
        assert!(out.segments.is_empty());
        assert_eq!(out.frame, 0);
        assert_eq!(out.global_alpha, 1.0);
        assert_eq!(anim.stats().restarts, 1);
        assert_eq!(anim.stats().wraps, 0);
    }

    #[test]
    fn test_freeze_policy_fades_then_restarts() {
        let mut anim = animator(101, CollisionPolicy::FreezeFade);
        let coast = square(0.495, 0.605);

        let frozen = loop {
            let out = anim.advance(&coast);
            if anim.stats().collisions > 0 {
                break out;
            }
            assert!(anim.stats().ticks < 100, "trail never reached the square");
        };
        assert!(matches!(frozen.lifecycle, Lifecycle::FrozenFading { .. }));
        assert!(!frozen.segments.is_empty());
        assert_eq!(frozen.global_alpha, 1.0);

        let mut last_alpha = frozen.global_alpha;
        let mut fade_ticks = 0;
        loop {
            let out = anim.advance(&coast);
            fade_ticks += 1;
            assert!(fade_ticks <= 60, "fade never completed");

            if out.lifecycle == Lifecycle::Running {
                assert_eq!(out.global_alpha, 1.0);
                assert_eq!(out.frame, 0);
                assert!(out.segments.is_empty());
                break;
            }

            assert!(out.global_alpha <= last_alpha);
            assert_eq!(out.frame, frozen.frame);
            assert_eq!(out.segments, frozen.segments);
            last_alpha = out.global_alpha;
        }

        // 1.0 / 0.02 steps, give or take float rounding
        assert!((49..=51).contains(&fade_ticks));
        assert_eq!(anim.stats().collisions, 1);
        assert_eq!(anim.stats().restarts, 1);
    }

    #[test]
    fn test_collision_takes_precedence_over_wrap() {
        // Head segment (0.25, 0.25)-(0.5, 0.5) is first tested on the wrap tick
        let hits_middle = FnOracle(|s: &LineSegment| s.b.x >= 0.5);

        let mut anim = animator(5, CollisionPolicy::Restart);
        for _ in 0..4 {
            anim.advance(&hits_middle);
        }
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.stats().collisions, 1);
        assert_eq!(anim.stats().restarts, 1);
        assert_eq!(anim.stats().wraps, 0);

        let mut anim = animator(5, CollisionPolicy::FreezeFade);
        for _ in 0..4 {
            anim.advance(&hits_middle);
        }
        assert_eq!(anim.frame(), 3);
        assert!(matches!(anim.lifecycle(), Lifecycle::FrozenFading { .. }));
        assert_eq!(anim.stats().wraps, 0);
    }

    #[test]
    fn test_global_fade_only_for_restart_policy() {
        let coast = Coastline::empty();

        let mut restart = animator(250, CollisionPolicy::Restart);
        let out = (0..171).map(|_| restart.advance(&coast)).last().unwrap();
        // The 171st tick processed frame 170
        assert!((out.global_alpha - 0.5).abs() < 1e-5);

        let mut freeze = animator(250, CollisionPolicy::FreezeFade);
        let out = (0..171).map(|_| freeze.advance(&coast)).last().unwrap();
        assert_eq!(out.global_alpha, 1.0);
    }

    #[test]
    fn test_non_finite_samples_skip_collision_but_advance() {
        let mut points: Vec<Vec2> = (0..10).map(|i| Vec2::splat(i as f32)).collect();
        points[3] = Vec2::new(3.0, f32::NAN);
        let path = Path::from_points(points).unwrap();
        let mut anim = TrajectoryAnimator::new(TrailId(7), path, &Settings::default()).unwrap();
        let oracle = CountingOracle::default();

        let mut frames = Vec::new();
        for _ in 0..9 {
            let out = anim.advance(&oracle);
            if out.frame >= 5 {
                assert!(out.segments.is_empty());
                assert!(out.alphas.is_empty());
            }
            frames.push(out.frame);
        }

        assert_eq!(frames, vec![1, 2, 3, 4, 5, 6, 7, 8, 0]);
        // Only the windows ending before the bad sample were tested
        assert_eq!(oracle.calls.get(), 2);
    }

    #[test]
    fn test_rejects_settings_that_never_finish_fading() {
        for fade_step in [0.0, -0.02, f32::NAN] {
            let settings = Settings {
                fade_step,
                ..Settings::default()
            };
            let result = TrajectoryAnimator::new(TrailId(1), identity_path(10), &settings);
            assert!(matches!(result, Err(ConfigError::InvalidSettings { .. })));
        }
    }

    #[test]
    fn test_always_hit_trail_keeps_restarting() {
        let always = FnOracle(|_: &LineSegment| true);
        let mut anim = animator(50, CollisionPolicy::FreezeFade);
        for _ in 0..10_000 {
            anim.advance(&always);
        }
        // Each cycle is 3 ticks to reach a segment plus roughly 50 fade ticks
        assert!(anim.stats().restarts > 100);
        let stats = anim.stats();
        assert!(stats.collisions - stats.restarts <= 1);
    }

    #[test]
    fn test_two_point_path_never_draws() {
        let mut anim = animator(2, CollisionPolicy::Restart);
        let coast = Coastline::empty();
        for _ in 0..5 {
            let out = anim.advance(&coast);
            assert_eq!(out.frame, 0);
            assert!(out.is_empty());
        }
    }

    proptest! {
        #[test]
        fn prop_never_colliding_loops_after_len_minus_one(length in 2usize..300) {
            let mut anim = animator(length, CollisionPolicy::Restart);
            let coast = Coastline::empty();

            for tick in 1..length {
                let out = anim.advance(&coast);
                prop_assert!(out.frame < length);
                if tick < length - 1 {
                    prop_assert_eq!(out.frame, tick);
                }
            }
            prop_assert_eq!(anim.frame(), 0);
            prop_assert_eq!(anim.stats().wraps, 1);
        }

        #[test]
        fn prop_frame_stays_in_bounds(
            length in 2usize..120,
            wall in 0.0f32..1.0,
            freeze in any::<bool>(),
        ) {
            let policy = if freeze { CollisionPolicy::FreezeFade } else { CollisionPolicy::Restart };
            let mut anim = animator(length, policy);
            let oracle = FnOracle(move |s: &LineSegment| s.a.x <= wall && s.b.x >= wall);

            for _ in 0..(3 * length + 60) {
                let out = anim.advance(&oracle);
                prop_assert!(out.frame < length);
                prop_assert!(out.global_alpha > 0.0 && out.global_alpha <= 1.0);
            }
        }
    }
}
