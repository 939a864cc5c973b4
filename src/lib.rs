//! Wind Trails - animated wind trajectories over a coastline
//!
//! Core modules:
//! - `sim`: Deterministic trajectory animation (paths, coastline collision, fields)
//! - `renderer`: Render surface capability and trail tessellation
//! - `settings`: Data-driven animation tuning
//! - `scenario`: Region/season trajectory presets
//! - `viewer`: Active field ownership and replacement

pub mod error;
pub mod renderer;
pub mod scenario;
pub mod settings;
pub mod sim;
pub mod viewer;

pub use error::{ConfigError, LoadError};
pub use scenario::{Region, Scenario, Season};
pub use settings::{CollisionPolicy, Settings};
pub use viewer::Viewer;

/// Animation configuration constants
pub mod consts {
    /// Nominal frame clock interval (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Maximum clock pulses per update to prevent spiral of death
    pub const MAX_CATCHUP_PULSES: u32 = 8;
    /// Upper bound accepted for the tick interval (milliseconds)
    pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;
    /// Upper bound accepted for catch-up pulses per update
    pub const MAX_CATCHUP_LIMIT: u32 = 1_000;

    /// Number of trailing path points shown behind the head
    pub const VISIBLE_LENGTH: usize = 30;
    /// Default number of points sampled per trajectory
    pub const DEFAULT_PATH_LENGTH: usize = 250;

    /// Opacity lost per tick while frozen after a collision
    pub const FADE_STEP: f32 = 0.02;

    /// Trail width at the tail
    pub const MIN_WIDTH: f32 = 0.5;
    /// Trail width at the head
    pub const MAX_WIDTH: f32 = 1.5;

    /// Sharpness of the Gaussian opacity falloff toward the tail
    pub const GAUSSIAN_SHARPNESS: f32 = 10.0;
    /// Per-point opacity below this is snapped to zero
    pub const ALPHA_CLAMP: f32 = 0.01;

    /// Frame after which the whole trail starts fading (restart policy)
    pub const GLOBAL_FADE_START: usize = 120;
    /// Frames over which the global fade reaches zero
    pub const GLOBAL_FADE_SPAN: usize = 100;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `count` evenly spaced values from `start` to `end`, both endpoints included
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (count - 1) as f32;
            (0..count)
                .map(|i| {
                    // Pin the endpoint so it is exact rather than accumulated
                    if i == count - 1 {
                        end
                    } else {
                        lerp(start, end, i as f32 / last)
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let reversed = linspace(-0.18, -0.98, 3);
        assert_eq!(reversed[0], -0.18);
        assert_eq!(reversed[2], -0.98);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.5, 1.5, 0.0), 0.5);
        assert_eq!(lerp(0.5, 1.5, 1.0), 1.5);
        assert!((lerp(0.5, 1.5, 0.5) - 1.0).abs() < 1e-6);
    }
}
