//! Trajectory paths
//!
//! A path is sampled once from a scalar curve `y = f(x)` and never changes
//! afterwards. The curves themselves are plain configuration data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PATH_LENGTH;
use crate::error::ConfigError;
use crate::linspace;

/// Horizontal travel direction along the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing x (left to right)
    #[default]
    #[serde(alias = "LtoR")]
    Forward,
    /// Decreasing x (right to left)
    #[serde(alias = "RtoL")]
    Reverse,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// Scalar trajectory curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    /// Straight line through `anchor`: `slope * (x - anchor.x) + anchor.y`
    Linear { slope: f32, anchor: Vec2 },
    /// Parabola in a shifted variable: `a*u^2 + b*u + c` with `u = x + shift`
    Quadratic { a: f32, b: f32, c: f32, shift: f32 },
}

impl Formula {
    /// The identity line `y = x`
    pub const IDENTITY: Formula = Formula::Linear {
        slope: 1.0,
        anchor: Vec2::ZERO,
    };

    /// Line with the given slope passing through `anchor`
    pub fn line_through(anchor: Vec2, slope: f32) -> Self {
        Formula::Linear { slope, anchor }
    }

    pub fn eval(&self, x: f32) -> f32 {
        match *self {
            Formula::Linear { slope, anchor } => slope * (x - anchor.x) + anchor.y,
            Formula::Quadratic { a, b, c, shift } => {
                let u = x + shift;
                a * u * u + b * u + c
            }
        }
    }
}

fn default_length() -> usize {
    DEFAULT_PATH_LENGTH
}

/// Everything needed to build one trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    pub formula: Formula,
    pub start: Vec2,
    /// Number of sampled points
    #[serde(default = "default_length")]
    pub length: usize,
    /// Horizontal extent covered by the path
    pub speed: f32,
    #[serde(default)]
    pub direction: Direction,
}

impl TrajectoryConfig {
    pub fn new(formula: Formula, start: Vec2, speed: f32, direction: Direction) -> Self {
        Self {
            formula,
            start,
            length: DEFAULT_PATH_LENGTH,
            speed,
            direction,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Sample this configuration into a path
    pub fn build(&self) -> Result<Path, ConfigError> {
        let formula = self.formula;
        generate(
            move |x| formula.eval(x),
            self.start,
            self.length,
            self.speed,
            self.direction,
        )
    }
}

/// Immutable ordered point sequence, at least two points long
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vec2>,
}

impl Path {
    /// Wrap raw points, rejecting anything shorter than one segment
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::PathTooShort {
                length: points.len(),
            });
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn first(&self) -> Vec2 {
        self.points[0]
    }

    pub fn last(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Points in `[max(0, end - len), end)`
    pub fn window(&self, end: usize, len: usize) -> &[Vec2] {
        let end = end.min(self.points.len());
        &self.points[end.saturating_sub(len)..end]
    }
}

/// Sample `length` points along `formula`, starting at `start.x` and
/// covering `speed` horizontally in `direction`.
///
/// Only the x coordinate of `start` drives sampling; y comes from the curve.
pub fn generate<F>(
    formula: F,
    start: Vec2,
    length: usize,
    speed: f32,
    direction: Direction,
) -> Result<Path, ConfigError>
where
    F: Fn(f32) -> f32,
{
    if length < 2 {
        return Err(ConfigError::PathTooShort { length });
    }

    let end_x = start.x + direction.sign() * speed;
    let points = linspace(start.x, end_x, length)
        .into_iter()
        .map(|x| Vec2::new(x, formula(x)))
        .collect();

    Path::from_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_identity_line() {
        let path = generate(|x| x, Vec2::ZERO, 5, 1.0, Direction::Forward).expect("valid path");
        let xs: Vec<f32> = path.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        for p in path.points() {
            assert_eq!(p.x, p.y);
        }
    }

    #[test]
    fn test_generate_reverse_direction() {
        let path = generate(|_| 2.0, Vec2::new(-0.18, -0.3), 3, 0.8, Direction::Reverse)
            .expect("valid path");
        assert_eq!(path.first().x, -0.18);
        assert!((path.last().x - (-0.98)).abs() < 1e-6);
        assert!(path.points().iter().all(|p| p.y == 2.0));
    }

    #[test]
    fn test_generate_rejects_short_paths() {
        for length in [0, 1] {
            let err = generate(|x| x, Vec2::ZERO, length, 1.0, Direction::Forward).unwrap_err();
            assert_eq!(err, ConfigError::PathTooShort { length });
        }
    }

    #[test]
    fn test_non_finite_samples_are_kept() {
        let path = generate(|x| 1.0 / x, Vec2::ZERO, 3, 1.0, Direction::Forward)
            .expect("non-finite values are a per-tick concern");
        assert!(!path.first().y.is_finite());
    }

    #[test]
    fn test_formula_eval() {
        let line = Formula::line_through(Vec2::new(-0.8, -1.6), -2.75);
        assert_eq!(line.eval(-0.8), -1.6);
        assert!((line.eval(-0.7) - (-1.875)).abs() < 1e-5);

        let fan = Formula::Quadratic {
            a: 1.0,
            b: 0.0,
            c: -1.0,
            shift: 1.0,
        };
        assert_eq!(fan.eval(1.0), 3.0);
        assert_eq!(Formula::IDENTITY.eval(0.42), 0.42);
    }

    #[test]
    fn test_config_serde_accepts_legacy_direction_names() {
        let json = r#"{
            "formula": { "kind": "linear", "slope": -0.176, "anchor": [-0.85, -0.186] },
            "start": [-0.85, -0.186],
            "speed": 0.3,
            "direction": "RtoL"
        }"#;
        let config: TrajectoryConfig = serde_json::from_str(json).expect("config parses");
        assert_eq!(config.direction, Direction::Reverse);
        assert_eq!(config.length, DEFAULT_PATH_LENGTH);
        assert_eq!(config.build().expect("builds").len(), DEFAULT_PATH_LENGTH);
    }

    #[test]
    fn test_window_clamps_at_start() {
        let path = generate(|x| x, Vec2::ZERO, 10, 9.0, Direction::Forward).expect("valid path");
        assert!(path.window(0, 3).is_empty());
        assert_eq!(path.window(2, 3).len(), 2);
        let w = path.window(7, 3);
        assert_eq!(w.len(), 3);
        assert!((w[0].x - 4.0).abs() < 1e-5);
        assert!((w[2].x - 6.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_generate_length_and_endpoints(
            x0 in -10.0f32..10.0,
            speed in 0.0f32..5.0,
            length in 2usize..400,
            reverse in any::<bool>(),
        ) {
            let direction = if reverse { Direction::Reverse } else { Direction::Forward };
            let path = generate(|x| x * 0.5, Vec2::new(x0, 0.0), length, speed, direction).unwrap();
            prop_assert_eq!(path.len(), length);
            prop_assert_eq!(path.first().x, x0);
            prop_assert_eq!(path.last().x, x0 + direction.sign() * speed);
        }
    }
}
