//! Trajectory simulation module
//!
//! Paths, coastline geometry and the per-trail animation state machines.
//! Nothing in here draws: frames leave through the `RenderSurface` the
//! field is handed, and time enters only through `FrameClock`.
//! - Fixed tick interval
//! - No randomness
//! - Stable iteration order (by trail id)

pub mod animator;
pub mod clock;
pub mod coastline;
pub mod field;
pub mod path;
pub mod style;

pub use animator::{Lifecycle, TrailFrame, TrailId, TrailStats, TrajectoryAnimator};
pub use clock::FrameClock;
pub use coastline::{Bounds, Coastline, IntersectionOracle, LineSegment, Polygon, Ring};
pub use field::{RejectedConfig, TrajectoryField};
pub use path::{Direction, Formula, Path, TrajectoryConfig, generate};
pub use style::{gaussian_alphas, global_fade, width_taper};
