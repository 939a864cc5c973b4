//! Region and season presets for Howe Sound
//!
//! Each preset is a list of trajectory configurations in the normalized
//! coordinate space of the matching basemap. Prevailing-wind lines use the
//! slope of the two most frequent daytime wind directions; fan lines spread
//! from the head of the sound; upstream lines follow the valley outflow.

use glam::Vec2;

use crate::sim::{Direction, Formula, TrajectoryConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Northern,
    Central,
    Southern,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Northern, Region::Central, Region::Southern];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Northern => "Northern",
            Region::Central => "Central",
            Region::Southern => "Southern",
        }
    }

    /// Name used in titles; the south is labelled "South", not "Southern"
    pub fn title_label(&self) -> &'static str {
        match self {
            Region::Southern => "South",
            _ => self.label(),
        }
    }

    /// Accepts "northern", "north", "Northern Howe Sound", ...
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        let word = s.split_whitespace().next().unwrap_or("");
        match word {
            "northern" | "north" => Some(Region::Northern),
            "central" => Some(Region::Central),
            "southern" | "south" => Some(Region::Southern),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Summer, Season::Winter];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summer" => Some(Season::Summer),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

// Prevailing-wind slopes: tan of the angle between the daytime wind and the x axis
const NORTH_SUMMER_SLOPE: f32 = -2.75;
const NORTH_WINTER_SLOPE: f32 = -3.73;
const CENTRAL_SUMMER_SLOPE: f32 = -1.19;
const CENTRAL_WINTER_SLOPE: f32 = -5.67;
const CENTRAL_UPSTREAM_SLOPE: f32 = 1.0;
const SOUTHERN_SLOPE: f32 = -0.176;

const NORTH_FAN_SPREAD: [f32; 4] = [10.0, 1.3, 0.6, -0.27];
const CENTRAL_FAN_OFFSETS: [f32; 4] = [0.0, 0.245, 0.292, 0.14];

const NORTH_SUMMER_STARTS: [(f32, f32); 2] = [(-0.8, -1.6), (-0.66, -1.46)];

const NORTH_WINTER_STARTS: [(f32, f32); 6] = [
    (-0.238, -0.3),
    (-0.44, -0.35),
    (-0.565, -0.43),
    (-0.73, -1.18),
    (-0.62, -0.95),
    (-0.544, -0.91),
];

const CENTRAL_SUMMER_STARTS: [(f32, f32); 17] = [
    (-0.45, -0.31),
    (-0.178, -0.5),
    (-0.21, -0.7),
    (-0.124, -0.49),
    (-0.31, -0.65),
    (-0.292, -0.94),
    (-0.35, -1.0),
    (-0.67, -0.955),
    (-0.56, -0.91),
    (-0.54, -0.86),
    (-0.064, -1.04),
    (-0.855, -0.69),
    (-0.85, -0.54),
    (-0.598, -0.31),
    (-0.785, -0.797),
    (-0.04, -0.9),
    (-0.07, -0.74),
];

const CENTRAL_WINTER_STARTS: [(f32, f32); 13] = [
    (-0.035, -0.002),
    (-0.0853, -0.482),
    (-0.046, -0.68),
    (-0.074, -0.977),
    (-0.45, -0.9),
    (-0.74, -0.94),
    (-0.689, -0.78),
    (-0.609, -0.776),
    (-0.2, -0.71),
    (-0.905, -0.334),
    (-0.422, -0.32),
    (-0.86, -0.49),
    (-0.83, -0.72),
];

const CENTRAL_UPSTREAM_STARTS: [(f32, f32); 2] = [(-0.16, -0.24), (-0.11, -0.26)];

const SOUTHERN_SUMMER_STARTS: [(f32, f32); 6] = [
    (-0.85, -0.186),
    (-0.82, -0.12),
    (-0.67, -0.355),
    (-0.268, -0.392),
    (-0.24, -0.225),
    (-0.66, -0.093),
];

const SOUTHERN_WINTER_STARTS: [(f32, f32); 6] = [
    (-0.05, -0.145),
    (-0.145, -0.277),
    (-0.178, -0.468),
    (-0.56, -0.372),
    (-0.43, -0.124),
    (-0.719, -0.328),
];

/// Straight lines of one slope, each anchored at its own start point
fn wind_lines(
    starts: &[(f32, f32)],
    slope: f32,
    speed: f32,
    direction: Direction,
) -> impl Iterator<Item = TrajectoryConfig> + '_ {
    starts.iter().map(move |&(x, y)| {
        let start = Vec2::new(x, y);
        TrajectoryConfig::new(Formula::line_through(start, slope), start, speed, direction)
    })
}

/// One region/season selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scenario {
    pub region: Region,
    pub season: Season,
}

impl Scenario {
    pub fn new(region: Region, season: Season) -> Self {
        Self { region, season }
    }

    /// Parse selector labels such as ("Central Howe Sound", "Winter")
    pub fn from_names(region: &str, season: &str) -> Option<Self> {
        Some(Self::new(Region::from_str(region)?, Season::from_str(season)?))
    }

    /// e.g. "Northern Howe Sound Summer", "South Howe Sound Winter"
    pub fn title(&self) -> String {
        format!("{} Howe Sound {}", self.region.title_label(), self.season.label())
    }

    /// File stem of the region's coastline layer
    pub fn basemap(&self) -> String {
        format!("{}_Howe_Sound", self.region.label())
    }

    pub fn configs(&self) -> Vec<TrajectoryConfig> {
        let mut configs = Vec::new();
        match (self.region, self.season) {
            (Region::Northern, Season::Summer) => {
                // Fan from the head of the sound
                let start = Vec2::new(-0.18, -0.3);
                configs.extend(NORTH_FAN_SPREAD.iter().map(|&spread| {
                    let formula = Formula::Quadratic {
                        a: 0.5 * spread,
                        b: 0.5,
                        c: -0.3,
                        shift: 0.18,
                    };
                    TrajectoryConfig::new(formula, start, 0.8, Direction::Reverse)
                }));
                configs.extend(wind_lines(
                    &NORTH_SUMMER_STARTS,
                    NORTH_SUMMER_SLOPE,
                    0.4,
                    Direction::Reverse,
                ));
            }
            (Region::Northern, Season::Winter) => {
                configs.extend(wind_lines(
                    &NORTH_WINTER_STARTS,
                    NORTH_WINTER_SLOPE,
                    0.15,
                    Direction::Forward,
                ));
            }
            (Region::Central, Season::Summer) => {
                configs.extend(wind_lines(
                    &CENTRAL_SUMMER_STARTS,
                    CENTRAL_SUMMER_SLOPE,
                    0.4,
                    Direction::Reverse,
                ));
                configs.extend(wind_lines(
                    &CENTRAL_UPSTREAM_STARTS,
                    CENTRAL_UPSTREAM_SLOPE,
                    0.3,
                    Direction::Reverse,
                ));
                let start = Vec2::new(-0.07, 0.037);
                configs.extend(CENTRAL_FAN_OFFSETS.iter().map(|&offset| {
                    let formula = Formula::Quadratic {
                        a: 5.6,
                        b: 0.2,
                        c: -0.06 - offset,
                        shift: 0.18,
                    };
                    TrajectoryConfig::new(formula, start, 0.35, Direction::Reverse)
                }));
            }
            (Region::Central, Season::Winter) => {
                configs.extend(wind_lines(
                    &CENTRAL_WINTER_STARTS,
                    CENTRAL_WINTER_SLOPE,
                    0.1,
                    Direction::Forward,
                ));
                configs.extend(wind_lines(
                    &CENTRAL_UPSTREAM_STARTS,
                    CENTRAL_UPSTREAM_SLOPE,
                    0.3,
                    Direction::Reverse,
                ));
            }
            (Region::Southern, Season::Summer) => {
                configs.extend(wind_lines(
                    &SOUTHERN_SUMMER_STARTS,
                    SOUTHERN_SLOPE,
                    0.3,
                    Direction::Forward,
                ));
            }
            (Region::Southern, Season::Winter) => {
                configs.extend(wind_lines(
                    &SOUTHERN_WINTER_STARTS,
                    SOUTHERN_SLOPE,
                    0.3,
                    Direction::Reverse,
                ));
            }
        }
        configs
    }
}
