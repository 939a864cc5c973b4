//! Coastline geometry and segment intersection
//!
//! The coastline is a static set of polygons (with optional holes) already
//! normalized into the same coordinate space as the generated paths. It is
//! loaded once per view and only ever read afterwards.

use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use glam::Vec2;

use crate::error::LoadError;

/// Answers whether a trail segment touches the static obstacle layer
pub trait IntersectionOracle {
    fn intersects(&self, segment: &LineSegment) -> bool;
}

/// A two-point line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.a.min(self.b),
            max: self.a.max(self.b),
        }
    }

    /// Whether two segments share at least one point (touching counts)
    pub fn crosses(&self, other: &LineSegment) -> bool {
        let (p1, p2, q1, q2) = (self.a, self.b, other.a, other.b);

        let d1 = orient(q1, q2, p1);
        let d2 = orient(q1, q2, p2);
        let d3 = orient(p1, p2, q1);
        let d4 = orient(p1, p2, q2);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        // Collinear / endpoint-touching cases
        (d1 == 0.0 && within_box(q1, q2, p1))
            || (d2 == 0.0 && within_box(q1, q2, p2))
            || (d3 == 0.0 && within_box(p1, p2, q1))
            || (d4 == 0.0 && within_box(p1, p2, q2))
    }
}

/// Signed area of the triangle (a, b, c), positive when counter-clockwise
#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Whether `p` lies in the bounding box of segment `a`-`b`
#[inline]
fn within_box(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn of(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Smallest box covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Closed ring; the closing vertex is implicit
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Vec2>,
}

impl Ring {
    /// Build a ring, dropping an explicit closing vertex if present
    pub fn new(mut points: Vec<Vec2>) -> Result<Self, LoadError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(LoadError::Degenerate {
                reason: format!("ring with {} vertices", points.len()),
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(LoadError::Degenerate {
                reason: "ring with non-finite vertex".to_string(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Edges including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| LineSegment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Even-odd point containment
    pub fn contains(&self, p: Vec2) -> bool {
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (self.points[i], self.points[j]);
            if (pi.y > p.y) != (pj.y > p.y) {
                let x_cross = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Polygon with an exterior ring and optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
    bounds: Bounds,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        let bounds = Bounds::of(exterior.points());
        Self {
            exterior,
            holes,
            bounds,
        }
    }

    /// Convenience for a hole-free polygon
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, LoadError> {
        Ok(Self::new(Ring::new(points)?, Vec::new()))
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Point inside the exterior and outside every hole
    pub fn contains(&self, p: Vec2) -> bool {
        self.exterior.contains(p) && !self.holes.iter().any(|h| h.contains(p))
    }

    /// Segment touches a boundary or lies in the interior
    pub fn intersects(&self, segment: &LineSegment) -> bool {
        if !segment.is_finite() || !self.bounds.overlaps(&segment.bounds()) {
            return false;
        }

        let touches_boundary = std::iter::once(&self.exterior)
            .chain(self.holes.iter())
            .flat_map(|ring| ring.edges())
            .any(|edge| edge.crosses(segment));
        if touches_boundary {
            return true;
        }

        // No boundary crossing: the segment is entirely inside or outside
        self.contains(segment.a)
    }
}

/// Static polygon layer shared by every trajectory in a view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastline {
    polygons: Vec<Polygon>,
}

impl Coastline {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// A coastline nothing can collide with
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Extent of every polygon, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons
            .iter()
            .map(Polygon::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Parse Polygon/MultiPolygon geometry from GeoJSON text
    pub fn from_geojson(text: &str) -> Result<Self, LoadError> {
        let geojson: GeoJson = text.parse()?;
        let mut polygons = Vec::new();

        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for feature in collection.features {
                    if let Some(geometry) = feature.geometry {
                        collect_geometry(&geometry, &mut polygons)?;
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = feature.geometry {
                    collect_geometry(&geometry, &mut polygons)?;
                }
            }
            GeoJson::Geometry(geometry) => collect_geometry(&geometry, &mut polygons)?,
        }

        Ok(Self::new(polygons))
    }

    /// Read a GeoJSON coastline from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let coastline = Self::from_geojson(&text)?;
        log::info!(
            "Loaded {} coastline polygons from {}",
            coastline.polygons.len(),
            path.as_ref().display()
        );
        Ok(coastline)
    }
}

impl IntersectionOracle for Coastline {
    fn intersects(&self, segment: &LineSegment) -> bool {
        self.polygons.iter().any(|p| p.intersects(segment))
    }
}

fn collect_geometry(geometry: &Geometry, out: &mut Vec<Polygon>) -> Result<(), LoadError> {
    match &geometry.value {
        Value::Polygon(rings) => out.push(polygon_from_rings(rings)?),
        Value::MultiPolygon(parts) => {
            for rings in parts {
                out.push(polygon_from_rings(rings)?);
            }
        }
        Value::GeometryCollection(children) => {
            for child in children {
                collect_geometry(child, out)?;
            }
        }
        _ => log::warn!("Ignoring non-polygon coastline geometry"),
    }
    Ok(())
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Result<Polygon, LoadError> {
    let mut rings = rings.iter().map(|ring| ring_from_positions(ring));
    let exterior = match rings.next() {
        Some(ring) => ring?,
        None => {
            return Err(LoadError::Degenerate {
                reason: "polygon without an exterior ring".to_string(),
            });
        }
    };
    let holes = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, holes))
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Result<Ring, LoadError> {
    let points = positions
        .iter()
        .map(|pos| match pos.as_slice() {
            [x, y, ..] => Ok(Vec2::new(*x as f32, *y as f32)),
            _ => Err(LoadError::Degenerate {
                reason: format!("position with {} coordinates", pos.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ring::new(points)
}
