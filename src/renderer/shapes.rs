//! Shape generation for trail and coastline meshes

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::MIN_WIDTH;
use crate::lerp;
use crate::sim::{Coastline, LineSegment, TrailFrame};

/// Map a per-point strength (0-1) onto the pale-to-deep blue ramp
fn trail_color(value: f32, alpha: f32) -> [f32; 4] {
    let t = value.clamp(0.0, 1.0);
    let [r0, g0, b0] = colors::TRAIL_PALE;
    let [r1, g1, b1] = colors::TRAIL_DEEP;
    [lerp(r0, r1, t), lerp(g0, g1, t), lerp(b0, b1, t), alpha]
}

/// Two triangles covering `a`-`b` with per-end half widths and colors
fn push_quad(
    vertices: &mut Vec<Vertex>,
    a: Vec2,
    b: Vec2,
    half_widths: (f32, f32),
    colors: ([f32; 4], [f32; 4]),
) {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x);

    let a1 = a + perp * half_widths.0;
    let a2 = a - perp * half_widths.0;
    let b1 = b + perp * half_widths.1;
    let b2 = b - perp * half_widths.1;

    vertices.push(Vertex::new(a1.x, a1.y, colors.0));
    vertices.push(Vertex::new(a2.x, a2.y, colors.0));
    vertices.push(Vertex::new(b1.x, b1.y, colors.1));

    vertices.push(Vertex::new(b1.x, b1.y, colors.1));
    vertices.push(Vertex::new(a2.x, a2.y, colors.0));
    vertices.push(Vertex::new(b2.x, b2.y, colors.1));
}

/// Generate vertices for one comet trail.
///
/// `width_scale` converts style widths into path-space units. Points without
/// a style entry fall back to full strength at the minimum width.
pub fn comet_trail(frame: &TrailFrame, width_scale: f32) -> Vec<Vertex> {
    if frame.segments.is_empty() || frame.global_alpha <= 0.0 {
        return Vec::new();
    }

    let strength = |i: usize| frame.alphas.get(i).copied().unwrap_or(1.0);
    let width = |i: usize| frame.widths.get(i).copied().unwrap_or(MIN_WIDTH) * width_scale;
    let color = |i: usize| trail_color(strength(i), strength(i) * frame.global_alpha);

    let mut vertices = Vec::with_capacity(frame.segments.len() * 6);
    for (i, seg) in frame.segments.iter().enumerate() {
        // Fully transparent quads are not worth emitting
        if strength(i) <= 0.0 && strength(i + 1) <= 0.0 {
            continue;
        }
        push_quad(
            &mut vertices,
            seg.a,
            seg.b,
            (width(i) * 0.5, width(i + 1) * 0.5),
            (color(i), color(i + 1)),
        );
    }

    vertices
}

/// Generate outline vertices for every ring in the coastline
pub fn coastline_outline(coastline: &Coastline, width: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let half = width * 0.5;
    let edge = colors::COASTLINE_EDGE;

    for polygon in coastline.polygons() {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.holes());
        for ring in rings {
            for LineSegment { a, b } in ring.edges() {
                push_quad(&mut vertices, a, b, (half, half), (edge, edge));
            }
        }
    }

    vertices
}
