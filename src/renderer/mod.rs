//! Rendering boundary
//!
//! The animation core only needs somewhere to send trail frames. A
//! `RenderSurface` receives one batch per tick so a redraw never shows a
//! half-updated field. `TrailMesh` is the CPU-side surface that turns those
//! batches into GPU-ready vertex data, and `TrailPipeline` draws that data
//! with WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

use std::collections::BTreeMap;

pub use pipeline::{TrailPipeline, Viewport};
pub use vertex::Vertex;

use crate::sim::{Coastline, TrailFrame, TrailId};

/// Drawing capability held by the animation core
pub trait RenderSurface {
    /// Allocate drawing resources for a new trail
    fn register(&mut self, id: TrailId);
    /// Replace the drawn state of every trail in `batch` at once
    fn submit(&mut self, batch: &[TrailFrame]);
    /// Free a trail's drawing resources
    fn release(&mut self, id: TrailId);
    /// Ask for the surface to be repainted
    fn request_redraw(&mut self) {}
}

/// Default trail width scale (path space is roughly the unit square)
pub const DEFAULT_WIDTH_SCALE: f32 = 0.004;

/// Tessellates trail frames into per-trail vertex lists
#[derive(Debug, Default)]
pub struct TrailMesh {
    trails: BTreeMap<TrailId, Vec<Vertex>>,
    basemap: Vec<Vertex>,
    width_scale: f32,
    batches: u64,
    redraws: u64,
}

impl TrailMesh {
    pub fn new() -> Self {
        Self::with_width_scale(DEFAULT_WIDTH_SCALE)
    }

    pub fn with_width_scale(width_scale: f32) -> Self {
        Self {
            width_scale,
            ..Self::default()
        }
    }

    /// Static coastline outline drawn beneath the trails
    pub fn set_basemap(&mut self, coastline: &Coastline) {
        self.basemap = shapes::coastline_outline(coastline, self.width_scale);
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    pub fn is_registered(&self, id: TrailId) -> bool {
        self.trails.contains_key(&id)
    }

    pub fn trail_vertices(&self, id: TrailId) -> Option<&[Vertex]> {
        self.trails.get(&id).map(Vec::as_slice)
    }

    /// Basemap followed by every trail, in id order
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut out = self.basemap.clone();
        for verts in self.trails.values() {
            out.extend_from_slice(verts);
        }
        out
    }

    pub fn vertex_count(&self) -> usize {
        self.basemap.len() + self.trails.values().map(Vec::len).sum::<usize>()
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl RenderSurface for TrailMesh {
    fn register(&mut self, id: TrailId) {
        if self.trails.insert(id, Vec::new()).is_some() {
            log::warn!("Trail {:?} registered twice; previous mesh dropped", id);
        }
    }

    fn submit(&mut self, batch: &[TrailFrame]) {
        self.batches += 1;
        for frame in batch {
            match self.trails.get_mut(&frame.id) {
                Some(verts) => *verts = shapes::comet_trail(frame, self.width_scale),
                None => log::warn!("Frame for unregistered trail {:?} ignored", frame.id),
            }
        }
    }

    fn release(&mut self, id: TrailId) {
        self.trails.remove(&id);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
