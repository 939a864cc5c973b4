//! Trail mesh vertex

use bytemuck::{Pod, Zeroable};

/// Position in path space (or NDC once uploaded) plus straight RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same color at a new position
    pub fn moved_to(self, position: [f32; 2]) -> Self {
        Self { position, ..self }
    }

    /// Buffer layout matching `trail.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for map and trail elements
pub mod colors {
    /// Trail color for faint (tail) points
    pub const TRAIL_PALE: [f32; 3] = [0.97, 0.98, 1.0];
    /// Trail color for strong (head) points
    pub const TRAIL_DEEP: [f32; 3] = [0.03, 0.19, 0.42];
    pub const COASTLINE_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Clear color behind the map
    pub const BACKGROUND: [f64; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let verts = [Vertex::new(1.0, 2.0, [0.1, 0.2, 0.3, 0.4]); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 3 * 24);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(1.0, 2.0, [0.1, 0.2, 0.3, 0.4]).moved_to([-1.0, 0.5]);
        assert_eq!(v.position, [-1.0, 0.5]);
        assert_eq!(v.color, [0.1, 0.2, 0.3, 0.4]);
    }
}
