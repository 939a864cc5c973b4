//! WebGPU pipeline for trail meshes
//!
//! The pipeline does not own a surface or device: the host creates those
//! and hands them in, then records `draw` into its own render pass.

use wgpu::util::DeviceExt;

use super::TrailMesh;
use super::vertex::{Vertex, colors};
use crate::sim::Bounds;

/// Fraction of extra room kept around the fitted bounds
const VIEW_MARGIN: f32 = 0.05;

/// Maps path space onto normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: [f32; 2],
    scale: [f32; 2],
}

impl Viewport {
    /// Fit `bounds` into a `width` x `height` target without stretching
    pub fn fit(bounds: Bounds, width: u32, height: u32) -> Self {
        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let center = (bounds.min + bounds.max) * 0.5;
        let half = ((bounds.max - bounds.min) * 0.5 * (1.0 + VIEW_MARGIN)).max(glam::Vec2::splat(1e-6));

        let scale_y = (1.0 / half.y).min(aspect / half.x);
        Self {
            center: [center.x, center.y],
            scale: [scale_y / aspect, scale_y],
        }
    }

    pub fn to_ndc(&self, position: [f32; 2]) -> [f32; 2] {
        [
            (position[0] - self.center[0]) * self.scale[0],
            (position[1] - self.center[1]) * self.scale[1],
        ]
    }
}

/// Render pipeline plus a vertex buffer that grows as needed
pub struct TrailPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl TrailPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trail_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("trail.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trail_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trail_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Faded trail tails blend over the basemap
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer: None,
            vertex_count: 0,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Copy the mesh to the GPU in NDC, reusing the buffer when it fits
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &TrailMesh,
        viewport: &Viewport,
    ) {
        let vertices = to_ndc(&mesh.vertices(), viewport);
        self.vertex_count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        match &self.vertex_buffer {
            Some(buffer) if buffer.size() >= bytes.len() as wgpu::BufferAddress => {
                queue.write_buffer(buffer, 0, bytes);
            }
            _ => {
                log::debug!("Growing trail vertex buffer to {} vertices", vertices.len());
                self.vertex_buffer = Some(device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("trail_vertex_buffer"),
                        contents: bytes,
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    },
                ));
            }
        }
    }

    /// Record the uploaded mesh into `pass`
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(buffer) = &self.vertex_buffer else {
            return;
        };
        if self.vertex_count == 0 {
            return;
        }
        let used = self.vertex_count as wgpu::BufferAddress
            * std::mem::size_of::<Vertex>() as wgpu::BufferAddress;
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, buffer.slice(..used));
        pass.draw(0..self.vertex_count, 0..1);
    }

    /// Clear `view` to the background and draw the uploaded mesh
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let [r, g, b, a] = colors::BACKGROUND;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trail_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        self.draw(&mut pass);
    }
}

/// Path-space vertices moved into NDC
pub fn to_ndc(vertices: &[Vertex], viewport: &Viewport) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| v.moved_to(viewport.to_ndc(v.position)))
        .collect()
}
