//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Axis-aligned quad as two triangles (NDC space)
    pub fn quad(center: Vec2, half: Vec2, color: [f32; 4]) -> [Vertex; 6] {
        let (x0, x1) = (center.x - half.x, center.x + half.x);
        let (y0, y1) = (center.y - half.y, center.y + half.y);
        [
            Vertex::new(x0, y0, color),
            Vertex::new(x1, y0, color),
            Vertex::new(x1, y1, color),
            Vertex::new(x0, y0, color),
            Vertex::new(x1, y1, color),
            Vertex::new(x0, y1, color),
        ]
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
