//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

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

/// Colors for table elements (sRGB, alpha last)
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(25, 25, 35);
    pub const WALL: [f32; 4] = rgb(50, 60, 70);
    pub const LANE: [f32; 4] = rgb(90, 100, 120);
    pub const PLUNGER_RING: [f32; 4] = rgb(70, 80, 95);
    pub const FLIPPER: [f32; 4] = rgb(80, 200, 120);
    pub const BALL: [f32; 4] = rgb(255, 210, 90);
    pub const BUMPER_BLUE: [f32; 4] = rgb(115, 190, 255);
    pub const BUMPER_RED: [f32; 4] = rgb(230, 80, 80);
    pub const BUMPER_LIT: [f32; 4] = rgb(255, 250, 220);
    pub const BUMPER_CAP: [f32; 4] = rgb(235, 235, 235);
    pub const SCORE: [f32; 4] = rgb(235, 235, 235);
    pub const LAUNCH_HINT: [f32; 4] = rgb(255, 150, 60);
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.45];

    /// Blend two colors; `t` = 0 gives `a`, 1 gives `b`
    pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t)
    }
}
