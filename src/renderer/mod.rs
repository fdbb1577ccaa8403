//! wgpu rendering module
//!
//! The scene builder turns game state into colored triangles in table
//! coordinates; the pipeline maps them to the window and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
