//! Rendering module
//!
//! The simulation draws through the [`Renderer`] trait. [`PointCanvas`] is the
//! retained implementation used by the app: it keeps faded points from earlier
//! frames alive to produce motion trails, and tessellates them into vertices
//! for the WebGPU pipeline.

pub mod canvas;
pub mod color;
pub mod pipeline;
pub mod vertex;

use glam::Vec2;

pub use canvas::{PointCanvas, PointSprite};
pub use color::Hsb;
pub use pipeline::{RenderError, RenderState, surface_extent};
pub use vertex::Vertex;

/// Drawing surface consumed by the fireworks simulation
pub trait Renderer {
    /// Replace everything on the surface with an opaque color
    fn clear_solid(&mut self, color: Hsb);

    /// Blend the surface toward `color` by `alpha`, leaving faint traces of
    /// earlier frames
    fn clear_with_alpha(&mut self, color: Hsb, alpha: f32);

    /// Draw a point in canvas coordinates (+y down)
    fn draw_point(&mut self, pos: Vec2, color: Hsb, stroke_width: f32);
}
