//! Retained point canvas
//!
//! Software stand-in for an immediate-mode 2D canvas. A GPU surface does not
//! keep its contents between frames, so the trail effect is reproduced here:
//! an alpha clear fades every retained point instead of painting over it.

use glam::Vec2;

use super::color::Hsb;
use super::vertex::Vertex;
use super::Renderer;

/// Points fainter than this are dropped after a fade
pub const MIN_VISIBLE_ALPHA: f32 = 0.01;
/// Points survive at most this many fades, whatever the fade alpha
pub const MAX_TRAIL_FADES: u32 = 48;

/// A point drawn on the canvas (canvas coordinates, RGBA color)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSprite {
    pub pos: Vec2,
    pub color: [f32; 4],
    pub size: f32,
    /// Alpha clears survived so far
    pub fades: u32,
}

/// Canvas that remembers drawn points until they fade out
#[derive(Debug, Clone)]
pub struct PointCanvas {
    width: f32,
    height: f32,
    background: [f32; 4],
    points: Vec<PointSprite>,
}

impl PointCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Hsb::WHITE.to_rgba(),
            points: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Resizing discards the drawn content, like a browser canvas does
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.points.clear();
    }

    /// Current background color (RGBA, opaque)
    pub fn background(&self) -> [f32; 4] {
        self.background
    }

    pub fn points(&self) -> &[PointSprite] {
        &self.points
    }

    /// Convert canvas coordinates to normalized device coordinates
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            pos.x / self.width * 2.0 - 1.0,
            1.0 - pos.y / self.height * 2.0,
        )
    }

    /// Tessellate retained points into quads (two triangles each)
    pub fn vertices(&self) -> Vec<Vertex> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec::new();
        }

        let mut vertices = Vec::with_capacity(self.points.len() * 6);
        for point in &self.points {
            let center = self.to_ndc(point.pos);
            let half = Vec2::new(point.size / self.width, point.size / self.height);
            vertices.extend_from_slice(&Vertex::quad(center, half, point.color));
        }
        vertices
    }
}

impl Renderer for PointCanvas {
    fn clear_solid(&mut self, color: Hsb) {
        self.background = color.with_alpha(1.0).to_rgba();
        self.points.clear();
    }

    fn clear_with_alpha(&mut self, color: Hsb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let target = color.to_rgba();
        for (bg, c) in self.background.iter_mut().zip(target.iter()).take(3) {
            *bg = *bg * (1.0 - alpha) + c * alpha;
        }

        let keep = 1.0 - alpha;
        self.points.retain_mut(|p| {
            p.color[3] *= keep;
            p.fades += 1;
            p.color[3] >= MIN_VISIBLE_ALPHA && p.fades <= MAX_TRAIL_FADES
        });
    }

    fn draw_point(&mut self, pos: Vec2, color: Hsb, stroke_width: f32) {
        let color = color.to_rgba();
        if color[3] <= 0.0 {
            return;
        }
        self.points.push(PointSprite {
            pos,
            color,
            size: stroke_width,
            fades: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_clear_drops_points() {
        let mut canvas = PointCanvas::new(100.0, 100.0);
        canvas.draw_point(Vec2::new(10.0, 10.0), Hsb::new(0.0, 100.0, 100.0), 4.0);
        assert_eq!(canvas.points().len(), 1);

        canvas.clear_solid(Hsb::BLACK);
        assert!(canvas.points().is_empty());
        assert_eq!(canvas.background(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_alpha_clear_fades_and_culls() {
        let mut canvas = PointCanvas::new(100.0, 100.0);
        canvas.clear_solid(Hsb::WHITE);
        canvas.draw_point(Vec2::new(10.0, 10.0), Hsb::new(0.0, 100.0, 100.0), 4.0);

        canvas.clear_with_alpha(Hsb::BLACK, 0.1);
        assert_eq!(canvas.points().len(), 1);
        assert!((canvas.points()[0].color[3] - 0.9).abs() < 1e-5);
        // Background moved 10% toward black
        assert!((canvas.background()[0] - 0.9).abs() < 1e-5);

        // Enough fades make the point invisible
        for _ in 0..60 {
            canvas.clear_with_alpha(Hsb::BLACK, 0.1);
        }
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn test_slow_fade_stays_bounded() {
        let mut canvas = PointCanvas::new(100.0, 100.0);
        let per_frame = 10;
        for frame in 0..3000 {
            canvas.clear_with_alpha(Hsb::BLACK, 0.001);
            for i in 0..per_frame {
                canvas.draw_point(Vec2::new(i as f32, frame as f32 % 100.0), Hsb::WHITE, 3.0);
            }
            assert!(canvas.points().len() <= per_frame * (MAX_TRAIL_FADES as usize + 1));
        }
        assert_eq!(canvas.points().len(), per_frame * (MAX_TRAIL_FADES as usize + 1));
        assert!(canvas.points().iter().all(|p| p.fades <= MAX_TRAIL_FADES));
    }

    #[test]
    fn test_transparent_points_are_skipped() {
        let mut canvas = PointCanvas::new(100.0, 100.0);
        canvas.draw_point(Vec2::ZERO, Hsb::WHITE.with_alpha(0.0), 3.0);
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn test_ndc_mapping() {
        let canvas = PointCanvas::new(200.0, 100.0);
        assert_eq!(canvas.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(canvas.to_ndc(Vec2::new(200.0, 100.0)), Vec2::new(1.0, -1.0));
        assert_eq!(canvas.to_ndc(Vec2::new(100.0, 50.0)), Vec2::ZERO);
    }

    #[test]
    fn test_vertices_per_point() {
        let mut canvas = PointCanvas::new(200.0, 100.0);
        canvas.draw_point(Vec2::new(50.0, 50.0), Hsb::WHITE, 3.0);
        canvas.draw_point(Vec2::new(150.0, 50.0), Hsb::WHITE, 4.0);
        assert_eq!(canvas.vertices().len(), 12);

        canvas.resize(0.0, 0.0);
        assert!(canvas.vertices().is_empty());
    }
}
