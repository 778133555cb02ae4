//! HSB color model
//!
//! Hue in degrees (0-360), saturation and brightness in percent (0-100),
//! alpha in 0-1. Particles derive brightness and opacity from their
//! remaining lifespan, so this is the natural space to describe them in.

/// A color in hue/saturation/brightness space with opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsb {
    pub const BLACK: Hsb = Hsb::new(0.0, 0.0, 0.0);
    pub const WHITE: Hsb = Hsb::new(0.0, 0.0, 100.0);

    /// Fully opaque color
    pub const fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to linear RGBA components in 0-1
    pub fn to_rgba(&self) -> [f32; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, self.alpha.clamp(0.0, 1.0)]
    }

    /// CSS `rgba()` string for DOM overlays
    pub fn to_css(&self) -> String {
        let [r, g, b, a] = self.to_rgba();
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}
