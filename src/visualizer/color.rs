// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use serde::{Deserialize, Serialize};

/// RGBA color for visualization, components in `[0, 1]`.
///
/// Colors are plain values: per-draw alpha changes go through [`Color::with_alpha`], which
/// returns a copy and leaves the palette constant untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Red color.
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Yellow color.
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    /// Green color.
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    /// Cyan color.
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    /// Violet color.
    pub const VIOLET: Color = Color::rgb(1.0, 0.0, 1.0);
    /// Sky blue color.
    pub const BLUE: Color = Color::rgb(0.0, 0.5, 1.0);
    /// White color.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Black color.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Semi-transparent black used for cast shadows.
    pub const SHADOW: Color = Color::new(0.0, 0.0, 0.0, 0.5);

    /// Create a new color from RGBA values.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Copy of this color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Quantize to 8-bit RGBA.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Map a normalized intensity to a "jet" false color (blue → cyan → yellow → red).
#[must_use]
pub fn jet(v: f32) -> Color {
    let v = v.clamp(0.0, 1.0);
    let channel = |offset: f32| (1.5 - (4.0 * v - offset).abs()).clamp(0.0, 1.0);
    Color::rgb(channel(3.0), channel(2.0), channel(1.0))
}
