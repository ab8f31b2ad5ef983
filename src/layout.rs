// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Letterbox layout of a source frame inside a destination viewport.
//!
//! ```text
//!                      Portrait
//!     Landscape        +------+
//!     +-+------+-+     +------+
//!     | |      | |     |      |
//!     | |      | |     |      |
//!     +-+------+-+     +------+
//!                      +------+
//! ```

use serde::{Deserialize, Serialize};

/// An integer destination rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the viewport covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Map a normalized `[0, 1]` coordinate into this viewport (no clamping).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixel(&self, nx: f32, ny: f32) -> (f32, f32) {
        (
            nx * self.width as f32 + self.x as f32,
            ny * self.height as f32 + self.y as f32,
        )
    }
}

/// Compute the largest centered rectangle with the source aspect ratio that fits inside
/// a `dst_w` x `dst_h` destination.
///
/// A zero-area source or destination yields an empty viewport at the origin.
///
/// # Arguments
///
/// * `src_w`, `src_h` - Source frame size.
/// * `dst_w`, `dst_h` - Destination viewport size.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn letterbox(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Viewport {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Viewport::default();
    }

    let (src_w, src_h) = (src_w as f32, src_h as f32);
    let (dst_w, dst_h) = (dst_w as f32, dst_h as f32);
    let win_aspect = dst_w / dst_h;
    let tex_aspect = src_w / src_h;

    let (scale, horizontal) = if win_aspect > tex_aspect {
        (dst_h / src_h, true)
    } else {
        (dst_w / src_w, false)
    };

    let scaled_w = scale * src_w;
    let scaled_h = scale * src_h;
    let (offset_x, offset_y) = if horizontal {
        ((dst_w - scaled_w) * 0.5, 0.0)
    } else {
        (0.0, (dst_h - scaled_h) * 0.5)
    };

    Viewport {
        x: offset_x as i32,
        y: offset_y as i32,
        width: scaled_w as u32,
        height: scaled_h as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_same_aspect() {
        assert_eq!(letterbox(640, 480, 800, 600), Viewport::new(0, 0, 800, 600));
    }

    #[test]
    fn test_letterbox_wide_source() {
        // 1280x720 into 800x600: width bound, scale 0.625
        assert_eq!(letterbox(1280, 720, 800, 600), Viewport::new(0, 75, 800, 450));
    }

    #[test]
    fn test_letterbox_tall_destination() {
        assert_eq!(letterbox(640, 480, 600, 800), Viewport::new(0, 175, 600, 450));
    }

    #[test]
    fn test_letterbox_wide_destination() {
        // portrait source in a landscape window: height bound, centered horizontally
        assert_eq!(letterbox(480, 640, 800, 600), Viewport::new(175, 0, 450, 600));
    }

    #[test]
    fn test_letterbox_fits_inside() {
        for &(sw, sh) in &[(1920, 1080), (300, 900), (17, 13), (1, 1)] {
            let vp = letterbox(sw, sh, 896, 512);
            assert!(vp.x >= 0 && vp.y >= 0);
            assert!(vp.x as u32 + vp.width <= 896);
            assert!(vp.y as u32 + vp.height <= 512);
        }
    }

    #[test]
    fn test_letterbox_zero_area() {
        assert!(letterbox(0, 480, 800, 600).is_empty());
        assert!(letterbox(640, 480, 800, 0).is_empty());
    }

    #[test]
    fn test_to_pixel() {
        let vp = Viewport::new(10, 20, 200, 100);
        let (x, y) = vp.to_pixel(0.25, 0.5);
        assert!((x - 60.0).abs() < 1e-6);
        assert!((y - 70.0).abs() < 1e-6);
    }
}
