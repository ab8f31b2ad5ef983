// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Software [`DrawBackend`] rasterizing into an RGBA image.
//!
//! 2D primitives are alpha blended with `imageproc`. 3D primitives are seen through a fixed
//! pinhole camera at the origin looking down `-z`, with a focal length of
//! [`CAMERA_FOCAL`] pixels: one world unit at depth `CAMERA_FOCAL` covers one pixel. There
//! is no depth buffer, so primitives are painted in call order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::imageops::{self, FilterType};
use image::{GrayImage, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{
    Canvas as DrawTarget, draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut,
    draw_line_segment_mut, draw_polygon_mut, draw_text_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

use crate::error::{Result, VizError};
use crate::geometry::transform_point;
use crate::layout::Viewport;
use crate::visualizer::backend::{DrawBackend, TextureId};
use crate::visualizer::color::{Color, jet};
use crate::verbose;

/// Camera focal length in pixels.
pub const CAMERA_FOCAL: f32 = 1000.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 10_000.0;

/// Floor quad color.
pub const FLOOR_COLOR: Color = Color::rgb(0.3, 0.3, 0.35);

const TEXT_SIZE: f32 = 16.0;
const LINE_HEIGHT: i32 = 18;

/// The part of the target image covered by a viewport.
///
/// Drawing coordinates are relative to the clipped area. Pixels are alpha blended and the
/// result stays opaque.
struct Region<'a> {
    image: &'a mut RgbaImage,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    /// Viewport origin relative to the clipped region's origin.
    dx: i32,
    dy: i32,
}

impl DrawTarget for Region<'_> {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(self.x0 + x, self.y0 + y)
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let pixel = self.image.get_pixel_mut(self.x0 + x, self.y0 + y);
        pixel.blend(&color);
        pixel.0[3] = u8::MAX;
    }
}

impl<'a> Region<'a> {
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn clip(image: &'a mut RgbaImage, viewport: Viewport) -> Option<Self> {
        let (iw, ih) = image.dimensions();
        let x0 = viewport.x.max(0);
        let y0 = viewport.y.max(0);
        let x1 = (viewport.x + viewport.width as i32).min(iw as i32);
        let y1 = (viewport.y + viewport.height as i32).min(ih as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            image,
            x0: x0 as u32,
            y0: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
            dx: viewport.x - x0,
            dy: viewport.y - y0,
        })
    }

    /// Blend `top` with its top-left corner at viewport position `(x, y)`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn blit(&mut self, top: &RgbaImage, x: i32, y: i32) {
        let (ox, oy) = (x + self.dx, y + self.dy);
        let (w, h) = (self.width as i32, self.height as i32);
        for (tx, ty, pixel) in top.enumerate_pixels() {
            let px = ox + tx as i32;
            let py = oy + ty as i32;
            if (0..w).contains(&px) && (0..h).contains(&py) {
                self.draw_pixel(px as u32, py as u32, *pixel);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn point(&self, (x, y): (f32, f32)) -> Point<i32> {
        Point::new(x.round() as i32 + self.dx, y.round() as i32 + self.dy)
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba<u8>) {
        let mut poly: Vec<Point<i32>> = points.iter().map(|&p| self.point(p)).collect();
        poly.dedup();
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        match poly.as_slice() {
            [] => {}
            [p] => draw_filled_rect_mut(self, Rect::at(p.x, p.y).of_size(1, 1), color),
            [a, b] => draw_line_segment_mut(
                self,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color,
            ),
            _ => draw_polygon_mut(self, &poly, color),
        }
    }

    fn thick_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = dx.hypot(dy);
        if len < f32::EPSILON {
            self.fill_polygon(&[from], color);
            return;
        }
        let half = width.max(1.0) * 0.5;
        let (nx, ny) = (-dy / len * half, dx / len * half);
        self.fill_polygon(
            &[
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ],
            color,
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn disc(&mut self, center: (f32, f32), rx: f32, ry: f32, color: Rgba<u8>) {
        let c = self.point(center);
        let rx = rx.round().max(1.0) as i32;
        let ry = ry.round().max(1.0) as i32;
        if rx == ry {
            draw_filled_circle_mut(self, (c.x, c.y), rx, color);
        } else {
            draw_filled_ellipse_mut(self, (c.x, c.y), rx, ry, color);
        }
    }
}

/// Clip a polygon to the visible side of the near plane (`z <= -NEAR`).
fn clip_near(polygon: &[Point3<f32>]) -> Vec<Point3<f32>> {
    let inside = |p: &Point3<f32>| p.z <= -NEAR;
    let mut out = Vec::with_capacity(polygon.len() + 2);
    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];
        if inside(current) {
            out.push(*current);
        }
        if inside(current) != inside(next) {
            let t = (-NEAR - current.z) / (next.z - current.z);
            out.push(*current + (*next - *current) * t);
        }
    }
    out
}

/// An RGBA render target.
pub struct Canvas {
    image: RgbaImage,
    viewport: Viewport,
    textures: HashMap<TextureId, GrayImage>,
    next_texture: u32,
    font: Option<FontVec>,
}

impl Canvas {
    /// Create a black canvas; the viewport covers all of it.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            viewport: Viewport::new(0, 0, width, height),
            textures: HashMap::new(),
            next_texture: 0,
            font: None,
        }
    }

    /// Use `font` for [`DrawBackend::draw_text`].
    #[must_use]
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    /// Load a TrueType/OpenType font from disk for text drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn load_font<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|e| {
            VizError::ConfigError(format!("Invalid font {}: {e}", path.display()))
        })?;
        self.font = Some(font);
        Ok(())
    }

    /// Whether a font is loaded.
    #[must_use]
    pub const fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Fill the whole canvas with `color`, ignoring the viewport.
    pub fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rendered pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, returning its pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Number of live textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Save the canvas; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn camera(&self) -> Option<Perspective3<f32>> {
        if self.viewport.is_empty() {
            return None;
        }
        let w = self.viewport.width as f32;
        let h = self.viewport.height as f32;
        let fovy = 2.0 * (h * 0.5 / CAMERA_FOCAL).atan();
        Some(Perspective3::new(w / h, fovy, NEAR, FAR))
    }

    /// Viewport pixel of a camera-space point, or `None` behind the near plane.
    #[allow(clippy::cast_precision_loss)]
    fn project(&self, camera: &Perspective3<f32>, p: &Point3<f32>) -> Option<(f32, f32)> {
        if p.z > -NEAR {
            return None;
        }
        let ndc = camera.project_point(p);
        let w = self.viewport.width as f32;
        let h = self.viewport.height as f32;
        Some(((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h))
    }
}

impl DrawBackend for Canvas {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw_image(&mut self, frame: &RgbaImage, dst: Viewport) {
        if dst.is_empty() {
            return;
        }
        let resized = if frame.dimensions() == (dst.width, dst.height) {
            frame.clone()
        } else {
            imageops::resize(frame, dst.width, dst.height, FilterType::Triangle)
        };
        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        region.blit(&resized, dst.x, dst.y);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        let origin = region.point((x, y));
        let corner = region.point((x + width, y + height));
        #[allow(clippy::cast_sign_loss)]
        let size = (
            (corner.x - origin.x).max(1) as u32,
            (corner.y - origin.y).max(1) as u32,
        );
        let rect = Rect::at(origin.x, origin.y).of_size(size.0, size.1);
        draw_filled_rect_mut(&mut region, rect, Rgba(color.to_rgba8()));
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        region.thick_line(from, to, width, Rgba(color.to_rgba8()));
    }

    fn create_texture(&mut self, image: &GrayImage) -> Result<TextureId> {
        if image.width() == 0 || image.height() == 0 {
            return Err(VizError::BackendError("cannot create an empty texture".to_string()));
        }
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, image.clone());
        Ok(id)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw_colormap(&mut self, texture: TextureId, dst: Viewport, alpha: f32) -> Result<()> {
        let source = self
            .textures
            .get(&texture)
            .ok_or_else(|| VizError::BackendError(format!("unknown texture {}", texture.0)))?;
        if dst.is_empty() {
            return Ok(());
        }

        let scaled = imageops::resize(source, dst.width, dst.height, FilterType::Triangle);
        let opacity = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let overlay = RgbaImage::from_fn(dst.width, dst.height, |x, y| {
            let v = f32::from(scaled.get_pixel(x, y).0[0]) / 255.0;
            let [r, g, b, _] = jet(v).to_rgba8();
            Rgba([r, g, b, opacity])
        });

        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return Ok(());
        };
        region.blit(&overlay, dst.x, dst.y);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let Some(font) = self.font.as_ref() else {
            verbose!("No font loaded, skipping text: {}", text.replace('\n', " | "));
            return;
        };
        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        let color = Rgba(Color::WHITE.to_rgba8());
        let left = x + region.dx;
        let mut line_y = y + region.dy;
        for line in text.lines() {
            draw_text_mut(
                &mut region,
                color,
                left,
                line_y,
                PxScale::from(TEXT_SIZE),
                font,
                line,
            );
            line_y += LINE_HEIGHT;
        }
    }

    fn draw_sphere(
        &mut self,
        transform: &Matrix4<f32>,
        center: &Point3<f32>,
        radius: f32,
        color: Color,
    ) {
        let Some(camera) = self.camera() else {
            return;
        };
        let project = |p: &Point3<f32>| {
            transform_point(transform, p).and_then(|world| self.project(&camera, &world))
        };
        let Some(c) = project(center) else {
            return;
        };

        // Screen extent of the transformed axes; flattening transforms give an ellipse.
        let mut rx = 0.0_f32;
        let mut ry = 0.0_f32;
        for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
            let edge = center + axis * radius;
            if let Some(e) = project(&edge) {
                rx = rx.max((e.0 - c.0).abs());
                ry = ry.max((e.1 - c.1).abs());
            }
        }

        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        region.disc(c, rx, ry, Rgba(color.to_rgba8()));
    }

    fn draw_bone(
        &mut self,
        transform: &Matrix4<f32>,
        from: &Point3<f32>,
        to: &Point3<f32>,
        radius: f32,
        color: Color,
    ) {
        let Some(camera) = self.camera() else {
            return;
        };
        let p0 = transform_point(transform, from);
        let p1 = transform_point(transform, to);
        let (Some(p0), Some(p1)) = (p0, p1) else {
            return;
        };
        let (Some(s0), Some(s1)) = (self.project(&camera, &p0), self.project(&camera, &p1)) else {
            return;
        };

        let depth = -(p0.z + p1.z) * 0.5;
        let width = 2.0 * radius * CAMERA_FOCAL / depth;
        let rgba = Rgba(color.to_rgba8());

        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        region.thick_line(s0, s1, width, rgba);
    }

    fn draw_floor(&mut self, transform: &Matrix4<f32>) {
        let Some(camera) = self.camera() else {
            return;
        };
        let corners = [
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ];
        let Some(world) = corners
            .iter()
            .map(|c| transform_point(transform, c))
            .collect::<Option<Vec<_>>>()
        else {
            return;
        };
        let screen: Vec<(f32, f32)> = clip_near(&world)
            .iter()
            .filter_map(|p| self.project(&camera, p))
            .collect();
        if screen.len() < 3 {
            return;
        }

        let Some(mut region) = Region::clip(&mut self.image, self.viewport) else {
            return;
        };
        region.fill_polygon(&screen, Rgba(FLOOR_COLOR.to_rgba8()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::identity;
    use image::Luma;

    fn px(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        canvas.image().get_pixel(x, y).0
    }

    #[test]
    fn test_new_is_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
        assert_eq!(px(&canvas, 3, 2), [0, 0, 0, 255]);
        assert_eq!(canvas.viewport(), Viewport::new(0, 0, 4, 3));
    }

    #[test]
    fn test_fill_rect_blends() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(2.0, 2.0, 3.0, 3.0, Color::RED);
        assert_eq!(px(&canvas, 3, 3), [255, 0, 0, 255]);
        assert_eq!(px(&canvas, 6, 6), [0, 0, 0, 255]);

        canvas.clear(Color::WHITE);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, Color::SHADOW);
        let [r, g, b, a] = px(&canvas, 0, 0);
        assert!(r > 100 && r < 150);
        assert_eq!((r, g, b, a), (r, r, r, 255));
    }

    #[test]
    fn test_translucent_draws_stay_opaque() {
        let mut canvas = Canvas::new(40, 40);
        canvas.draw_line((0.0, 20.0), (40.0, 20.0), Color::SHADOW, 5.0);
        canvas.draw_sphere(&identity(), &Point3::new(0.0, 0.0, -1000.0), 15.0, Color::SHADOW);
        let texture = canvas
            .create_texture(&GrayImage::from_pixel(2, 2, Luma([128])))
            .unwrap();
        canvas.draw_colormap(texture, Viewport::new(0, 0, 40, 10), 0.8).unwrap();
        canvas.draw_image(
            &RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 64])),
            Viewport::new(0, 30, 40, 10),
        );
        assert!(canvas.image().pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_draws_stay_inside_right_view() {
        let mut canvas = Canvas::new(20, 10);
        canvas.set_viewport(Viewport::new(10, 0, 10, 10));
        canvas.draw_line((-20.0, 5.0), (30.0, 5.0), Color::RED, 3.0);
        let blue = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255]));
        canvas.draw_image(&blue, Viewport::new(-5, 0, 10, 2));

        assert_eq!(px(&canvas, 9, 5), [0, 0, 0, 255]);
        assert_eq!(px(&canvas, 10, 5), [255, 0, 0, 255]);
        assert_eq!(px(&canvas, 19, 5), [255, 0, 0, 255]);
        assert_eq!(px(&canvas, 10, 0), [0, 0, 255, 255]);
        assert_eq!(px(&canvas, 9, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_viewport_offsets_and_clips() {
        let mut canvas = Canvas::new(20, 10);
        canvas.set_viewport(Viewport::new(10, 0, 10, 10));
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, Color::GREEN);
        assert_eq!(px(&canvas, 10, 0), [0, 255, 0, 255]);
        assert_eq!(px(&canvas, 0, 0), [0, 0, 0, 255]);

        // left of the viewport origin stays untouched
        canvas.fill_rect(-5.0, 5.0, 4.0, 2.0, Color::GREEN);
        assert_eq!(px(&canvas, 7, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn test_thick_line() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line((2.0, 10.0), (18.0, 10.0), Color::YELLOW, 5.0);
        assert_eq!(px(&canvas, 10, 10), [255, 255, 0, 255]);
        assert_eq!(px(&canvas, 10, 8), [255, 255, 0, 255]);
        assert_eq!(px(&canvas, 10, 15), [0, 0, 0, 255]);

        // zero-length and zero-width lines do not panic
        canvas.draw_line((5.0, 5.0), (5.0, 5.0), Color::RED, 5.0);
        canvas.draw_line((1.0, 1.0), (3.0, 1.0), Color::RED, 0.0);
    }

    #[test]
    fn test_draw_image_letterboxed() {
        let mut canvas = Canvas::new(8, 8);
        let frame = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]));
        canvas.draw_image(&frame, Viewport::new(0, 2, 8, 4));
        assert_eq!(px(&canvas, 4, 4), [0, 0, 255, 255]);
        assert_eq!(px(&canvas, 4, 0), [0, 0, 0, 255]);
        assert_eq!(px(&canvas, 4, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn test_texture_lifecycle_and_colormap() {
        let mut canvas = Canvas::new(4, 4);
        let texture = canvas
            .create_texture(&GrayImage::from_pixel(2, 2, Luma([255])))
            .unwrap();
        assert_eq!(canvas.texture_count(), 1);

        canvas.draw_colormap(texture, Viewport::new(0, 0, 4, 4), 1.0).unwrap();
        // full intensity maps to the red end of the colormap
        let [r, _, b, _] = px(&canvas, 1, 1);
        assert!(r > 100);
        assert_eq!(b, 0);

        canvas.delete_texture(texture);
        assert_eq!(canvas.texture_count(), 0);
        assert!(canvas.draw_colormap(texture, Viewport::new(0, 0, 4, 4), 1.0).is_err());
        assert!(canvas.create_texture(&GrayImage::new(0, 0)).is_err());
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut canvas = Canvas::new(8, 8);
        assert!(!canvas.has_font());
        canvas.draw_text("Interval:  1.0 [ms]\nInference:  2.0 [ms]", 0, 0);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_sphere_projection() {
        let mut canvas = Canvas::new(200, 100);
        canvas.draw_sphere(&identity(), &Point3::new(0.0, 0.0, -1000.0), 15.0, Color::CYAN);
        assert_eq!(px(&canvas, 100, 50), [0, 255, 255, 255]);
        assert_eq!(px(&canvas, 112, 50), [0, 255, 255, 255]);
        assert_eq!(px(&canvas, 120, 50), [0, 0, 0, 255]);
    }

    #[test]
    fn test_behind_camera_is_skipped() {
        let mut canvas = Canvas::new(50, 50);
        canvas.draw_sphere(&identity(), &Point3::new(0.0, 0.0, 10.0), 15.0, Color::RED);
        canvas.draw_bone(
            &identity(),
            &Point3::new(0.0, 0.0, -500.0),
            &Point3::new(0.0, 0.0, 5.0),
            5.0,
            Color::RED,
        );
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_floor_clipped_at_near_plane() {
        let mut canvas = Canvas::new(100, 100);
        // floor at y = -20 spanning z in [-700, 100]
        let m = crate::geometry::translate(&identity(), 0.0, 0.0, -300.0);
        let m = crate::geometry::scale(&m, 400.0, 20.0, 400.0);
        canvas.draw_floor(&m);
        // the floor lies below the eye, so the bottom of the view is covered
        assert_eq!(px(&canvas, 50, 99), FLOOR_COLOR.to_rgba8());
        assert_eq!(px(&canvas, 50, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn test_clip_near() {
        let square = [
            Point3::new(-1.0, 0.0, -10.0),
            Point3::new(1.0, 0.0, -10.0),
            Point3::new(1.0, 0.0, 10.0),
            Point3::new(-1.0, 0.0, 10.0),
        ];
        let clipped = clip_near(&square);
        assert_eq!(clipped.len(), 4);
        assert!(clipped.iter().all(|p| p.z <= -NEAR + 1e-6));
        assert!(clip_near(&square.map(|p| Point3::new(p.x, p.y, 20.0))).is_empty());
    }
}
