// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Primitive draw interface consumed by the renderers.
//!
//! The renderers only compute geometry and colors; rasterization is delegated to a
//! [`DrawBackend`]. [`crate::visualizer::Canvas`] is the bundled software implementation and
//! [`crate::visualizer::RecordingBackend`] records calls for tests.

use image::{GrayImage, RgbaImage};
use nalgebra::{Matrix4, Point3};

use crate::error::Result;
use crate::layout::Viewport;
use crate::visualizer::color::Color;

/// Handle to a texture owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Primitive drawing operations.
///
/// 2D coordinates are pixels relative to the current viewport. 3D primitives take the
/// model transform to apply and world-space positions.
pub trait DrawBackend {
    /// Select the window region subsequent draws go to.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Blit an RGBA frame into `dst`.
    fn draw_image(&mut self, frame: &RgbaImage, dst: Viewport);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Draw a line segment `width` pixels thick.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32);

    /// Upload a single-channel image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VizError::BackendError`] if the texture cannot be created.
    fn create_texture(&mut self, image: &GrayImage) -> Result<TextureId>;

    /// Release a texture. Unknown handles are ignored.
    fn delete_texture(&mut self, texture: TextureId);

    /// Draw a single-channel texture as a false-color overlay blended at `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VizError::BackendError`] for an unknown texture.
    fn draw_colormap(&mut self, texture: TextureId, dst: Viewport, alpha: f32) -> Result<()>;

    /// Draw a (possibly multi-line) debug string with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Draw a sphere centered at `center`, transformed by `transform`.
    fn draw_sphere(
        &mut self,
        transform: &Matrix4<f32>,
        center: &Point3<f32>,
        radius: f32,
        color: Color,
    );

    /// Draw a capped cylinder between `from` and `to`, transformed by `transform`.
    fn draw_bone(
        &mut self,
        transform: &Matrix4<f32>,
        from: &Point3<f32>,
        to: &Point3<f32>,
        radius: f32,
        color: Color,
    );

    /// Draw the unit floor quad (`y = -1`, `x, z` in `[-1, 1]`) transformed by `transform`.
    fn draw_floor(&mut self, transform: &Matrix4<f32>);
}

/// A texture that is released when dropped.
///
/// Holds the backend borrow for its lifetime, so the texture is deleted on every exit
/// path, including early returns through `?`.
pub struct ScopedTexture<'a, B: DrawBackend + ?Sized> {
    backend: &'a mut B,
    id: TextureId,
}

impl<'a, B: DrawBackend + ?Sized> ScopedTexture<'a, B> {
    /// Upload `image` and take ownership of the resulting texture.
    ///
    /// # Errors
    ///
    /// Propagates the backend's upload error; nothing is left allocated in that case.
    pub fn upload(backend: &'a mut B, image: &GrayImage) -> Result<Self> {
        let id = backend.create_texture(image)?;
        Ok(Self { backend, id })
    }

    /// Draw the owned texture as a false-color overlay.
    ///
    /// # Errors
    ///
    /// Propagates the backend's draw error.
    pub fn draw_colormap(&mut self, dst: Viewport, alpha: f32) -> Result<()> {
        self.backend.draw_colormap(self.id, dst, alpha)
    }
}

impl<B: DrawBackend + ?Sized> Drop for ScopedTexture<'_, B> {
    fn drop(&mut self) {
        self.backend.delete_texture(self.id);
    }
}
