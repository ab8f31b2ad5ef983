// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! A [`DrawBackend`] that records calls instead of drawing.

use std::collections::HashMap;

use image::{GrayImage, RgbaImage};
use nalgebra::{Matrix4, Point3};

use crate::error::{Result, VizError};
use crate::layout::Viewport;
use crate::visualizer::backend::{DrawBackend, TextureId};
use crate::visualizer::color::Color;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Viewport(Viewport),
    Image {
        width: u32,
        height: u32,
        dst: Viewport,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    Colormap {
        texture: TextureId,
        dst: Viewport,
        alpha: f32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
    },
    Sphere {
        transform: Matrix4<f32>,
        center: Point3<f32>,
        radius: f32,
        color: Color,
    },
    Bone {
        transform: Matrix4<f32>,
        from: Point3<f32>,
        to: Point3<f32>,
        radius: f32,
        color: Color,
    },
    Floor {
        transform: Matrix4<f32>,
    },
}

impl DrawCommand {
    /// Whether this command puts pixels on screen (viewport changes do not).
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        !matches!(self, Self::Viewport(_))
    }
}

/// Records every call, keeps uploaded textures, and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Calls in order.
    pub commands: Vec<DrawCommand>,
    textures: HashMap<TextureId, GrayImage>,
    next_texture: u32,
    /// Make `create_texture` fail.
    pub fail_upload: bool,
    /// Make `draw_colormap` fail.
    pub fail_colormap: bool,
}

impl RecordingBackend {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls that drew something.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Number of textures created and not yet deleted.
    #[must_use]
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Total number of textures ever created.
    #[must_use]
    pub const fn textures_created(&self) -> u32 {
        self.next_texture
    }

    /// Recorded lines.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Recorded filled rectangles.
    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    /// Recorded spheres.
    pub fn spheres(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Sphere { .. }))
    }

    /// Recorded 3D bones.
    pub fn bones(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Bone { .. }))
    }

    /// Forget recorded calls (textures are kept).
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawBackend for RecordingBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Viewport(viewport));
    }

    fn draw_image(&mut self, frame: &RgbaImage, dst: Viewport) {
        self.commands.push(DrawCommand::Image {
            width: frame.width(),
            height: frame.height(),
            dst,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn create_texture(&mut self, image: &GrayImage) -> Result<TextureId> {
        if self.fail_upload {
            return Err(VizError::BackendError("texture upload refused".to_string()));
        }
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, image.clone());
        Ok(id)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
    }

    fn draw_colormap(&mut self, texture: TextureId, dst: Viewport, alpha: f32) -> Result<()> {
        if self.fail_colormap {
            return Err(VizError::BackendError("colormap draw refused".to_string()));
        }
        if !self.textures.contains_key(&texture) {
            return Err(VizError::BackendError(format!("unknown texture {}", texture.0)));
        }
        self.commands.push(DrawCommand::Colormap {
            texture,
            dst,
            alpha,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_sphere(
        &mut self,
        transform: &Matrix4<f32>,
        center: &Point3<f32>,
        radius: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Sphere {
            transform: *transform,
            center: *center,
            radius,
            color,
        });
    }

    fn draw_bone(
        &mut self,
        transform: &Matrix4<f32>,
        from: &Point3<f32>,
        to: &Point3<f32>,
        radius: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Bone {
            transform: *transform,
            from: *from,
            to: *to,
            radius,
            color,
        });
    }

    fn draw_floor(&mut self, transform: &Matrix4<f32>) {
        self.commands.push(DrawCommand::Floor {
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::backend::ScopedTexture;

    #[test]
    fn test_scoped_texture_released() {
        let mut backend = RecordingBackend::new();
        {
            let mut tex = ScopedTexture::upload(&mut backend, &GrayImage::new(2, 2)).unwrap();
            tex.draw_colormap(Viewport::new(0, 0, 4, 4), 0.8).unwrap();
        }
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.textures_created(), 1);
        assert_eq!(backend.draw_count(), 1);
    }

    #[test]
    fn test_scoped_texture_released_on_error() {
        fn draw(backend: &mut RecordingBackend) -> Result<()> {
            let mut tex = ScopedTexture::upload(backend, &GrayImage::new(2, 2))?;
            tex.draw_colormap(Viewport::new(0, 0, 4, 4), 0.8)?;
            Ok(())
        }

        let mut backend = RecordingBackend::new();
        backend.fail_colormap = true;
        assert!(draw(&mut backend).is_err());
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.textures_created(), 1);
    }

    #[test]
    fn test_viewport_is_not_a_draw() {
        let mut backend = RecordingBackend::new();
        backend.set_viewport(Viewport::new(0, 0, 10, 10));
        assert_eq!(backend.draw_count(), 0);
        backend.draw_text("x", 0, 0);
        assert_eq!(backend.draw_count(), 1);
    }
}
