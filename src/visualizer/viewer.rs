// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Window presenting rendered frames.

use std::time::{Duration, Instant};

use image::RgbaImage;
use minifb::{Key, Window, WindowOptions};

use crate::error::{Result, VizError};

/// A simple frame viewer using minifb.
pub struct Viewer {
    window: Window,
    pub width: usize,
    pub height: usize,
    buffer: Vec<u32>,
}

/// Pack an RGBA image as minifb's `0x00RRGGBB` pixels.
fn pack_pixels(image: &RgbaImage, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(image.pixels().map(|p| {
        let [r, g, b, _] = p.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }));
}

impl Viewer {
    /// Create a new viewer window.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::VisualizerError`] if the window cannot be opened.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| VizError::VisualizerError(format!("Failed to create window: {e}")))?;

        // ~60 fps
        window.set_target_fps(60);

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
        })
    }

    /// Whether the window is still open and neither Esc nor Q is held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
    }

    /// Present a frame. Returns `false` once the user closed the window.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::VisualizerError`] if the window rejects the buffer.
    pub fn update(&mut self, image: &RgbaImage) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }

        pack_pixels(image, &mut self.buffer);
        self.width = image.width() as usize;
        self.height = image.height() as usize;

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| VizError::VisualizerError(format!("Failed to update window: {e}")))?;

        Ok(true)
    }

    /// Keep the last frame on screen for `duration` while staying responsive.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::VisualizerError`] if the window rejects the buffer.
    pub fn wait(&mut self, duration: Duration) -> Result<bool> {
        if self.buffer.is_empty() {
            return Ok(self.is_open());
        }

        let start = Instant::now();
        while start.elapsed() < duration {
            if !self.is_open() {
                return Ok(false);
            }
            self.window
                .update_with_buffer(&self.buffer, self.width, self.height)
                .map_err(|e| VizError::VisualizerError(format!("Failed to update window: {e}")))?;
        }
        Ok(true)
    }
}
