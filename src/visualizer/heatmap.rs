// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! False-color display of one heatmap channel.

use image::{GrayImage, Luma};
use ndarray::ArrayView2;

use crate::config::SceneConfig;
use crate::error::Result;
use crate::layout::Viewport;
use crate::pose::{Heatmap, KeypointId, LANDMARK_COUNT, PoseResult};
use crate::visualizer::backend::{DrawBackend, ScopedTexture};
use crate::verbose;

/// Landmark whose channel is shown on frame `frame_index`.
///
/// Cycles through the anatomical landmarks, one per frame; the reserved channel is skipped.
#[must_use]
pub fn heatmap_channel(frame_index: u64) -> KeypointId {
    #[allow(clippy::cast_possible_truncation)]
    let index = (frame_index % LANDMARK_COUNT as u64) as usize;
    KeypointId::ALL[index]
}

/// Normalize one channel to an 8-bit grayscale image.
///
/// Values are mapped with `(v - min) / (max - min)` over the channel, clamped to `[0, 1]`
/// and scaled to `0..=255`. A flat or non-finite channel yields an all-zero image.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_channel(channel: ArrayView2<'_, f32>) -> GrayImage {
    let (height, width) = channel.dim();
    let (min, max) = channel
        .iter()
        .fold((f32::MAX, -f32::MAX), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    let mut image = GrayImage::new(width as u32, height as u32);
    if !(range.is_finite() && range > 0.0) {
        verbose!("Flat heatmap channel ({min}..{max}), drawing zeros");
        return image;
    }

    for ((y, x), &v) in channel.indexed_iter() {
        let norm = ((v - min) / range).clamp(0.0, 1.0);
        image.put_pixel(x as u32, y as u32, Luma([(norm * 255.0) as u8]));
    }
    image
}

/// Grayscale image of `channel` of a heatmap, or `None` if the heatmap is empty or the
/// channel does not exist.
#[must_use]
pub fn heatmap_image(heatmap: &Heatmap, channel: KeypointId) -> Option<GrayImage> {
    if heatmap.is_empty() {
        return None;
    }
    heatmap.channel(channel.index()).map(normalize_channel)
}

/// Overlay one heatmap channel of the primary pose onto `rect` and label it.
///
/// The channel is chosen by [`heatmap_channel`] from the caller-owned `frame_index`. The
/// temporary texture is released before this returns, on success and on error.
///
/// # Errors
///
/// Propagates texture upload or colormap draw failures from the backend.
pub fn render_heatmap<B: DrawBackend + ?Sized>(
    backend: &mut B,
    result: &PoseResult,
    rect: Viewport,
    frame_index: u64,
    config: &SceneConfig,
) -> Result<()> {
    let Some(pose) = result.primary() else {
        return Ok(());
    };
    let key = heatmap_channel(frame_index);
    let Some(image) = heatmap_image(&pose.heatmap, key) else {
        return Ok(());
    };

    {
        let mut texture = ScopedTexture::upload(backend, &image)?;
        texture.draw_colormap(rect, config.heatmap_opacity)?;
    }

    backend.draw_text(key.name(), rect.x + 5, 5);
    Ok(())
}
