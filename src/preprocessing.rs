// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame preprocessing for the pose estimator.
//!
//! The frame is stretched (not letterboxed) to the network input size, the alpha channel is
//! dropped and values are scaled to `[0, 1]`. The tensor layout is NHWC, `(1, H, W, 3)`.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use ndarray::Array4;

use crate::error::{Result, VizError};

/// Scale factor from `u8` to `[0, 1]`.
const INV_255: f32 = 1.0 / 255.0;

/// Resize an RGBA image to `(height, width)` and pack it as a normalized NHWC tensor.
///
/// # Errors
///
/// Returns [`VizError::ConfigError`] if the target size is zero or does not fit in `u32`.
pub fn preprocess_image(image: &RgbaImage, input_size: (usize, usize)) -> Result<Array4<f32>> {
    let (h, w) = input_size;
    if h == 0 || w == 0 {
        return Err(VizError::ConfigError(format!("Invalid input size {w}x{h}")));
    }
    let to_u32 = |v: usize| {
        u32::try_from(v)
            .map_err(|_| VizError::ConfigError(format!("Input size {v} exceeds u32::MAX")))
    };
    let (dst_w, dst_h) = (to_u32(w)?, to_u32(h)?);

    let resized;
    let source = if image.dimensions() == (dst_w, dst_h) {
        image
    } else {
        resized = imageops::resize(image, dst_w, dst_h, FilterType::Triangle);
        &resized
    };

    Ok(image_to_tensor(source))
}

/// Pack RGBA pixels as a `(1, H, W, 3)` tensor in `[0, 1]`.
#[must_use]
pub fn image_to_tensor(image: &RgbaImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut tensor = Array4::zeros((1, h, w, 3));
    for (dst, src) in tensor.iter_mut().zip(
        image
            .as_raw()
            .chunks_exact(4)
            .flat_map(|px| px[..3].iter()),
    ) {
        *dst = f32::from(*src) * INV_255;
    }
    tensor
}
