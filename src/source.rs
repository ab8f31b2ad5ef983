// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame sources feeding the pipeline.
//!
//! A source hands out frames in its native pixel format; [`Frame::to_rgba`] converts for
//! display and preprocessing. Still images and image directories are supported; live
//! capture devices plug in through the same [`FrameSource`] trait.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Result, VizError};
use crate::verbose;

/// Pixel layout of a raw frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 4 bytes per pixel, R G B A.
    Rgba,
    /// Packed 4:2:2, `Y0 U Y1 V` for each pair of pixels.
    Yuyv,
}

impl PixelFormat {
    /// Bytes needed for a `width` × `height` frame.
    #[must_use]
    pub const fn frame_len(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self {
            Self::Rgba => pixels * 4,
            Self::Yuyv => pixels * 2,
        }
    }
}

/// One captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap raw bytes, checking the length against the format.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::SourceError`] if `data` has the wrong length, or if a YUYV
    /// frame has an odd width.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = format.frame_len(width, height);
        if data.len() != expected {
            return Err(VizError::SourceError(format!(
                "{format:?} frame {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        if format == PixelFormat::Yuyv && width % 2 != 0 {
            return Err(VizError::SourceError(format!("YUYV frame width {width} is odd")));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Convert to RGBA.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::SourceError`] if the buffer does not match the dimensions.
    pub fn to_rgba(&self) -> Result<RgbaImage> {
        let data = match self.format {
            PixelFormat::Rgba => self.data.clone(),
            PixelFormat::Yuyv => yuyv_to_rgba(&self.data),
        };
        RgbaImage::from_raw(self.width, self.height, data).ok_or_else(|| {
            VizError::SourceError(format!(
                "frame buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }
}

impl From<RgbaImage> for Frame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            data: image.into_raw(),
        }
    }
}

/// Convert packed YUYV bytes to RGBA using full-range BT.601 coefficients.
///
/// A trailing partial group (fewer than 4 bytes) is ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn yuyv_to_rgba(data: &[u8]) -> Vec<u8> {
    let convert = |y: u8, u: f32, v: f32| -> [u8; 4] {
        let y = f32::from(y);
        let r = 1.402f32.mul_add(v, y);
        let g = 0.714_136f32.mul_add(-v, 0.344_136f32.mul_add(-u, y));
        let b = 1.772f32.mul_add(u, y);
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        [q(r), q(g), q(b), 255]
    };

    let mut out = Vec::with_capacity(data.len() * 2);
    for group in data.chunks_exact(4) {
        let u = f32::from(group[1]) - 128.0;
        let v = f32::from(group[3]) - 128.0;
        out.extend_from_slice(&convert(group[0], u, v));
        out.extend_from_slice(&convert(group[2], u, v));
    }
    out
}

/// A producer of frames.
pub trait FrameSource {
    /// Frame size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Native pixel format of produced frames.
    fn pixel_format(&self) -> PixelFormat;

    /// The next frame, or `None` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if a frame cannot be read or decoded.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn pixel_format(&self) -> PixelFormat {
        (**self).pixel_format()
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        (**self).next_frame()
    }
}

/// A single still image, returned on every call.
#[derive(Debug, Clone)]
pub struct ImageSource {
    frame: Frame,
}

impl ImageSource {
    /// Load an image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| VizError::ImageError(format!("Failed to load {}: {e}", path.display())))?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    /// Wrap an in-memory image.
    #[must_use]
    pub fn from_image(image: RgbaImage) -> Self {
        Self::from_frame(Frame::from(image))
    }

    /// Wrap an already captured frame.
    #[must_use]
    pub const fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }
}

impl FrameSource for ImageSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn pixel_format(&self) -> PixelFormat {
        self.frame.format
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(Some(self.frame.clone()))
    }
}

/// The images of a directory in file name order, each returned once.
///
/// Frames keep their own sizes; [`FrameSource::dimensions`] reports the first image.
#[derive(Debug, Clone)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    current: usize,
    dimensions: (u32, u32),
}

impl ImageSequence {
    /// Collect the images of `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a readable directory or holds no images.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let paths = collect_images_from_dir(dir.as_ref())?;
        Self::from_paths(paths)
    }

    /// Use an explicit list of image files.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or the first image cannot be read.
    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        let first = paths
            .first()
            .ok_or_else(|| VizError::SourceError("no images found".to_string()))?;
        let dimensions = image::image_dimensions(first)
            .map_err(|e| VizError::ImageError(format!("Failed to read {}: {e}", first.display())))?;
        Ok(Self {
            paths,
            current: 0,
            dimensions,
        })
    }

    /// Number of images in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the sequence has no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Rgba
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.paths.get(self.current) else {
            return Ok(None);
        };
        self.current += 1;
        verbose!("Loading {}", path.display());
        let image = image::open(path)
            .map_err(|e| VizError::ImageError(format!("Failed to load {}: {e}", path.display())))?;
        Ok(Some(Frame::from(image.to_rgba8())))
    }
}

/// Open a still image or an image directory, depending on what `path` names.
///
/// # Errors
///
/// Returns an error if the path does not exist or cannot be loaded.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn FrameSource>> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(ImageSequence::open(path)?))
    } else if path.is_file() {
        Ok(Box::new(ImageSource::open(path)?))
    } else {
        Err(VizError::SourceError(format!("Source not found: {}", path.display())))
    }
}

/// Collect image paths from a directory, sorted by name.
fn collect_images_from_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(VizError::SourceError(format!("Not a directory: {}", dir.display())));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_image_file(path))
        .collect();

    paths.sort();
    Ok(paths)
}

/// Check if a path is an image file based on extension.
fn is_image_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "jpg" | "jpeg" | "png" | "bmp")
    })
}
