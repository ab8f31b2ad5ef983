// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Renderers for pose results and the backends they draw through.

pub mod backend;
pub mod canvas;
/// Color definitions and the heatmap colormap.
pub mod color;
pub mod font;
pub mod heatmap;
pub mod recorder;
pub mod render2d;
pub mod render3d;
pub mod shadow;
/// Bone topology and limb colors.
pub mod skeleton;
pub mod world;

#[cfg(feature = "visualize")]
pub mod viewer;

pub use backend::{DrawBackend, ScopedTexture, TextureId};
pub use canvas::Canvas;
pub use color::Color;
pub use heatmap::{heatmap_channel, render_heatmap};
pub use recorder::{DrawCommand, RecordingBackend};
pub use render2d::render_2d_scene;
pub use render3d::render_3d_scene;
pub use shadow::shadow_matrix;
pub use skeleton::{Bone, LimbGroup, SKELETON};

#[cfg(feature = "visualize")]
pub use viewer::Viewer;
