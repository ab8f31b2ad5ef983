// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # pose3d-viz
//!
//! Human pose visualization in 2D and 3D. Each frame from a source is passed to a pose
//! estimator, and the result is drawn twice side by side:
//!
//! - **2D view** - the frame, letterboxed into its view, with colored bones and keypoint
//!   markers and an optional false-color heatmap overlay
//! - **3D view** - the skeleton placed in world space as spheres and cylinders over a floor,
//!   plus a planar cast shadow
//!
//! Rendering goes through the [`DrawBackend`] trait. [`visualizer::Canvas`] rasterizes into
//! an RGBA image; [`visualizer::RecordingBackend`] records draw calls.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use pose3d_viz::inference::ReplayEstimator;
//! use pose3d_viz::pipeline::FramePipeline;
//! use pose3d_viz::source::ImageSource;
//! use pose3d_viz::visualizer::Canvas;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = ImageSource::open("person.jpg")?;
//!     let estimator = ReplayEstimator::load("poses.json")?;
//!     let mut pipeline = FramePipeline::new(source, estimator, 896, 512).with_heatmap(true);
//!
//!     let (w, h) = pipeline.window_size();
//!     let mut canvas = Canvas::new(w, h);
//!     if let Some(stats) = pipeline.step(&mut canvas, 0)? {
//!         println!("{} people, {:.1}ms inference", stats.people, stats.inference_ms);
//!     }
//!     canvas.save("scene.png")?;
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Render one frame to a file
//! pose3d-viz run --source person.jpg --poses poses.json --save scene.png
//!
//! # Play a directory of frames in a window with the heatmap overlay
//! pose3d-viz run --source frames/ --poses poses.json --show --heatmap
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pose`] | Keypoints, heatmaps and [`PoseResult`] |
//! | [`layout`] | [`Viewport`] and [`letterbox`] fitting |
//! | [`geometry`] | 4×4 transform helpers |
//! | [`visualizer`] | Renderers, draw backends and the shadow projector |
//! | [`pipeline`] | Per-frame orchestration ([`pipeline::FramePipeline`]) |
//! | [`source`] | Frame sources and pixel formats |
//! | [`inference`] | [`inference::PoseEstimator`] and the JSON replay estimator |
//! | [`config`] | [`SceneConfig`] render settings |
//! | [`error`] | Error types ([`VizError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `visualize` | Real-time window display (default) |

// Modules
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod inference;
pub mod layout;
pub mod pipeline;
pub mod pose;
pub mod preprocessing;
pub mod source;
pub mod visualizer;

// Re-export main types for convenience
pub use config::SceneConfig;
pub use error::{Result, VizError};
pub use layout::{Viewport, letterbox};
pub use pose::{Heatmap, Keypoint2d, Keypoint3d, KeypointId, Pose, PoseResult};
pub use visualizer::{
    Color, DrawBackend, heatmap_channel, render_2d_scene, render_3d_scene, render_heatmap,
    shadow_matrix,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose3d-viz");
    }
}
