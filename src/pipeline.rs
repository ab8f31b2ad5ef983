// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame orchestration: capture, inference and rendering.
//!
//! The output window is two views side by side, each `width` × `height`:
//!
//! ```text
//! +------------------+------------------+
//! | frame + 2D pose  |   3D skeleton    |
//! | (+ heatmap)      |   and shadow     |
//! +------------------+------------------+
//! ```

use std::time::Instant;

use crate::config::SceneConfig;
use crate::error::Result;
use crate::inference::PoseEstimator;
use crate::layout::{Viewport, letterbox};
use crate::preprocessing::preprocess_image;
use crate::source::FrameSource;
use crate::visualizer::backend::DrawBackend;
use crate::visualizer::heatmap::render_heatmap;
use crate::visualizer::render2d::render_2d_scene;
use crate::visualizer::render3d::render_3d_scene;

/// Position of the debug text in the left view.
const DEBUG_TEXT_POS: (i32, i32) = (10, 10);

/// Timing and detection summary of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Time since the previous frame started, 0 for the first frame.
    pub interval_ms: f64,
    /// Time spent in the estimator.
    pub inference_ms: f64,
    /// Number of detected people.
    pub people: usize,
}

/// Debug overlay text for one frame.
#[must_use]
pub fn debug_text(interval_ms: f64, inference_ms: f64) -> String {
    format!("Interval:{interval_ms:5.1} [ms]\nInference:{inference_ms:5.1} [ms]")
}

/// Drives a frame source and a pose estimator and renders each result.
pub struct FramePipeline<S: FrameSource, E: PoseEstimator> {
    source: S,
    estimator: E,
    config: SceneConfig,
    width: u32,
    height: u32,
    show_heatmap: bool,
    last_start: Option<Instant>,
}

impl<S: FrameSource, E: PoseEstimator> FramePipeline<S, E> {
    /// Create a pipeline whose views are each `width` × `height` pixels.
    pub fn new(source: S, estimator: E, width: u32, height: u32) -> Self {
        Self {
            source,
            estimator,
            config: SceneConfig::default(),
            width,
            height,
            show_heatmap: false,
            last_start: None,
        }
    }

    /// Use custom render settings.
    #[must_use]
    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Overlay the cycling heatmap channel on the left view.
    #[must_use]
    pub const fn with_heatmap(mut self, enabled: bool) -> Self {
        self.show_heatmap = enabled;
        self
    }

    /// Size of the whole output window: both views side by side.
    #[must_use]
    pub const fn window_size(&self) -> (u32, u32) {
        (self.width * 2, self.height)
    }

    /// Left view: the frame with its 2D overlay.
    #[must_use]
    pub const fn left_view(&self) -> Viewport {
        Viewport::new(0, 0, self.width, self.height)
    }

    /// Right view: the 3D scene.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn right_view(&self) -> Viewport {
        Viewport::new(self.width as i32, 0, self.width, self.height)
    }

    /// Render settings in use.
    #[must_use]
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Process one frame and draw it through `backend`.
    ///
    /// `frame_index` is owned by the caller and selects the heatmap channel. Returns
    /// `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates source, preprocessing, estimator and texture upload failures.
    pub fn step<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        frame_index: u64,
    ) -> Result<Option<FrameStats>> {
        let start = Instant::now();
        let interval_ms = self
            .last_start
            .map_or(0.0, |last| start.duration_since(last).as_secs_f64() * 1000.0);
        self.last_start = Some(start);

        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };
        let rgba = frame.to_rgba()?;
        let rect = letterbox(frame.width, frame.height, self.width, self.height);

        let input = preprocess_image(&rgba, self.estimator.input_size())?;
        let invoke = Instant::now();
        let result = self.estimator.estimate(&input)?;
        let inference_ms = invoke.elapsed().as_secs_f64() * 1000.0;

        let left = self.left_view();
        backend.set_viewport(left);
        backend.draw_image(&rgba, rect);
        render_2d_scene(backend, &result, rect, &self.config);
        if self.show_heatmap {
            render_heatmap(backend, &result, rect, frame_index, &self.config)?;
        }

        backend.set_viewport(self.right_view());
        render_3d_scene(backend, &result, rect, &self.config);

        backend.set_viewport(left);
        let (x, y) = DEBUG_TEXT_POS;
        backend.draw_text(&debug_text(interval_ms, inference_ms), x, y);

        Ok(Some(FrameStats {
            interval_ms,
            inference_ms,
            people: result.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ReplayEstimator;
    use crate::pose::{Heatmap, KEYPOINT_SLOTS, Keypoint2d, Pose, PoseResult};
    use crate::source::{Frame, ImageSource, PixelFormat};
    use crate::visualizer::recorder::{DrawCommand, RecordingBackend};
    use image::{Rgba, RgbaImage};
    use ndarray::Array3;

    fn pipeline(results: Vec<PoseResult>) -> FramePipeline<ImageSource, ReplayEstimator> {
        let source = ImageSource::from_image(RgbaImage::from_pixel(640, 480, Rgba([9, 9, 9, 255])));
        let estimator = ReplayEstimator::from_results(results).unwrap().with_input_size(8, 8);
        FramePipeline::new(source, estimator, 800, 600)
    }

    fn person() -> Pose {
        let mut pose = Pose::default();
        pose.keypoints[1] = Keypoint2d::new(0.5, 0.5, 1.0);
        pose
    }

    #[test]
    fn test_debug_text() {
        assert_eq!(
            debug_text(16.66, 3.0),
            "Interval: 16.7 [ms]\nInference:  3.0 [ms]"
        );
    }

    #[test]
    fn test_views() {
        let p = pipeline(vec![PoseResult::default()]);
        assert_eq!(p.window_size(), (1600, 600));
        assert_eq!(p.left_view(), Viewport::new(0, 0, 800, 600));
        assert_eq!(p.right_view(), Viewport::new(800, 0, 800, 600));
    }

    #[test]
    fn test_step_without_people() {
        let mut p = pipeline(vec![PoseResult::default()]);
        let mut backend = RecordingBackend::new();
        let stats = p.step(&mut backend, 0).unwrap().unwrap();
        assert_eq!(stats.people, 0);
        assert!(stats.interval_ms.abs() < 1e-9);

        // frame, then debug text: the renderers add nothing
        let draws: Vec<_> = backend.commands.iter().filter(|c| c.is_draw()).collect();
        assert_eq!(draws.len(), 2);
        assert_eq!(
            *draws[0],
            DrawCommand::Image {
                width: 640,
                height: 480,
                dst: Viewport::new(0, 0, 800, 600),
            }
        );
        assert!(matches!(draws[1], DrawCommand::Text { x: 10, y: 10, .. }));
    }

    #[test]
    fn test_step_viewport_order() {
        let mut p = pipeline(vec![PoseResult::new(vec![person()])]);
        let mut backend = RecordingBackend::new();
        let stats = p.step(&mut backend, 0).unwrap().unwrap();
        assert_eq!(stats.people, 1);

        let viewports: Vec<Viewport> = backend
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Viewport(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(viewports, vec![p.left_view(), p.right_view(), p.left_view()]);

        // 3D primitives only after the switch to the right view
        let right = backend
            .commands
            .iter()
            .position(|c| *c == DrawCommand::Viewport(p.right_view()))
            .unwrap();
        let first_floor = backend
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Floor { .. }))
            .unwrap();
        assert!(first_floor > right);
        assert_eq!(backend.lines().count(), 17);
    }

    #[test]
    fn test_step_with_heatmap() {
        let pose = person().with_heatmap(Heatmap::new(Array3::from_shape_fn(
            (4, 4, KEYPOINT_SLOTS),
            |(y, x, _)| (x + y) as f32,
        )));
        let mut p = pipeline(vec![PoseResult::new(vec![pose])]).with_heatmap(true);
        let mut backend = RecordingBackend::new();
        p.step(&mut backend, 19).unwrap().unwrap();

        assert_eq!(backend.live_textures(), 0);
        assert!(backend.commands.iter().any(|c| matches!(c, DrawCommand::Colormap { .. })));
        assert!(backend.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, x: 5, y: 5 } if text == "Neck"
        )));
    }

    #[test]
    fn test_step_propagates_upload_failure() {
        let pose = person().with_heatmap(Heatmap::new(Array3::ones((2, 2, KEYPOINT_SLOTS))));
        let mut p = pipeline(vec![PoseResult::new(vec![pose])]).with_heatmap(true);
        let mut backend = RecordingBackend::new();
        backend.fail_upload = true;
        assert!(p.step(&mut backend, 0).is_err());
    }

    #[test]
    fn test_step_converts_yuyv_frames() {
        // 4x2 mid-gray YUYV frame
        let frame = Frame::new(4, 2, PixelFormat::Yuyv, [128, 128, 128, 128].repeat(4)).unwrap();
        let estimator = ReplayEstimator::from_results(vec![PoseResult::default()])
            .unwrap()
            .with_input_size(2, 4);
        let mut p = FramePipeline::new(ImageSource::from_frame(frame), estimator, 80, 40);
        let mut backend = RecordingBackend::new();

        assert!(p.step(&mut backend, 0).unwrap().is_some());
        assert!(backend.commands.contains(&DrawCommand::Image {
            width: 4,
            height: 2,
            dst: Viewport::new(0, 0, 80, 40),
        }));
    }

    #[test]
    fn test_step_ends_with_source() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::new(4, 4).save(dir.path().join("only.png")).unwrap();
        let source = crate::source::ImageSequence::open(dir.path()).unwrap();
        let estimator = ReplayEstimator::from_results(vec![PoseResult::default()])
            .unwrap()
            .with_input_size(4, 4);
        let mut p = FramePipeline::new(source, estimator, 40, 40);
        let mut backend = RecordingBackend::new();

        assert!(p.step(&mut backend, 0).unwrap().is_some());
        assert!(p.step(&mut backend, 1).unwrap().is_none());
    }
}
