// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the pose visualization library

use std::io::Write;

use image::{Rgba, RgbaImage};
use nalgebra::{Point3, Vector3};

use pose3d_viz::geometry::transform_point;
use pose3d_viz::inference::ReplayEstimator;
use pose3d_viz::pipeline::FramePipeline;
use pose3d_viz::source::ImageSource;
use pose3d_viz::visualizer::{Canvas, DrawCommand, RecordingBackend, render3d::floor_transform};
use pose3d_viz::{
    Keypoint2d, Keypoint3d, KeypointId, Pose, PoseResult, SceneConfig, Viewport, letterbox,
    render_2d_scene, render_3d_scene, render_heatmap, shadow_matrix,
};

fn sample_pose() -> Pose {
    let mut pose = Pose::default();
    for (i, id) in KeypointId::ALL.iter().enumerate() {
        let t = i as f32 / 18.0;
        pose.keypoints[id.index()] = Keypoint2d::new(0.3 + 0.4 * t, 0.2 + 0.6 * t, 0.9);
        pose.keypoints_3d[id.index()] = Keypoint3d::new(0.1 * t, -0.3 + 0.6 * t, 0.05, 0.9);
    }
    pose
}

#[test]
fn test_empty_result_draws_nothing() {
    let empty = PoseResult::default();
    let config = SceneConfig::default();
    let rect = Viewport::new(0, 0, 800, 600);
    let mut backend = RecordingBackend::new();

    render_2d_scene(&mut backend, &empty, rect, &config);
    render_heatmap(&mut backend, &empty, rect, 3, &config).unwrap();
    render_3d_scene(&mut backend, &empty, rect, &config);

    assert_eq!(backend.draw_count(), 0);
    assert_eq!(backend.textures_created(), 0);
}

#[test]
fn test_letterbox_cases() {
    assert_eq!(letterbox(640, 480, 800, 600), Viewport::new(0, 0, 800, 600));
    assert_eq!(letterbox(1280, 720, 800, 600), Viewport::new(0, 75, 800, 450));
    assert_eq!(letterbox(640, 480, 600, 800), Viewport::new(0, 175, 600, 450));
    assert_eq!(letterbox(480, 640, 800, 600), Viewport::new(175, 0, 450, 600));
}

#[test]
fn test_2d_positions_follow_rect() {
    let result = PoseResult::new(vec![sample_pose()]);
    let rect = letterbox(1280, 720, 800, 600);
    let mut backend = RecordingBackend::new();
    render_2d_scene(&mut backend, &result, rect, &SceneConfig::default());

    let pose = &result.poses[0];
    let neck = pose.get(KeypointId::Neck);
    let Some(DrawCommand::Line { from, .. }) = backend.lines().next() else {
        panic!("no bones drawn");
    };
    assert_eq!(*from, (neck.x * 800.0, neck.y * 450.0 + 75.0));
}

#[test]
fn test_shadow_lands_on_plane() {
    let ground = Point3::new(0.0, -50.0, 0.0);
    let m = shadow_matrix(Vector3::new(1.0, 2.0, 1.0), ground, Vector3::y()).unwrap();
    for p in [
        Point3::new(0.0, 100.0, -1000.0),
        Point3::new(-35.0, 12.0, -900.0),
        Point3::new(200.0, -10.0, -1100.0),
    ] {
        let q = transform_point(&m, &p).unwrap();
        assert!((q.y + 50.0).abs() < 1e-2);
    }
}

#[test]
fn test_3d_scene_on_canvas() {
    let result = PoseResult::new(vec![sample_pose()]);
    let rect = Viewport::new(0, 0, 320, 240);
    let mut canvas = Canvas::new(320, 240);
    render_3d_scene(&mut canvas, &result, rect, &SceneConfig::default());

    // something besides the black background was drawn
    assert!(canvas.image().pixels().any(|p| p.0 != [0, 0, 0, 255]));
    assert_eq!(canvas.texture_count(), 0);
}

#[test]
fn test_floor_transform_scales_with_width() {
    let config = SceneConfig::default();
    let narrow = floor_transform(400, &config);
    let wide = floor_transform(800, &config);
    let corner = Point3::new(1.0, -1.0, 1.0);
    let a = transform_point(&narrow, &corner).unwrap();
    let b = transform_point(&wide, &corner).unwrap();
    assert!((b.x - 2.0 * a.x).abs() < 1e-3);
}

#[test]
fn test_pipeline_from_json_replay() {
    let results = vec![
        PoseResult::new(vec![sample_pose()]),
        PoseResult::default(),
    ];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&results).unwrap().as_bytes())
        .unwrap();

    let estimator = ReplayEstimator::load(file.path()).unwrap().with_input_size(16, 28);
    let source = ImageSource::from_image(RgbaImage::from_pixel(1280, 720, Rgba([30, 60, 90, 255])));
    let mut pipeline = FramePipeline::new(source, estimator, 400, 300);

    let mut backend = RecordingBackend::new();
    let first = pipeline.step(&mut backend, 0).unwrap().unwrap();
    assert_eq!(first.people, 1);
    assert_eq!(backend.lines().count(), 17);
    assert_eq!(backend.spheres().count(), 36);
    assert_eq!(backend.bones().count(), 26);

    backend.clear();
    let second = pipeline.step(&mut backend, 1).unwrap().unwrap();
    assert_eq!(second.people, 0);
    assert_eq!(backend.lines().count(), 0);
    assert!(second.interval_ms >= 0.0);
}

#[test]
fn test_pipeline_renders_to_canvas() {
    let estimator = ReplayEstimator::from_results(vec![PoseResult::new(vec![sample_pose()])])
        .unwrap()
        .with_input_size(16, 16);
    let source = ImageSource::from_image(RgbaImage::from_pixel(64, 48, Rgba([200, 10, 10, 255])));
    let mut pipeline = FramePipeline::new(source, estimator, 160, 120).with_heatmap(true);

    let (w, h) = pipeline.window_size();
    let mut canvas = Canvas::new(w, h);
    pipeline.step(&mut canvas, 0).unwrap().unwrap();

    let image = canvas.into_image();
    assert_eq!(image.dimensions(), (320, 120));
    // the frame fills the left view, away from the skeleton
    assert_eq!(image.get_pixel(2, 60).0, [200, 10, 10, 255]);
}
