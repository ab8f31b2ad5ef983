// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Screen-space skeleton overlay.

use crate::config::SceneConfig;
use crate::layout::Viewport;
use crate::pose::{KeypointId, Pose, PoseResult};
use crate::visualizer::backend::DrawBackend;
use crate::visualizer::skeleton::{Bone, LimbGroup, skeleton_2d};

/// Alpha of a bone: the mean confidence of its two endpoints.
#[must_use]
pub fn bone_alpha(score0: f32, score1: f32) -> f32 {
    (score0 + score1) * 0.5
}

/// Draw every detected pose as bones plus keypoint markers inside `rect`.
///
/// Keypoint coordinates are mapped with `pixel = normalized * size + offset`. Bones are
/// drawn first, each faded by [`bone_alpha`]; markers follow at full group color.
pub fn render_2d_scene<B: DrawBackend + ?Sized>(
    backend: &mut B,
    result: &PoseResult,
    rect: Viewport,
    config: &SceneConfig,
) {
    for pose in &result.poses {
        for bone in skeleton_2d() {
            render_2d_bone(backend, pose, bone, rect, config);
        }
        render_2d_keypoints(backend, pose, rect, config);
    }
}

fn render_2d_bone<B: DrawBackend + ?Sized>(
    backend: &mut B,
    pose: &Pose,
    bone: &Bone,
    rect: Viewport,
    config: &SceneConfig,
) {
    let k0 = pose.get(bone.from);
    let k1 = pose.get(bone.to);
    let color = bone.group.color().with_alpha(bone_alpha(k0.score, k1.score));
    backend.draw_line(
        rect.to_pixel(k0.x, k0.y),
        rect.to_pixel(k1.x, k1.y),
        color,
        config.bone_width,
    );
}

#[allow(clippy::cast_precision_loss)]
fn render_2d_keypoints<B: DrawBackend + ?Sized>(
    backend: &mut B,
    pose: &Pose,
    rect: Viewport,
    config: &SceneConfig,
) {
    let size = config.marker_size as f32;
    let half = (config.marker_size / 2) as f32;
    for id in KeypointId::ALL {
        let Some(group) = LimbGroup::of(id) else {
            continue;
        };
        let kp = pose.get(id);
        let (x, y) = rect.to_pixel(kp.x, kp.y);
        backend.fill_rect(x - half, y - half, size, size, group.color());
    }
}
