// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! World-space skeleton with a planar cast shadow.

use nalgebra::{Matrix4, Vector3};

use crate::config::SceneConfig;
use crate::geometry::{identity, multiply, rotate, scale, translate};
use crate::layout::Viewport;
use crate::pose::{KeypointId, PoseResult};
use crate::visualizer::backend::DrawBackend;
use crate::visualizer::color::Color;
use crate::visualizer::shadow::shadow_matrix;
use crate::visualizer::skeleton::{LimbGroup, skeleton_3d};
use crate::visualizer::world::{WorldPose, world_pose};
use crate::warn;

/// Which of the two skeleton passes is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Normal,
    Shadow,
}

/// Floor transform for a frame `width` pixels wide.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn floor_transform(width: u32, config: &SceneConfig) -> Matrix4<f32> {
    let size = width as f32 / 2.0;
    let m = translate(&identity(), 0.0, size * config.floor_lift, 0.0);
    scale(&m, size, size, size)
}

/// Draw the floor and the primary pose's 3D skeleton, then its shadow.
///
/// `rect` supplies the frame size used to place the skeleton (its height is the world
/// scale). Only the first pose is drawn; an empty result draws nothing.
pub fn render_3d_scene<B: DrawBackend + ?Sized>(
    backend: &mut B,
    result: &PoseResult,
    rect: Viewport,
    config: &SceneConfig,
) {
    let Some(pose) = result.subjects_3d().first() else {
        return;
    };
    let world = world_pose(pose, rect.height, config.z_offset);

    backend.draw_floor(&floor_transform(rect.width, config));

    let base = rotate(&identity(), config.rotation, Vector3::z());
    render_skeleton(backend, &world, &base, Pass::Normal, config);

    match shadow_matrix(config.light_dir, config.ground_pos, config.ground_normal) {
        Some(shadow) => {
            #[allow(clippy::cast_precision_loss)]
            let drop = -config.shadow_drop * rect.height as f32;
            let global = multiply(&translate(&base, 0.0, drop, 0.0), &shadow);
            render_skeleton(backend, &world, &global, Pass::Shadow, config);
        }
        None => {
            warn!("Light direction is parallel to the ground plane, skipping shadow pass");
        }
    }
}

fn render_skeleton<B: DrawBackend + ?Sized>(
    backend: &mut B,
    world: &WorldPose,
    global: &Matrix4<f32>,
    pass: Pass,
    config: &SceneConfig,
) {
    for id in KeypointId::ALL {
        let Some(group) = LimbGroup::of(id) else {
            continue;
        };
        let color = match pass {
            Pass::Normal => group.color(),
            Pass::Shadow => config.shadow_color,
        };
        let kp = world.get(id);
        let color = color.with_alpha(config.visibility_alpha(kp.score, color.a));
        backend.draw_sphere(global, &kp.position, config.joint_radius_for(id.index()), color);
    }

    let bone_color: Color = match pass {
        Pass::Normal => config.bone_color,
        Pass::Shadow => config.shadow_color,
    };
    for bone in skeleton_3d() {
        let k0 = world.get(bone.from);
        let k1 = world.get(bone.to);
        let score = (k0.score + k1.score) * 0.5;
        let color = bone_color.with_alpha(config.visibility_alpha(score, bone_color.a));
        backend.draw_bone(global, &k0.position, &k1.position, config.bone_radius, color);
    }
}
