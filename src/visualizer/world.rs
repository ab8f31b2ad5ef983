// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Placement of normalized 3D keypoints in world space.
//!
//! The estimator's 3D output is body-relative. The skeleton is recentred under the neck's
//! 2D position so the 3D view lines up with the frame content, scaled by the frame height,
//! and pushed `z_offset` units away from the viewer. Image y grows downward and estimator
//! z grows away from the camera, so both are flipped.

use nalgebra::Point3;

use crate::pose::{KEYPOINT_SLOTS, KeypointId, Pose};

/// A keypoint in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldKeypoint {
    pub position: Point3<f32>,
    /// Confidence, passed through from the estimator.
    pub score: f32,
}

impl Default for WorldKeypoint {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            score: 0.0,
        }
    }
}

/// All keypoint slots of one pose in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPose {
    pub keypoints: [WorldKeypoint; KEYPOINT_SLOTS],
}

impl WorldPose {
    /// The keypoint in slot `id`.
    #[must_use]
    pub const fn get(&self, id: KeypointId) -> &WorldKeypoint {
        &self.keypoints[id as usize]
    }
}

/// Map a pose's 3D keypoints into world space for a frame `frame_h` pixels tall.
///
/// The frame height is the only reference dimension, so the skeleton size does not depend
/// on the frame width. With `dx = neck.x - 0.5`, `dy = neck.y - 0.5` (2D neck) and `s = frame_h`:
/// `X = (x + dx) * s`, `Y = -(y + dy) * s`, `Z = -(z * s + z_offset)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn world_pose(pose: &Pose, frame_h: u32, z_offset: f32) -> WorldPose {
    let neck = pose.get(KeypointId::Neck);
    let x_offset = neck.x - 0.5;
    let y_offset = neck.y - 0.5;
    let scale = frame_h as f32;

    let mut keypoints = [WorldKeypoint::default(); KEYPOINT_SLOTS];
    for (dst, src) in keypoints.iter_mut().zip(pose.keypoints_3d.iter()) {
        let x = (src.x + x_offset) * scale;
        let y = -((src.y + y_offset) * scale);
        let z = -(src.z * scale + z_offset);
        *dst = WorldKeypoint {
            position: Point3::new(x, y, z),
            score: src.score,
        };
    }
    WorldPose { keypoints }
}
