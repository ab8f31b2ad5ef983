// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Render configuration.
//!
//! [`SceneConfig`] collects every constant used by the 2D, heatmap and 3D renderers. The
//! defaults give the standard look; the builder methods are for tuning.

use nalgebra::{Point3, Vector3};

use crate::visualizer::Color;

/// Configuration for the pose renderers.
///
/// # Example
///
/// ```rust
/// use pose3d_viz::SceneConfig;
///
/// let config = SceneConfig::new()
///     .with_bone_width(3.0)
///     .with_heatmap_opacity(0.5)
///     .with_rotation(15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Width of 2D bone lines in pixels.
    pub bone_width: f32,
    /// Side length of 2D keypoint markers in pixels.
    pub marker_size: u32,
    /// Blend factor of the heatmap overlay.
    pub heatmap_opacity: f32,
    /// Distance the 3D skeleton is pushed away from the viewer, in world units.
    pub z_offset: f32,
    /// Sphere radius for body keypoints.
    pub joint_radius: f32,
    /// Sphere radius for eyes and ears.
    pub extremity_radius: f32,
    /// First keypoint index drawn with `extremity_radius`.
    pub extremity_start: usize,
    /// Cylinder radius of 3D bones.
    pub bone_radius: f32,
    /// Scores at or below this are drawn faint in 3D.
    pub visibility_threshold: f32,
    /// Alpha used for faint 3D primitives.
    pub faint_alpha: f32,
    /// Direction light travels along when casting the shadow.
    pub light_dir: Vector3<f32>,
    /// Any point on the shadow plane.
    pub ground_pos: Point3<f32>,
    /// Shadow plane normal.
    pub ground_normal: Vector3<f32>,
    /// Color of the shadow pass.
    pub shadow_color: Color,
    /// Color of 3D bones in the normal pass.
    pub bone_color: Color,
    /// Rotation of the 3D scene around the view axis, in degrees.
    pub rotation: f32,
    /// Floor lift as a fraction of the floor half-size.
    pub floor_lift: f32,
    /// Shadow plane drop as a fraction of the frame height.
    pub shadow_drop: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bone_width: 5.0,
            marker_size: 9,
            heatmap_opacity: 0.8,
            z_offset: 1000.0,
            joint_radius: 15.0,
            extremity_radius: 3.0,
            extremity_start: 14,
            bone_radius: 5.0,
            visibility_threshold: 0.1,
            faint_alpha: 0.1,
            light_dir: Vector3::new(1.0, 2.0, 1.0),
            ground_pos: Point3::origin(),
            ground_normal: Vector3::new(0.0, 1.0, 0.0),
            shadow_color: Color::SHADOW,
            bone_color: Color::WHITE,
            rotation: 0.0,
            floor_lift: 0.9,
            shadow_drop: 0.5,
        }
    }
}

impl SceneConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 2D bone line width.
    #[must_use]
    pub const fn with_bone_width(mut self, width: f32) -> Self {
        self.bone_width = width;
        self
    }

    /// Set the 2D marker size.
    #[must_use]
    pub const fn with_marker_size(mut self, size: u32) -> Self {
        self.marker_size = size;
        self
    }

    /// Set the heatmap overlay opacity.
    #[must_use]
    pub const fn with_heatmap_opacity(mut self, opacity: f32) -> Self {
        self.heatmap_opacity = opacity;
        self
    }

    /// Set the 3D z offset.
    #[must_use]
    pub const fn with_z_offset(mut self, offset: f32) -> Self {
        self.z_offset = offset;
        self
    }

    /// Set the light direction used for the shadow.
    #[must_use]
    pub const fn with_light_dir(mut self, dir: Vector3<f32>) -> Self {
        self.light_dir = dir;
        self
    }

    /// Set the shadow plane.
    #[must_use]
    pub const fn with_ground(mut self, pos: Point3<f32>, normal: Vector3<f32>) -> Self {
        self.ground_pos = pos;
        self.ground_normal = normal;
        self
    }

    /// Set the rotation of the 3D scene in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Alpha for a 3D primitive of the given confidence.
    #[must_use]
    pub fn visibility_alpha(&self, score: f32, alpha: f32) -> f32 {
        if score > self.visibility_threshold {
            alpha
        } else {
            self.faint_alpha
        }
    }

    /// Sphere radius for keypoint slot `index`.
    #[must_use]
    pub const fn joint_radius_for(&self, index: usize) -> f32 {
        if index < self.extremity_start {
            self.joint_radius
        } else {
            self.extremity_radius
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SceneConfig::default();
        assert!((config.bone_width - 5.0).abs() < f32::EPSILON);
        assert_eq!(config.marker_size, 9);
        assert!((config.heatmap_opacity - 0.8).abs() < f32::EPSILON);
        assert!((config.z_offset - 1000.0).abs() < f32::EPSILON);
        assert_eq!(config.light_dir, Vector3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_config_builder() {
        let config = SceneConfig::new()
            .with_bone_width(2.0)
            .with_marker_size(5)
            .with_rotation(30.0)
            .with_ground(Point3::new(0.0, -10.0, 0.0), Vector3::y());

        assert!((config.bone_width - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.marker_size, 5);
        assert!((config.rotation - 30.0).abs() < f32::EPSILON);
        assert_eq!(config.ground_pos, Point3::new(0.0, -10.0, 0.0));
    }

    #[test]
    fn test_visibility_alpha() {
        let config = SceneConfig::default();
        assert!((config.visibility_alpha(0.5, 1.0) - 1.0).abs() < f32::EPSILON);
        assert!((config.visibility_alpha(0.1, 1.0) - 0.1).abs() < f32::EPSILON);
        assert!((config.visibility_alpha(0.05, 0.5) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_joint_radius_for() {
        let config = SceneConfig::default();
        assert!((config.joint_radius_for(0) - 15.0).abs() < f32::EPSILON);
        assert!((config.joint_radius_for(13) - 15.0).abs() < f32::EPSILON);
        assert!((config.joint_radius_for(14) - 3.0).abs() < f32::EPSILON);
    }
}
