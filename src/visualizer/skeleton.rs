// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::pose::KeypointId;
use crate::visualizer::color::Color;

/// Anatomical color groups shared by the 2D and 3D renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbGroup {
    /// Nose and neck.
    Head,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
    /// Eyes and ears.
    Face,
}

impl LimbGroup {
    /// Palette color of the group.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Head => Color::YELLOW,
            Self::RightArm => Color::RED,
            Self::LeftArm => Color::VIOLET,
            Self::RightLeg => Color::GREEN,
            Self::LeftLeg => Color::CYAN,
            Self::Face => Color::BLUE,
        }
    }

    /// Group of a keypoint slot. The reserved center slot has none.
    #[must_use]
    pub const fn of(id: KeypointId) -> Option<Self> {
        use KeypointId as K;
        match id {
            K::Nose | K::Neck => Some(Self::Head),
            K::RShoulder | K::RElbow | K::RWrist => Some(Self::RightArm),
            K::LShoulder | K::LElbow | K::LWrist => Some(Self::LeftArm),
            K::RHip | K::RKnee | K::RAnkle => Some(Self::RightLeg),
            K::LHip | K::LKnee | K::LAnkle => Some(Self::LeftLeg),
            K::LEye | K::REye | K::LEar | K::REar => Some(Self::Face),
            K::Center => None,
        }
    }
}

/// A fixed connection between two keypoint slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
    pub from: KeypointId,
    pub to: KeypointId,
    pub group: LimbGroup,
}

impl Bone {
    const fn new(from: KeypointId, to: KeypointId, group: LimbGroup) -> Self {
        Self { from, to, group }
    }
}

/// Skeleton topology drawn by the 2D renderer.
///
/// The first [`SKELETON_3D_LEN`] entries are the 3D skeleton; the trailing eye/ear bones
/// are 2D only.
pub const SKELETON: [Bone; 17] = {
    use KeypointId as K;
    use LimbGroup as G;
    [
        // right arm
        Bone::new(K::Neck, K::RShoulder, G::RightArm),
        Bone::new(K::RShoulder, K::RElbow, G::RightArm),
        Bone::new(K::RElbow, K::RWrist, G::RightArm),
        // left arm
        Bone::new(K::Neck, K::LShoulder, G::LeftArm),
        Bone::new(K::LShoulder, K::LElbow, G::LeftArm),
        Bone::new(K::LElbow, K::LWrist, G::LeftArm),
        // right leg
        Bone::new(K::Neck, K::RHip, G::RightLeg),
        Bone::new(K::RHip, K::RKnee, G::RightLeg),
        Bone::new(K::RKnee, K::RAnkle, G::RightLeg),
        // left leg
        Bone::new(K::Neck, K::LHip, G::LeftLeg),
        Bone::new(K::LHip, K::LKnee, G::LeftLeg),
        Bone::new(K::LKnee, K::LAnkle, G::LeftLeg),
        // neck
        Bone::new(K::Neck, K::Nose, G::Head),
        // eyes and ears
        Bone::new(K::Nose, K::LEye, G::Face),
        Bone::new(K::LEye, K::LEar, G::Face),
        Bone::new(K::Nose, K::REye, G::Face),
        Bone::new(K::REye, K::REar, G::Face),
    ]
};

/// Number of [`SKELETON`] entries used by the 3D renderer.
pub const SKELETON_3D_LEN: usize = 13;

/// Bones drawn by the 2D renderer.
#[must_use]
pub fn skeleton_2d() -> &'static [Bone] {
    &SKELETON
}

/// Bones drawn by the 3D renderer (no eye/ear bones).
#[must_use]
pub fn skeleton_3d() -> &'static [Bone] {
    &SKELETON[..SKELETON_3D_LEN]
}
