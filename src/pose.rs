// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose estimation output: keypoints, heatmaps, and per-frame results.
//!
//! Every array in this module is indexed by [`KeypointId`]. The order is shared by the 2D
//! and 3D keypoint arrays, the heatmap channels and the skeleton tables in
//! [`crate::visualizer::skeleton`], so it must never be reordered.

use ndarray::{Array3, ArrayView2, s};
use serde::{Deserialize, Serialize};

/// Number of keypoint slots per pose (18 landmarks + the reserved center slot).
pub const KEYPOINT_SLOTS: usize = 19;

/// Number of anatomical landmarks (every slot except [`KeypointId::Center`]).
pub const LANDMARK_COUNT: usize = KEYPOINT_SLOTS - 1;

/// Maximum number of people drawn by the 3D path. Only the primary pose is used.
pub const MAX_3D_SUBJECTS: usize = 1;

/// Keypoint slot identifiers, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum KeypointId {
    Nose = 0,
    Neck = 1,
    RShoulder = 2,
    RElbow = 3,
    RWrist = 4,
    LShoulder = 5,
    LElbow = 6,
    LWrist = 7,
    RHip = 8,
    RKnee = 9,
    RAnkle = 10,
    LHip = 11,
    LKnee = 12,
    LAnkle = 13,
    LEye = 14,
    REye = 15,
    LEar = 16,
    REar = 17,
    /// Reserved slot; carries a heatmap channel but is never drawn.
    Center = 18,
}

impl KeypointId {
    /// All slots in index order.
    pub const ALL: [Self; KEYPOINT_SLOTS] = [
        Self::Nose,
        Self::Neck,
        Self::RShoulder,
        Self::RElbow,
        Self::RWrist,
        Self::LShoulder,
        Self::LElbow,
        Self::LWrist,
        Self::RHip,
        Self::RKnee,
        Self::RAnkle,
        Self::LHip,
        Self::LKnee,
        Self::LAnkle,
        Self::LEye,
        Self::REye,
        Self::LEar,
        Self::REar,
        Self::Center,
    ];

    /// Slot for an array index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Array index of this slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short display name, as shown in the heatmap label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::Neck => "Neck",
            Self::RShoulder => "RShoulder",
            Self::RElbow => "RElbow",
            Self::RWrist => "RWrist",
            Self::LShoulder => "LShoulder",
            Self::LElbow => "LElbow",
            Self::LWrist => "LWrist",
            Self::RHip => "RHip",
            Self::RKnee => "RKnee",
            Self::RAnkle => "RAnkle",
            Self::LHip => "LHip",
            Self::LKnee => "LKnee",
            Self::LAnkle => "LAnkle",
            Self::LEye => "LEye",
            Self::REye => "REye",
            Self::LEar => "LEar",
            Self::REar => "REar",
            Self::Center => "C",
        }
    }

    /// Whether this slot is an anatomical landmark (drawn by the renderers).
    #[must_use]
    pub const fn is_landmark(self) -> bool {
        !matches!(self, Self::Center)
    }
}

/// A 2D keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint2d {
    /// Normalized x in `[0, 1]`.
    pub x: f32,
    /// Normalized y in `[0, 1]`.
    pub y: f32,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl Keypoint2d {
    /// Create a new 2D keypoint.
    #[must_use]
    pub const fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }
}

/// A 3D keypoint in the estimator's body-relative normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint3d {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl Keypoint3d {
    /// Create a new 3D keypoint.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, score: f32) -> Self {
        Self { x, y, z, score }
    }
}

/// Per-cell, per-keypoint confidence map.
///
/// Shape is `(height, width, channels)`; element `[[y, x, k]]` is the confidence of
/// keypoint `k` at cell `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Raw confidence data.
    pub data: Array3<f32>,
}

impl Heatmap {
    /// Wrap raw `(height, width, channels)` data.
    #[must_use]
    pub const fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// An empty heatmap with no cells.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Array3::zeros((0, 0, KEYPOINT_SLOTS)),
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.data.shape()[2]
    }

    /// Check if the heatmap has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// A `(height, width)` view of one channel, or `None` if out of range.
    #[must_use]
    pub fn channel(&self, k: usize) -> Option<ArrayView2<'_, f32>> {
        (k < self.channels()).then(|| self.data.slice(s![.., .., k]))
    }
}

impl Default for Heatmap {
    fn default() -> Self {
        Self::empty()
    }
}

/// One detected person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// 2D keypoints, indexed by [`KeypointId`].
    pub keypoints: [Keypoint2d; KEYPOINT_SLOTS],
    /// 3D keypoints, indexed by [`KeypointId`].
    pub keypoints_3d: [Keypoint3d; KEYPOINT_SLOTS],
    /// Confidence heatmap for this person.
    #[serde(default)]
    pub heatmap: Heatmap,
}

impl Pose {
    /// Create a pose without a heatmap.
    #[must_use]
    pub fn new(
        keypoints: [Keypoint2d; KEYPOINT_SLOTS],
        keypoints_3d: [Keypoint3d; KEYPOINT_SLOTS],
    ) -> Self {
        Self {
            keypoints,
            keypoints_3d,
            heatmap: Heatmap::empty(),
        }
    }

    /// Attach a heatmap.
    #[must_use]
    pub fn with_heatmap(mut self, heatmap: Heatmap) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// The 2D keypoint in slot `id`.
    #[must_use]
    pub const fn get(&self, id: KeypointId) -> &Keypoint2d {
        &self.keypoints[id as usize]
    }

    /// The 3D keypoint in slot `id`.
    #[must_use]
    pub const fn get_3d(&self, id: KeypointId) -> &Keypoint3d {
        &self.keypoints_3d[id as usize]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(
            [Keypoint2d::default(); KEYPOINT_SLOTS],
            [Keypoint3d::default(); KEYPOINT_SLOTS],
        )
    }
}

/// Inference output for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseResult {
    /// Detected people, most confident first.
    pub poses: Vec<Pose>,
}

impl PoseResult {
    /// Create a result from a list of poses.
    #[must_use]
    pub const fn new(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// Number of detected people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Check if nobody was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// The pose used by the single-subject paths (3D scene, heatmap).
    #[must_use]
    pub fn primary(&self) -> Option<&Pose> {
        self.poses.first()
    }

    /// The poses the 3D path draws, at most [`MAX_3D_SUBJECTS`].
    #[must_use]
    pub fn subjects_3d(&self) -> &[Pose] {
        &self.poses[..self.poses.len().min(MAX_3D_SUBJECTS)]
    }
}
