//! Body keypoints as produced by the external pose source.
//!
//! A [`PoseFrame`] is the keypoint set of one video frame. It is immutable once
//! built; the signal extractor and the hands-up detector only read from it.

use crate::constants::{FLAT_STRIDE, KEYPOINT_COUNT};
use glam::Vec2;
use smallvec::SmallVec;
use thiserror::Error;

/// The 17 body parts reported by MoveNet, in the model's output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeypointKind {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl KeypointKind {
    pub const ALL: [KeypointKind; KEYPOINT_COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Position in the pose source's output array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical snake_case name used by the pose source.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

/// Bones drawn by the skeleton overlay.
pub const SKELETON_CONNECTIONS: [(KeypointKind, KeypointKind); 12] = [
    (KeypointKind::LeftShoulder, KeypointKind::RightShoulder),
    (KeypointKind::LeftShoulder, KeypointKind::LeftElbow),
    (KeypointKind::RightShoulder, KeypointKind::RightElbow),
    (KeypointKind::LeftElbow, KeypointKind::LeftWrist),
    (KeypointKind::RightElbow, KeypointKind::RightWrist),
    (KeypointKind::LeftShoulder, KeypointKind::LeftHip),
    (KeypointKind::RightShoulder, KeypointKind::RightHip),
    (KeypointKind::LeftHip, KeypointKind::RightHip),
    (KeypointKind::LeftHip, KeypointKind::LeftKnee),
    (KeypointKind::RightHip, KeypointKind::RightKnee),
    (KeypointKind::LeftKnee, KeypointKind::LeftAnkle),
    (KeypointKind::RightKnee, KeypointKind::RightAnkle),
];

/// A named 2D landmark in image pixels with a confidence score in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    pub kind: KeypointKind,
    pub position: Vec2,
    pub score: f32,
}

impl Keypoint {
    pub fn new(kind: KeypointKind, x: f32, y: f32, score: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(x, y),
            score,
        }
    }

    /// Build from the pose source's string name; unknown names yield `None`.
    pub fn named(name: &str, x: f32, y: f32, score: f32) -> Option<Self> {
        KeypointKind::from_name(name).map(|kind| Self::new(kind, x, y, score))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("flat keypoint buffer has {0} values, expected {expected}", expected = KEYPOINT_COUNT * FLAT_STRIDE)]
    Length(usize),
}

/// All keypoints reported for a single video frame.
#[derive(Clone, Debug, Default)]
pub struct PoseFrame {
    keypoints: SmallVec<[Keypoint; KEYPOINT_COUNT]>,
}

impl PoseFrame {
    pub fn new(keypoints: impl IntoIterator<Item = Keypoint>) -> Self {
        Self {
            keypoints: keypoints.into_iter().collect(),
        }
    }

    /// Decode the JS bridge layout: 17 `[x, y, score]` triples in MoveNet order.
    pub fn from_flat(data: &[f32]) -> Result<Self, FrameError> {
        if data.len() != KEYPOINT_COUNT * FLAT_STRIDE {
            return Err(FrameError::Length(data.len()));
        }
        let keypoints = KeypointKind::ALL
            .iter()
            .zip(data.chunks_exact(FLAT_STRIDE))
            .map(|(&kind, c)| Keypoint::new(kind, c[0], c[1], c[2]))
            .collect();
        Ok(Self { keypoints })
    }

    /// First keypoint of the given kind, if the source reported one.
    pub fn get(&self, kind: KeypointKind) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keypoint> {
        self.keypoints.iter()
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}
