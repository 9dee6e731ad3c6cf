//! Geometry for the operator overlay: visible skeleton segments and the
//! horizontal threshold lines. Drawing itself lives in the front-ends.

use crate::gesture::Bands;
use crate::keypoint::{PoseFrame, SKELETON_CONNECTIONS};
use glam::Vec2;

/// Bones whose two endpoints both score above `min_confidence`.
pub fn visible_bones(frame: &PoseFrame, min_confidence: f32) -> Vec<(Vec2, Vec2)> {
    SKELETON_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| {
            let pa = frame.get(a).filter(|k| k.score > min_confidence)?;
            let pb = frame.get(b).filter(|k| k.score > min_confidence)?;
            Some((pa.position, pb.position))
        })
        .collect()
}

/// Joint centres scoring above `min_confidence`.
pub fn visible_joints(frame: &PoseFrame, min_confidence: f32) -> Vec<Vec2> {
    frame
        .iter()
        .filter(|k| k.score > min_confidence)
        .map(|k| k.position)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLine {
    pub y: f32,
    pub color: &'static str,
    pub label: &'static str,
}

/// Jump-trigger, neutral and crouch-trigger lines, top to bottom.
pub fn threshold_lines(bands: &Bands) -> [GuideLine; 3] {
    [
        GuideLine {
            y: bands.jump_trigger,
            color: "green",
            label: "jump",
        },
        GuideLine {
            y: bands.neutral,
            color: "blue",
            label: "baseline",
        },
        GuideLine {
            y: bands.crouch_trigger,
            color: "purple",
            label: "crouch",
        },
    ]
}
