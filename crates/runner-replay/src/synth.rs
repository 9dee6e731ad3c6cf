//! Synthetic pose traces for exercising thresholds without a recording.
//!
//! A script of [`Move`]s is rendered at a fixed frame rate into a standing
//! figure whose hips, torso and head shift together. Positional noise and
//! keypoint scores come from a seeded `StdRng` so traces are reproducible.

use crate::trace::{TraceKeypoint, TraceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runner_core::KeypointKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Move {
    Stand { ms: f64 },
    /// Hips rise by up to `height_px` along a half-sine arc.
    Jump { height_px: f32, ms: f64 },
    /// Hips drop by `depth_px` for the whole duration.
    Crouch { depth_px: f32, ms: f64 },
    /// Both wrists raised well above the shoulders.
    HandsUp { ms: f64 },
    /// Person out of frame: every keypoint scores near zero.
    Absent { ms: f64 },
}

impl Move {
    fn duration_ms(&self) -> f64 {
        match *self {
            Move::Stand { ms }
            | Move::Jump { ms, .. }
            | Move::Crouch { ms, .. }
            | Move::HandsUp { ms }
            | Move::Absent { ms } => ms,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SynthConfig {
    pub seed: u64,
    pub frame_ms: f64,
    pub noise_px: f32,
    /// Hip height of the standing figure in image pixels.
    pub standing_hip_y: f32,
    pub center_x: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_ms: 1000.0 / 30.0,
            noise_px: 1.5,
            standing_hip_y: 300.0,
            center_x: 320.0,
        }
    }
}

/// Warm-up long enough to calibrate, then one of each action.
pub fn default_script() -> Vec<Move> {
    vec![
        Move::Stand { ms: 1500.0 },
        Move::Jump {
            height_px: 80.0,
            ms: 400.0,
        },
        Move::Stand { ms: 600.0 },
        Move::Crouch {
            depth_px: 60.0,
            ms: 400.0,
        },
        Move::Stand { ms: 600.0 },
        Move::HandsUp { ms: 2500.0 },
        Move::Stand { ms: 600.0 },
    ]
}

pub fn generate(config: &SynthConfig, script: &[Move]) -> Vec<TraceRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::new();
    let mut t = 0.0;
    for mv in script {
        let frames = (mv.duration_ms() / config.frame_ms).round().max(1.0) as usize;
        for i in 0..frames {
            let phase = (i as f32 + 0.5) / frames as f32;
            let (offset, hands_up, present) = match *mv {
                Move::Stand { .. } => (0.0, false, true),
                Move::Jump { height_px, .. } => {
                    (-height_px * (std::f32::consts::PI * phase).sin(), false, true)
                }
                Move::Crouch { depth_px, .. } => (depth_px, false, true),
                Move::HandsUp { .. } => (0.0, true, true),
                Move::Absent { .. } => (0.0, false, false),
            };
            let keypoints = figure(config, offset, hands_up)
                .into_iter()
                .map(|(kind, x, y)| TraceKeypoint {
                    name: kind.name().to_string(),
                    x: x + jitter(&mut rng, config.noise_px),
                    y: y + jitter(&mut rng, config.noise_px),
                    score: if present {
                        rng.gen_range(0.7..0.95)
                    } else {
                        rng.gen_range(0.0..0.1)
                    },
                })
                .collect();
            records.push(TraceRecord { t, keypoints });
            t += config.frame_ms;
        }
    }
    records
}

/// Non-finite or non-positive noise means no jitter.
fn jitter(rng: &mut StdRng, noise_px: f32) -> f32 {
    if noise_px.is_finite() && noise_px > 0.0 {
        rng.gen_range(-noise_px..=noise_px)
    } else {
        0.0
    }
}

/// Keypoint positions for a figure whose hips sit `offset` px below standing.
/// Knees and ankles follow at a third of the offset.
fn figure(config: &SynthConfig, offset: f32, hands_up: bool) -> Vec<(KeypointKind, f32, f32)> {
    use KeypointKind::*;
    let cx = config.center_x;
    let hip = config.standing_hip_y + offset;
    let shoulder = hip - 120.0;
    let legs = config.standing_hip_y + offset / 3.0;
    let (elbow, wrist) = if hands_up {
        (shoulder - 50.0, shoulder - 100.0)
    } else {
        (hip - 60.0, hip - 10.0)
    };
    vec![
        (Nose, cx, hip - 200.0),
        (LeftEye, cx + 8.0, hip - 210.0),
        (RightEye, cx - 8.0, hip - 210.0),
        (LeftEar, cx + 16.0, hip - 205.0),
        (RightEar, cx - 16.0, hip - 205.0),
        (LeftShoulder, cx + 40.0, shoulder),
        (RightShoulder, cx - 40.0, shoulder),
        (LeftElbow, cx + 55.0, elbow),
        (RightElbow, cx - 55.0, elbow),
        (LeftWrist, cx + 60.0, wrist),
        (RightWrist, cx - 60.0, wrist),
        (LeftHip, cx + 25.0, hip),
        (RightHip, cx - 25.0, hip),
        (LeftKnee, cx + 28.0, legs + 100.0),
        (RightKnee, cx - 28.0, legs + 100.0),
        (LeftAnkle, cx + 30.0, legs + 190.0),
        (RightAnkle, cx - 30.0, legs + 190.0),
    ]
}
