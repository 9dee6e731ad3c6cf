//! Hip-height signal extraction.
//!
//! Reduces a keypoint frame to the mean hip and knee heights plus the hip's
//! vertical velocity. Frames missing any of the four leg keypoints (or scoring
//! below the confidence gate) are rejected without touching the history.

use crate::keypoint::{Keypoint, KeypointKind, PoseFrame};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SignalError {
    #[error("keypoint {} not reported", .0.name())]
    MissingKeypoint(KeypointKind),
    #[error("keypoint {} scored {score:.2}, below {min:.2}", .kind.name())]
    LowConfidence {
        kind: KeypointKind,
        score: f32,
        min: f32,
    },
}

/// Look up `kind` and require `score >= min_confidence`.
pub fn confident_keypoint(
    frame: &PoseFrame,
    kind: KeypointKind,
    min_confidence: f32,
) -> Result<&Keypoint, SignalError> {
    let kp = frame
        .get(kind)
        .ok_or(SignalError::MissingKeypoint(kind))?;
    // NaN scores fail the gate too
    if !(kp.score >= min_confidence) {
        return Err(SignalError::LowConfidence {
            kind,
            score: kp.score,
            min: min_confidence,
        });
    }
    Ok(kp)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSample {
    pub hip_y: f32,
    pub knee_y: f32,
    pub timestamp_ms: f64,
}

/// Hip velocity in pixels per second; positive means moving down the image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocitySample {
    pub hip_y_velocity: f32,
}

/// Two-slot history of accepted samples.
#[derive(Clone, Debug)]
pub struct SignalExtractor {
    min_confidence: f32,
    previous: Option<PoseSample>,
    current: Option<PoseSample>,
    velocity: VelocitySample,
}

impl SignalExtractor {
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence,
            previous: None,
            current: None,
            velocity: VelocitySample::default(),
        }
    }

    pub fn update(
        &mut self,
        frame: &PoseFrame,
        timestamp_ms: f64,
    ) -> Result<(PoseSample, VelocitySample), SignalError> {
        let min = self.min_confidence;
        let left_hip = confident_keypoint(frame, KeypointKind::LeftHip, min)?;
        let right_hip = confident_keypoint(frame, KeypointKind::RightHip, min)?;
        let left_knee = confident_keypoint(frame, KeypointKind::LeftKnee, min)?;
        let right_knee = confident_keypoint(frame, KeypointKind::RightKnee, min)?;

        let sample = PoseSample {
            hip_y: (left_hip.position.y + right_hip.position.y) / 2.0,
            knee_y: (left_knee.position.y + right_knee.position.y) / 2.0,
            timestamp_ms,
        };
        let velocity = match self.current {
            Some(prev) if timestamp_ms - prev.timestamp_ms > 0.0 => {
                let dt_sec = (timestamp_ms - prev.timestamp_ms) / 1000.0;
                VelocitySample {
                    hip_y_velocity: ((sample.hip_y - prev.hip_y) as f64 / dt_sec) as f32,
                }
            }
            _ => VelocitySample::default(),
        };

        self.previous = self.current.replace(sample);
        self.velocity = velocity;
        Ok((sample, velocity))
    }

    pub fn current(&self) -> Option<PoseSample> {
        self.current
    }

    pub fn previous(&self) -> Option<PoseSample> {
        self.previous
    }

    pub fn velocity(&self) -> VelocitySample {
        self.velocity
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.current = None;
        self.velocity = VelocitySample::default();
    }
}
