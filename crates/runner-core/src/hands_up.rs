//! Sustained "both hands up" pose that requests a restart.
//!
//! Runs beside the jump/crouch machine and only looks at shoulders and wrists.
//! An interrupted hold starts again from zero; hold time is never accumulated
//! across breaks.

use crate::config::GestureConfig;
use crate::gesture::Latch;
use crate::keypoint::{KeypointKind, PoseFrame};
use crate::signal::confident_keypoint;

/// Timing state of the hold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureHoldState {
    pub is_gesturing: bool,
    pub gesture_start_ms: Option<f64>,
    pub has_gestured: bool,
}

/// What a frame did to the hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldProgress {
    /// Pose absent, broken or not confidently visible.
    None,
    /// First qualifying frame; the timer just started.
    Started,
    Holding { elapsed_ms: f64, remaining_ms: f64 },
    /// The hold completed and a restart should fire.
    Fired,
}

#[derive(Clone, Debug)]
pub struct HandsUpDetector {
    state: GestureHoldState,
    latch: Latch,
    min_confidence: f32,
    margin_px: f32,
    symmetry_px: f32,
    hold_ms: f64,
    cooldown_ms: f64,
}

impl HandsUpDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            state: GestureHoldState::default(),
            latch: Latch::default(),
            min_confidence: config.min_confidence,
            margin_px: config.hands_up_margin_px,
            symmetry_px: config.wrist_symmetry_px,
            hold_ms: config.gesture_hold_ms,
            cooldown_ms: config.action_cooldown_ms,
        }
    }

    pub fn update(&mut self, frame: &PoseFrame, now_ms: f64) -> HoldProgress {
        self.state.has_gestured = self.latch.is_engaged(now_ms);
        if !self.qualifies(frame) {
            self.reset_timing();
            return HoldProgress::None;
        }
        let Some(start) = self.state.gesture_start_ms else {
            self.state.is_gesturing = true;
            self.state.gesture_start_ms = Some(now_ms);
            log::debug!("[gesture] hands up, holding");
            return HoldProgress::Started;
        };
        let elapsed_ms = now_ms - start;
        if elapsed_ms >= self.hold_ms && !self.state.has_gestured {
            self.latch.engage();
            self.latch.release_after(now_ms, self.cooldown_ms);
            self.state.has_gestured = true;
            self.reset_timing();
            log::info!("[gesture] hands-up held {:.0}ms, restart", elapsed_ms);
            return HoldProgress::Fired;
        }
        HoldProgress::Holding {
            elapsed_ms,
            remaining_ms: (self.hold_ms - elapsed_ms).max(0.0),
        }
    }

    /// Both wrists well above their shoulders and level with each other.
    fn qualifies(&self, frame: &PoseFrame) -> bool {
        let min = self.min_confidence;
        let joints = (
            confident_keypoint(frame, KeypointKind::LeftShoulder, min),
            confident_keypoint(frame, KeypointKind::RightShoulder, min),
            confident_keypoint(frame, KeypointKind::LeftWrist, min),
            confident_keypoint(frame, KeypointKind::RightWrist, min),
        );
        let (Ok(ls), Ok(rs), Ok(lw), Ok(rw)) = joints else {
            return false;
        };
        let left_up = ls.position.y - lw.position.y >= self.margin_px;
        let right_up = rs.position.y - rw.position.y >= self.margin_px;
        let level = (lw.position.y - rw.position.y).abs() <= self.symmetry_px;
        left_up && right_up && level
    }

    fn reset_timing(&mut self) {
        self.state.is_gesturing = false;
        self.state.gesture_start_ms = None;
    }

    /// Forget the hold and the restart latch.
    pub fn reset(&mut self) {
        self.state = GestureHoldState::default();
        self.latch.clear();
    }

    pub fn state(&self) -> GestureHoldState {
        self.state
    }
}
