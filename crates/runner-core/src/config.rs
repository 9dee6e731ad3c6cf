//! Tunable parameters for the gesture core.
//!
//! [`GestureConfig`] is fixed for the lifetime of a session. [`ThresholdConfig`]
//! is operator-tunable and is handed to every tick so live slider changes take
//! effect on the next frame.

use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("min_confidence must be within [0, 1], got {0}")]
    Confidence(f32),
    #[error("calibration_frames must be at least 1")]
    CalibrationFrames,
    #[error("{name} must be a non-negative duration, got {value} ms")]
    Duration { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Session-wide timing, gating and geometry parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    pub min_confidence: f32,
    pub calibration_frames: u32,
    pub action_cooldown_ms: f64,
    pub min_crouch_hold_ms: f64,
    pub gesture_hold_ms: f64,
    pub hands_up_margin_px: f32,
    pub wrist_symmetry_px: f32,
    pub countdown_secs: u32,
    pub countdown_step_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_confidence: MIN_CONFIDENCE,
            calibration_frames: CALIBRATION_FRAMES,
            action_cooldown_ms: ACTION_COOLDOWN_MS,
            min_crouch_hold_ms: MIN_CROUCH_HOLD_MS,
            gesture_hold_ms: GESTURE_HOLD_MS,
            hands_up_margin_px: HANDS_UP_MARGIN_PX,
            wrist_symmetry_px: WRIST_SYMMETRY_PX,
            countdown_secs: COUNTDOWN_SECS,
            countdown_step_ms: COUNTDOWN_STEP_MS,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Confidence(self.min_confidence));
        }
        if self.calibration_frames == 0 {
            return Err(ConfigError::CalibrationFrames);
        }
        for (name, value) in [
            ("action_cooldown_ms", self.action_cooldown_ms),
            ("min_crouch_hold_ms", self.min_crouch_hold_ms),
            ("gesture_hold_ms", self.gesture_hold_ms),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Duration { name, value });
            }
        }
        for (name, value) in [
            ("hands_up_margin_px", self.hands_up_margin_px as f64),
            ("wrist_symmetry_px", self.wrist_symmetry_px as f64),
            ("countdown_step_ms", self.countdown_step_ms),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// Operator offsets in whole pixels, read fresh each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub baseline_adjust: i32,
    pub jump_threshold: i32,
    pub crouch_threshold: i32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            baseline_adjust: DEFAULT_BASELINE_ADJUST,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            crouch_threshold: DEFAULT_CROUCH_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// Parse raw slider values; a field that does not parse keeps its default.
    pub fn from_inputs(baseline_adjust: &str, jump_threshold: &str, crouch_threshold: &str) -> Self {
        let d = Self::default();
        Self {
            baseline_adjust: parse_px(baseline_adjust).unwrap_or(d.baseline_adjust),
            jump_threshold: parse_px(jump_threshold).unwrap_or(d.jump_threshold),
            crouch_threshold: parse_px(crouch_threshold).unwrap_or(d.crouch_threshold),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jump_threshold <= 0 {
            return Err(ConfigError::NonPositive {
                name: "jump_threshold",
                value: self.jump_threshold as f64,
            });
        }
        if self.crouch_threshold <= 0 {
            return Err(ConfigError::NonPositive {
                name: "crouch_threshold",
                value: self.crouch_threshold as f64,
            });
        }
        Ok(())
    }
}

// Integer parse that tolerates a fractional slider value ("12.5" -> 12).
fn parse_px(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i32))
}
