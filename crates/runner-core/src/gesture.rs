//! Jump / crouch state machine over the hip-height signal.
//!
//! With `b = baseline.hip_y + baseline_adjust` (image y grows downward):
//!
//! | from     | to       | condition                          | emits              |
//! |----------|----------|------------------------------------|--------------------|
//! | standby  | jumping  | `hip < b - jump`, jump latch clear | nothing            |
//! | jumping  | standby  | `hip > b - jump / 2`               | `Jump`             |
//! | standby  | crouching| `hip > b + crouch`, latch clear    | `CrouchStart`      |
//! | crouching| standby  | `hip < b + crouch / 2`             | `CrouchEnd{scored}`|
//!
//! The return bands sit halfway back to the baseline so a signal hovering at a
//! trigger line cannot chatter. Latches are released `action_cooldown_ms`
//! after the motion returns to standby.

use crate::calibration::Baseline;
use crate::config::{GestureConfig, ThresholdConfig};

/// Discrete command handed to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionEvent {
    Jump,
    CrouchStart,
    /// `scored` is false when the crouch was released before the minimum hold.
    CrouchEnd { scored: bool },
    Restart,
}

impl ActionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ActionEvent::Jump => "jump",
            ActionEvent::CrouchStart => "crouch-start",
            ActionEvent::CrouchEnd { .. } => "crouch-end",
            ActionEvent::Restart => "restart",
        }
    }
}

/// Body motion while the session is active. Single-valued, so a jump and a
/// crouch can never overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Motion {
    #[default]
    Standby,
    Jumping,
    Crouching,
}

/// Re-trigger guard: engaged when an action starts, released at a deadline on
/// the tick clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Latch {
    engaged: bool,
    release_at_ms: Option<f64>,
}

impl Latch {
    pub fn engage(&mut self) {
        self.engaged = true;
        self.release_at_ms = None;
    }

    /// Schedule release `cooldown_ms` from `now_ms`. No effect when not engaged.
    pub fn release_after(&mut self, now_ms: f64, cooldown_ms: f64) {
        if self.engaged {
            self.release_at_ms = Some(now_ms + cooldown_ms);
        }
    }

    pub fn is_engaged(&self, now_ms: f64) -> bool {
        self.engaged && self.release_at_ms.map_or(true, |t| now_ms < t)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Band edges for one tick, precomputed from baseline and live thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bands {
    pub neutral: f32,
    pub jump_trigger: f32,
    pub jump_return: f32,
    pub crouch_trigger: f32,
    pub crouch_return: f32,
}

impl Bands {
    pub fn new(baseline: &Baseline, thresholds: &ThresholdConfig) -> Self {
        let neutral = baseline.hip_y + thresholds.baseline_adjust as f32;
        let jump = thresholds.jump_threshold as f32;
        let crouch = thresholds.crouch_threshold as f32;
        Self {
            neutral,
            jump_trigger: neutral - jump,
            jump_return: neutral - jump / 2.0,
            crouch_trigger: neutral + crouch,
            crouch_return: neutral + crouch / 2.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GestureMachine {
    motion: Motion,
    jump_latch: Latch,
    crouch_latch: Latch,
    jump_takeoff_ms: Option<f64>,
    crouch_start_ms: Option<f64>,
    action_cooldown_ms: f64,
    min_crouch_hold_ms: f64,
}

impl GestureMachine {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            motion: Motion::Standby,
            jump_latch: Latch::default(),
            crouch_latch: Latch::default(),
            jump_takeoff_ms: None,
            crouch_start_ms: None,
            action_cooldown_ms: config.action_cooldown_ms,
            min_crouch_hold_ms: config.min_crouch_hold_ms,
        }
    }

    /// Classify one valid hip sample. At most one event per call.
    pub fn step(
        &mut self,
        hip_y: f32,
        baseline: &Baseline,
        thresholds: &ThresholdConfig,
        now_ms: f64,
    ) -> Option<ActionEvent> {
        let bands = Bands::new(baseline, thresholds);
        let crouch = self.step_crouch(hip_y, &bands, now_ms);
        let jump = self.step_jump(hip_y, &bands, now_ms);
        crouch.or(jump)
    }

    fn step_crouch(&mut self, hip_y: f32, bands: &Bands, now_ms: f64) -> Option<ActionEvent> {
        match self.motion {
            Motion::Standby
                if hip_y > bands.crouch_trigger && !self.crouch_latch.is_engaged(now_ms) =>
            {
                self.motion = Motion::Crouching;
                self.crouch_start_ms = Some(now_ms);
                self.crouch_latch.engage();
                log::debug!("[gesture] crouch start hip={:.1} > {:.1}", hip_y, bands.crouch_trigger);
                Some(ActionEvent::CrouchStart)
            }
            Motion::Crouching if hip_y < bands.crouch_return => {
                let held_ms = self.crouch_start_ms.map_or(0.0, |t| now_ms - t);
                let scored = held_ms >= self.min_crouch_hold_ms;
                self.motion = Motion::Standby;
                self.crouch_start_ms = None;
                self.crouch_latch.release_after(now_ms, self.action_cooldown_ms);
                log::debug!("[gesture] crouch end held={:.0}ms scored={}", held_ms, scored);
                Some(ActionEvent::CrouchEnd { scored })
            }
            _ => None,
        }
    }

    fn step_jump(&mut self, hip_y: f32, bands: &Bands, now_ms: f64) -> Option<ActionEvent> {
        match self.motion {
            Motion::Standby
                if hip_y < bands.jump_trigger && !self.jump_latch.is_engaged(now_ms) =>
            {
                self.motion = Motion::Jumping;
                self.jump_takeoff_ms = Some(now_ms);
                self.jump_latch.engage();
                log::debug!("[gesture] takeoff hip={:.1} < {:.1}", hip_y, bands.jump_trigger);
                None
            }
            Motion::Jumping if hip_y > bands.jump_return => {
                let airtime_ms = self.jump_takeoff_ms.map_or(0.0, |t| now_ms - t);
                self.motion = Motion::Standby;
                self.jump_takeoff_ms = None;
                self.jump_latch.release_after(now_ms, self.action_cooldown_ms);
                log::debug!("[gesture] landed after {:.0}ms", airtime_ms);
                Some(ActionEvent::Jump)
            }
            _ => None,
        }
    }

    /// Leave any in-progress motion without scoring it. Returns the event the
    /// sink needs to stay balanced (an open crouch must be closed).
    pub fn abort(&mut self) -> Option<ActionEvent> {
        let was = self.motion;
        self.motion = Motion::Standby;
        self.jump_takeoff_ms = None;
        self.crouch_start_ms = None;
        (was == Motion::Crouching).then_some(ActionEvent::CrouchEnd { scored: false })
    }

    /// Drop both latches and any pending cooldowns.
    pub fn clear_latches(&mut self) {
        self.jump_latch.clear();
        self.crouch_latch.clear();
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_crouching(&self) -> bool {
        self.motion == Motion::Crouching
    }

    pub fn jump_latched(&self, now_ms: f64) -> bool {
        self.jump_latch.is_engaged(now_ms)
    }

    pub fn crouch_latched(&self, now_ms: f64) -> bool {
        self.crouch_latch.is_engaged(now_ms)
    }
}
