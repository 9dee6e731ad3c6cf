//! Session lifecycle and the per-frame entry point.
//!
//! A [`Session`] owns every piece of mutable gesture state: mode, baseline,
//! latches, hold timer and round stats. Front-ends call [`Session::tick`] once
//! per video frame and the operator controls (`start`, `calibrate_now`,
//! `restart`, `stop`) between frames. All timing is driven by the timestamps
//! passed in, so tests can use a synthetic clock.

use crate::calibration::{Baseline, Calibrator};
use crate::config::{ConfigError, GestureConfig, ThresholdConfig};
use crate::gesture::{ActionEvent, Bands, GestureMachine, Motion};
use crate::hands_up::{GestureHoldState, HandsUpDetector, HoldProgress};
use crate::keypoint::PoseFrame;
use crate::signal::{PoseSample, SignalExtractor, VelocitySample};

/// Receiver of gesture commands (the game).
///
/// Every `on_crouch(true)` is followed by `on_crouch(false)` before the next
/// `on_crouch(true)`.
pub trait ActionSink {
    fn on_jump(&mut self);
    fn on_crouch(&mut self, active: bool);
    fn on_restart(&mut self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopActionSink;

impl ActionSink for NoopActionSink {
    fn on_jump(&mut self) {}
    fn on_crouch(&mut self, _active: bool) {}
    fn on_restart(&mut self) {}
}

/// Operator-facing status line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Status {
    Idle,
    Countdown(u32),
    Calibrating,
    Go,
    Jump,
    Crouch,
    CrouchReleased,
    HoldToRestart { remaining_secs: u32 },
    Restart,
    Cleared,
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Idle => "Press Start".to_string(),
            Status::Countdown(n) => format!("Get ready: {n}"),
            Status::Calibrating => "Calibrating...".to_string(),
            Status::Go => "GO!".to_string(),
            Status::Jump => "JUMP!".to_string(),
            Status::Crouch => "CROUCH!".to_string(),
            Status::HoldToRestart { remaining_secs } => {
                format!("Hold to restart: {remaining_secs}")
            }
            Status::Restart => "RESTART!".to_string(),
            Status::CrouchReleased | Status::Cleared => String::new(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Go => "#FF9800",
            Status::Jump => "#4CAF50",
            Status::Crouch => "#9C27B0",
            Status::HoldToRestart { .. } => "#2196F3",
            Status::Restart => "#F44336",
            _ => "black",
        }
    }

    /// Persistent messages stay until replaced; others fade out.
    pub fn persists(&self) -> bool {
        matches!(
            self,
            Status::Idle
                | Status::Countdown(_)
                | Status::Calibrating
                | Status::Crouch
                | Status::HoldToRestart { .. }
        )
    }
}

pub trait StatusSink {
    fn show(&mut self, status: &Status);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn show(&mut self, _status: &Status) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Countdown,
    Calibrating,
    Standby,
    Jumping,
    Crouching,
}

impl SessionMode {
    pub fn name(&self) -> &'static str {
        match self {
            SessionMode::Idle => "idle",
            SessionMode::Countdown => "countdown",
            SessionMode::Calibrating => "calibrating",
            SessionMode::Standby => "standby",
            SessionMode::Jumping => "jumping",
            SessionMode::Crouching => "crouching",
        }
    }

    /// Calibrated and reacting to motion.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionMode::Standby | SessionMode::Jumping | SessionMode::Crouching
        )
    }
}

/// Per-round counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionStats {
    pub jumps: u32,
    /// Only crouches held for the minimum duration.
    pub crouches: u32,
    pub last_action_ms: Option<f64>,
}

/// Read-only view for overlays and debug panels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugSnapshot {
    pub mode: SessionMode,
    pub baseline: Option<Baseline>,
    pub current: Option<PoseSample>,
    pub velocity: VelocitySample,
    pub bands: Option<Bands>,
    pub calibration_progress: f32,
    pub stats: ActionStats,
    pub hold: GestureHoldState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Countdown { remaining: u32, next_step_ms: f64 },
    Calibrating,
    Active,
}

pub struct Session {
    config: GestureConfig,
    phase: Phase,
    extractor: SignalExtractor,
    calibrator: Calibrator,
    baseline: Option<Baseline>,
    gestures: GestureMachine,
    hands_up: HandsUpDetector,
    stats: ActionStats,
    last_thresholds: ThresholdConfig,
    sliders_locked: bool,
    hold_shown_secs: Option<u32>,
    actions: Box<dyn ActionSink>,
    status: Box<dyn StatusSink>,
}

impl Default for Session {
    fn default() -> Self {
        Self::build(GestureConfig::default())
    }
}

impl Session {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GestureConfig) -> Self {
        Self {
            phase: Phase::Idle,
            extractor: SignalExtractor::new(config.min_confidence),
            calibrator: Calibrator::new(config.calibration_frames),
            baseline: None,
            gestures: GestureMachine::new(&config),
            hands_up: HandsUpDetector::new(&config),
            stats: ActionStats::default(),
            last_thresholds: ThresholdConfig::default(),
            sliders_locked: false,
            hold_shown_secs: None,
            actions: Box::new(NoopActionSink),
            status: Box::new(NoopStatusSink),
            config,
        }
    }

    pub fn with_action_sink(mut self, sink: impl ActionSink + 'static) -> Self {
        self.actions = Box::new(sink);
        self
    }

    pub fn with_status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.status = Box::new(sink);
        self
    }

    // ---------------- operator controls ----------------

    /// Begin a round: straight to standby when a baseline exists, otherwise a
    /// countdown followed by calibration.
    pub fn start(&mut self, now_ms: f64) {
        self.sliders_locked = true;
        if self.baseline.is_some() {
            self.phase = Phase::Active;
            log::info!("[session] start, reusing baseline");
            self.show(Status::Go);
            return;
        }
        let remaining = self.config.countdown_secs;
        if remaining == 0 {
            self.enter_calibration();
            return;
        }
        self.phase = Phase::Countdown {
            remaining,
            next_step_ms: now_ms + self.config.countdown_step_ms,
        };
        log::info!("[session] countdown {}s", remaining);
        self.show(Status::Countdown(remaining));
    }

    /// Re-enter calibration immediately, skipping the countdown.
    pub fn calibrate_now(&mut self) {
        self.close_motion();
        self.enter_calibration();
    }

    /// Clear round state (latches, cooldowns, hold timer, stats) but keep the
    /// learned baseline. A countdown or calibration in progress is abandoned;
    /// an idle session stays idle. Unlocks the threshold sliders.
    pub fn restart(&mut self) {
        self.close_motion();
        self.sliders_locked = false;
        self.gestures.clear_latches();
        self.hands_up.reset();
        self.hold_shown_secs = None;
        self.stats = ActionStats::default();
        let phase = self.phase;
        self.phase = match phase {
            Phase::Active => Phase::Active,
            Phase::Calibrating => {
                log::info!(
                    "[calib] abandoned at {}/{} frames",
                    self.calibrator.frames(),
                    self.calibrator.required()
                );
                self.calibrator.reset();
                self.settled_phase()
            }
            Phase::Countdown { .. } => self.settled_phase(),
            Phase::Idle => Phase::Idle,
        };
        log::info!("[session] restart, mode={}", self.mode().name());
        self.show(Status::Cleared);
    }

    /// Return to idle; frames are ignored until the next `start`.
    pub fn stop(&mut self) {
        self.close_motion();
        self.gestures.clear_latches();
        self.hands_up.reset();
        self.hold_shown_secs = None;
        if self.phase == Phase::Calibrating {
            self.calibrator.reset();
        }
        self.extractor.reset();
        self.sliders_locked = false;
        self.phase = Phase::Idle;
        log::info!("[session] stopped");
        self.show(Status::Idle);
    }

    /// Advance the countdown to `now_ms`. Called by `tick`; front-ends may also
    /// call it on frames without a pose.
    pub fn advance_clock(&mut self, now_ms: f64) {
        while let Phase::Countdown {
            remaining,
            next_step_ms,
        } = self.phase
        {
            if now_ms < next_step_ms {
                break;
            }
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                self.enter_calibration();
                break;
            }
            self.phase = Phase::Countdown {
                remaining,
                next_step_ms: next_step_ms + self.config.countdown_step_ms,
            };
            self.show(Status::Countdown(remaining));
        }
    }

    // ---------------- per-frame ----------------

    /// Process one pose frame. Emitted actions go to the action sink and are
    /// appended to `out_events`.
    pub fn tick(
        &mut self,
        frame: &PoseFrame,
        now_ms: f64,
        thresholds: &ThresholdConfig,
        out_events: &mut Vec<ActionEvent>,
    ) {
        self.advance_clock(now_ms);
        self.last_thresholds = *thresholds;
        match self.phase {
            Phase::Idle | Phase::Countdown { .. } => return,
            Phase::Active => self.track_hands_up(frame, now_ms, out_events),
            Phase::Calibrating => {}
        }

        let sample = match self.extractor.update(frame, now_ms) {
            Ok((sample, _velocity)) => sample,
            Err(e) => {
                log::trace!("[pose] frame skipped: {}", e);
                return;
            }
        };

        match self.phase {
            Phase::Calibrating => {
                if let Some(baseline) = self.calibrator.add_sample(&sample) {
                    self.finish_calibration(baseline);
                }
            }
            Phase::Active => {
                // Checked above; the baseline exists whenever the phase is active.
                let Some(baseline) = self.baseline else {
                    return;
                };
                if let Some(ev) = self.gestures.step(sample.hip_y, &baseline, thresholds, now_ms) {
                    self.record(ev, now_ms);
                    self.emit(ev, out_events);
                }
            }
            Phase::Idle | Phase::Countdown { .. } => {}
        }
    }

    fn track_hands_up(&mut self, frame: &PoseFrame, now_ms: f64, out_events: &mut Vec<ActionEvent>) {
        match self.hands_up.update(frame, now_ms) {
            HoldProgress::None => {
                // an active crouch owns the status line
                if self.hold_shown_secs.take().is_some() && !self.gestures.is_crouching() {
                    self.show(Status::Cleared);
                }
            }
            HoldProgress::Started => {
                let secs = (self.config.gesture_hold_ms / 1000.0).ceil() as u32;
                self.hold_shown_secs = Some(secs);
                self.show(Status::HoldToRestart {
                    remaining_secs: secs,
                });
            }
            HoldProgress::Holding { remaining_ms, .. } => {
                let secs = (remaining_ms / 1000.0).ceil() as u32;
                if self.hold_shown_secs != Some(secs) {
                    self.hold_shown_secs = Some(secs);
                    self.show(Status::HoldToRestart {
                        remaining_secs: secs,
                    });
                }
            }
            HoldProgress::Fired => {
                self.hold_shown_secs = None;
                self.stats.last_action_ms = Some(now_ms);
                self.emit(ActionEvent::Restart, out_events);
            }
        }
    }

    fn enter_calibration(&mut self) {
        self.calibrator.reset();
        self.phase = Phase::Calibrating;
        log::info!("[calib] collecting {} frames", self.calibrator.required());
        self.show(Status::Calibrating);
    }

    fn finish_calibration(&mut self, baseline: Baseline) {
        self.baseline = Some(baseline);
        self.gestures.clear_latches();
        self.phase = Phase::Active;
        log::info!(
            "[calib] baseline hip={:.1} knee={:.1}",
            baseline.hip_y,
            baseline.knee_y
        );
        self.show(Status::Go);
    }

    // Where a cancelled countdown/calibration lands.
    fn settled_phase(&self) -> Phase {
        if self.baseline.is_some() {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    fn close_motion(&mut self) {
        if let Some(ev) = self.gestures.abort() {
            let mut discard = Vec::new();
            self.emit(ev, &mut discard);
        }
    }

    fn record(&mut self, ev: ActionEvent, now_ms: f64) {
        match ev {
            ActionEvent::Jump => {
                self.stats.jumps += 1;
                self.stats.last_action_ms = Some(now_ms);
            }
            ActionEvent::CrouchEnd { scored: true } => {
                self.stats.crouches += 1;
                self.stats.last_action_ms = Some(now_ms);
            }
            _ => {}
        }
    }

    fn emit(&mut self, ev: ActionEvent, out_events: &mut Vec<ActionEvent>) {
        log::debug!("[session] action {}", ev.name());
        match ev {
            ActionEvent::Jump => {
                self.actions.on_jump();
                self.show(Status::Jump);
            }
            ActionEvent::CrouchStart => {
                self.actions.on_crouch(true);
                self.show(Status::Crouch);
            }
            ActionEvent::CrouchEnd { .. } => {
                self.actions.on_crouch(false);
                self.show(Status::CrouchReleased);
            }
            ActionEvent::Restart => {
                self.actions.on_restart();
                self.show(Status::Restart);
            }
        }
        out_events.push(ev);
    }

    fn show(&mut self, status: Status) {
        self.status.show(&status);
    }

    // ---------------- queries ----------------

    pub fn mode(&self) -> SessionMode {
        match self.phase {
            Phase::Idle => SessionMode::Idle,
            Phase::Countdown { .. } => SessionMode::Countdown,
            Phase::Calibrating => SessionMode::Calibrating,
            Phase::Active => match self.gestures.motion() {
                Motion::Standby => SessionMode::Standby,
                Motion::Jumping => SessionMode::Jumping,
                Motion::Crouching => SessionMode::Crouching,
            },
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        match self.phase {
            Phase::Countdown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    pub fn calibration_frames(&self) -> u32 {
        self.calibrator.frames()
    }

    pub fn stats(&self) -> ActionStats {
        self.stats
    }

    pub fn hold_state(&self) -> GestureHoldState {
        self.hands_up.state()
    }

    pub fn jump_latched(&self, now_ms: f64) -> bool {
        self.gestures.jump_latched(now_ms)
    }

    pub fn crouch_latched(&self, now_ms: f64) -> bool {
        self.gestures.crouch_latched(now_ms)
    }

    /// Threshold sliders are locked from `start` until `restart` or `stop`.
    /// Calibrating through `calibrate_now` alone leaves them editable.
    pub fn thresholds_locked(&self) -> bool {
        self.sliders_locked
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        let mode = self.mode();
        DebugSnapshot {
            mode,
            baseline: self.baseline,
            current: self.extractor.current(),
            velocity: self.extractor.velocity(),
            bands: self
                .baseline
                .filter(|_| mode.is_active())
                .map(|b| Bands::new(&b, &self.last_thresholds)),
            calibration_progress: self.calibrator.progress(),
            stats: self.stats,
            hold: self.hands_up.state(),
        }
    }
}
