// Host-side tests for the session controller: lifecycle, gating, sinks.

use runner_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ActionSink for Recorder {
    fn on_jump(&mut self) {
        self.calls.borrow_mut().push("jump");
    }
    fn on_crouch(&mut self, active: bool) {
        self.calls
            .borrow_mut()
            .push(if active { "crouch:on" } else { "crouch:off" });
    }
    fn on_restart(&mut self) {
        self.calls.borrow_mut().push("restart");
    }
}

#[derive(Clone, Default)]
struct StatusLog {
    shown: Rc<RefCell<Vec<Status>>>,
}

impl StatusSink for StatusLog {
    fn show(&mut self, status: &Status) {
        self.shown.borrow_mut().push(*status);
    }
}

fn frame(hip_y: f32, hands_up: bool) -> PoseFrame {
    let wrist_y = if hands_up { 100.0 } else { 260.0 };
    PoseFrame::new([
        Keypoint::new(KeypointKind::LeftShoulder, 100.0, 180.0, 0.9),
        Keypoint::new(KeypointKind::RightShoulder, 180.0, 180.0, 0.9),
        Keypoint::new(KeypointKind::LeftWrist, 90.0, wrist_y, 0.9),
        Keypoint::new(KeypointKind::RightWrist, 190.0, wrist_y, 0.9),
        Keypoint::new(KeypointKind::LeftHip, 110.0, hip_y, 0.9),
        Keypoint::new(KeypointKind::RightHip, 170.0, hip_y, 0.9),
        Keypoint::new(KeypointKind::LeftKnee, 110.0, hip_y + 100.0, 0.9),
        Keypoint::new(KeypointKind::RightKnee, 170.0, hip_y + 100.0, 0.9),
    ])
}

fn blurry_frame() -> PoseFrame {
    PoseFrame::new(
        frame(999.0, false)
            .iter()
            .map(|k| Keypoint { score: 0.1, ..*k }),
    )
}

// Feed a full calibration window; returns the clock after the last frame.
fn calibrate(session: &mut Session, hip_y: f32, t0: f64) -> f64 {
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    session.calibrate_now();
    let mut t = t0;
    for _ in 0..CALIBRATION_FRAMES {
        session.tick(&frame(hip_y, false), t, &th, &mut out);
        t += 33.0;
    }
    assert!(out.is_empty());
    t
}

fn recorded_session() -> (Session, Recorder, StatusLog) {
    let rec = Recorder::default();
    let log = StatusLog::default();
    let session = Session::default()
        .with_action_sink(rec.clone())
        .with_status_sink(log.clone());
    (session, rec, log)
}

#[test]
fn idle_session_ignores_frames() {
    let mut s = Session::default();
    let mut out = Vec::new();
    for i in 0..50 {
        s.tick(&frame(300.0, true), i as f64 * 33.0, &ThresholdConfig::default(), &mut out);
    }
    assert_eq!(s.mode(), SessionMode::Idle);
    assert_eq!(s.calibration_frames(), 0);
    assert_eq!(s.hold_state(), GestureHoldState::default());
    assert!(out.is_empty());
    assert!(!s.thresholds_locked());
}

#[test]
fn countdown_ticks_each_second_then_calibrates() {
    let (mut s, _rec, log) = recorded_session();
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    s.start(0.0);
    assert_eq!(s.mode(), SessionMode::Countdown);
    assert_eq!(s.countdown_remaining(), Some(5));
    assert!(s.thresholds_locked());

    s.tick(&frame(300.0, false), 500.0, &th, &mut out);
    assert_eq!(s.countdown_remaining(), Some(5));
    assert_eq!(s.calibration_frames(), 0);

    s.tick(&frame(300.0, false), 1000.0, &th, &mut out);
    assert_eq!(s.countdown_remaining(), Some(4));

    // a long stall catches up several steps at once
    s.advance_clock(4999.0);
    assert_eq!(s.countdown_remaining(), Some(1));

    s.tick(&frame(300.0, false), 5000.0, &th, &mut out);
    assert_eq!(s.mode(), SessionMode::Calibrating);
    assert_eq!(s.calibration_frames(), 1);

    assert_eq!(
        *log.shown.borrow(),
        vec![
            Status::Countdown(5),
            Status::Countdown(4),
            Status::Countdown(3),
            Status::Countdown(2),
            Status::Countdown(1),
            Status::Calibrating,
        ]
    );
}

#[test]
fn calibration_window_enters_standby_with_baseline() {
    let (mut s, _rec, log) = recorded_session();
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    s.calibrate_now();
    for i in 0..CALIBRATION_FRAMES - 1 {
        s.tick(&frame(300.0, false), i as f64 * 33.0, &th, &mut out);
    }
    assert_eq!(s.mode(), SessionMode::Calibrating);
    assert!(!s.is_calibrated());

    s.tick(&frame(300.0, false), 2000.0, &th, &mut out);
    assert_eq!(s.mode(), SessionMode::Standby);
    let b = s.baseline().unwrap();
    assert!((b.hip_y - 300.0).abs() < 1e-3);
    assert!((b.knee_y - 400.0).abs() < 1e-3);
    assert_eq!(log.shown.borrow().last(), Some(&Status::Go));
}

#[test]
fn invalid_frames_neither_count_nor_corrupt_calibration() {
    let mut s = Session::default();
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    s.calibrate_now();
    let mut t = 0.0;
    for _ in 0..CALIBRATION_FRAMES - 1 {
        s.tick(&frame(300.0, false), t, &th, &mut out);
        s.tick(&blurry_frame(), t + 10.0, &th, &mut out);
        t += 33.0;
    }
    assert_eq!(s.calibration_frames(), CALIBRATION_FRAMES - 1);
    s.tick(&frame(300.0, false), t, &th, &mut out);
    assert!((s.baseline().unwrap().hip_y - 300.0).abs() < 1e-3);
}

#[test]
fn recalibration_replaces_baseline_only_when_complete() {
    let mut s = Session::default();
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    let mut t = calibrate(&mut s, 300.0, 0.0);

    s.calibrate_now();
    for _ in 0..CALIBRATION_FRAMES - 1 {
        s.tick(&frame(250.0, false), t, &th, &mut out);
        t += 33.0;
    }
    assert_eq!(s.baseline().map(|b| b.hip_y), Some(300.0));
    s.tick(&frame(250.0, false), t, &th, &mut out);
    // no blending with the earlier baseline
    assert!((s.baseline().unwrap().hip_y - 250.0).abs() < 1e-3);
    assert_eq!(s.mode(), SessionMode::Standby);
}

#[test]
fn restart_during_recalibration_keeps_previous_baseline() {
    let mut s = Session::default();
    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    let mut t = calibrate(&mut s, 300.0, 0.0);
    s.calibrate_now();
    for _ in 0..10 {
        s.tick(&frame(200.0, false), t, &th, &mut out);
        t += 33.0;
    }
    s.restart();
    assert_eq!(s.mode(), SessionMode::Standby);
    assert_eq!(s.calibration_frames(), 0);
    assert_eq!(s.baseline().map(|b| b.hip_y), Some(300.0));
}

#[test]
fn restart_during_first_calibration_returns_to_idle() {
    let mut s = Session::default();
    let mut out = Vec::new();
    s.calibrate_now();
    s.tick(&frame(300.0, false), 0.0, &ThresholdConfig::default(), &mut out);
    s.restart();
    assert_eq!(s.mode(), SessionMode::Idle);
    assert!(!s.is_calibrated());
}

#[test]
fn jump_scenario_reaches_the_sink_once() {
    let (mut s, rec, _log) = recorded_session();
    let th = ThresholdConfig {
        baseline_adjust: 0,
        jump_threshold: 40,
        crouch_threshold: 30,
    };
    let mut t = calibrate(&mut s, 300.0, 0.0);
    let mut per_tick = Vec::new();
    for hip in [300.0, 300.0, 255.0, 300.0] {
        let mut out = Vec::new();
        s.tick(&frame(hip, false), t, &th, &mut out);
        per_tick.push((s.mode(), out));
        t += 33.0;
    }
    assert_eq!(per_tick[2].0, SessionMode::Jumping);
    assert!(per_tick[..3].iter().all(|(_, out)| out.is_empty()));
    assert_eq!(per_tick[3], (SessionMode::Standby, vec![ActionEvent::Jump]));
    assert_eq!(*rec.calls.borrow(), vec!["jump"]);
    assert_eq!(s.stats().jumps, 1);
}

#[test]
fn crouch_scenario_scores_and_balances_sink() {
    let (mut s, rec, log) = recorded_session();
    let th = ThresholdConfig {
        baseline_adjust: 0,
        jump_threshold: 40,
        crouch_threshold: 30,
    };
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut events = Vec::new();
    for (i, hip) in [300.0, 340.0, 340.0, 305.0].into_iter().enumerate() {
        s.tick(&frame(hip, false), t0 + i as f64 * 50.0, &th, &mut events);
        if i == 1 {
            assert_eq!(s.mode(), SessionMode::Crouching);
        }
    }
    assert_eq!(
        events,
        vec![ActionEvent::CrouchStart, ActionEvent::CrouchEnd { scored: true }]
    );
    assert_eq!(*rec.calls.borrow(), vec!["crouch:on", "crouch:off"]);
    assert_eq!(s.stats().crouches, 1);
    let shown = log.shown.borrow();
    assert!(shown.contains(&Status::Crouch));
    assert_eq!(shown.last(), Some(&Status::CrouchReleased));
}

#[test]
fn short_crouch_is_released_but_not_counted() {
    let (mut s, rec, _log) = recorded_session();
    let th = ThresholdConfig::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    s.tick(&frame(340.0, false), t0, &th, &mut out);
    s.tick(&frame(300.0, false), t0 + 50.0, &th, &mut out);
    assert_eq!(out.last(), Some(&ActionEvent::CrouchEnd { scored: false }));
    assert_eq!(*rec.calls.borrow(), vec!["crouch:on", "crouch:off"]);
    assert_eq!(s.stats().crouches, 0);
}

#[test]
fn restart_closes_open_crouch_and_keeps_baseline() {
    let (mut s, rec, _log) = recorded_session();
    let th = ThresholdConfig::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    s.tick(&frame(300.0, false), t0, &th, &mut out);
    s.tick(&frame(255.0, false), t0 + 33.0, &th, &mut out);
    s.tick(&frame(300.0, false), t0 + 66.0, &th, &mut out);
    s.tick(&frame(345.0, false), t0 + 99.0, &th, &mut out);
    assert_eq!(s.mode(), SessionMode::Crouching);
    assert_eq!(s.stats().jumps, 1);

    s.restart();
    assert_eq!(*rec.calls.borrow(), vec!["jump", "crouch:on", "crouch:off"]);
    assert_eq!(s.mode(), SessionMode::Standby);
    assert_eq!(s.stats(), ActionStats::default());
    assert!(s.is_calibrated());
    assert!(!s.jump_latched(t0 + 100.0));
    assert!(!s.crouch_latched(t0 + 100.0));

    // latches are gone, so a jump can start on the very next frame
    s.tick(&frame(250.0, false), t0 + 110.0, &th, &mut out);
    assert_eq!(s.mode(), SessionMode::Jumping);
}

#[test]
fn calibrate_now_closes_open_crouch() {
    let (mut s, rec, _log) = recorded_session();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    s.tick(&frame(345.0, false), t0, &ThresholdConfig::default(), &mut out);
    s.calibrate_now();
    assert_eq!(s.mode(), SessionMode::Calibrating);
    assert_eq!(*rec.calls.borrow(), vec!["crouch:on", "crouch:off"]);
}

#[test]
fn thresholds_are_read_fresh_every_tick() {
    let mut s = Session::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    let strict = ThresholdConfig {
        jump_threshold: 50,
        ..ThresholdConfig::default()
    };
    s.tick(&frame(255.0, false), t0, &strict, &mut out);
    assert_eq!(s.mode(), SessionMode::Standby);
    s.tick(&frame(255.0, false), t0 + 33.0, &ThresholdConfig::default(), &mut out);
    assert_eq!(s.mode(), SessionMode::Jumping);
}

#[test]
fn hands_up_hold_fires_restart_through_sink() {
    let (mut s, rec, log) = recorded_session();
    let th = ThresholdConfig::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    let mut t = t0;
    while t <= t0 + 2100.0 {
        s.tick(&frame(300.0, true), t, &th, &mut out);
        t += 50.0;
    }
    assert_eq!(out, vec![ActionEvent::Restart]);
    assert_eq!(*rec.calls.borrow(), vec!["restart"]);
    let shown = log.shown.borrow();
    assert!(shown.contains(&Status::HoldToRestart { remaining_secs: 2 }));
    assert!(shown.contains(&Status::HoldToRestart { remaining_secs: 1 }));
    assert!(shown.contains(&Status::Restart));
}

#[test]
fn hands_up_is_ignored_while_calibrating() {
    let mut s = Session::default();
    let mut out = Vec::new();
    s.calibrate_now();
    for i in 0..10 {
        s.tick(&frame(300.0, true), i as f64 * 500.0, &ThresholdConfig::default(), &mut out);
    }
    assert!(out.is_empty());
    assert!(!s.hold_state().is_gesturing);
}

#[test]
fn hands_up_works_without_leg_keypoints() {
    let mut s = Session::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let arms_only = PoseFrame::new(
        frame(300.0, true)
            .iter()
            .filter(|k| {
                !matches!(k.kind, KeypointKind::LeftKnee | KeypointKind::RightKnee)
            })
            .copied(),
    );
    let mut out = Vec::new();
    s.tick(&arms_only, t0, &ThresholdConfig::default(), &mut out);
    s.tick(&arms_only, t0 + 2000.0, &ThresholdConfig::default(), &mut out);
    assert_eq!(out, vec![ActionEvent::Restart]);
}

#[test]
fn start_after_stop_reuses_baseline() {
    let (mut s, _rec, log) = recorded_session();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    s.stop();
    assert_eq!(s.mode(), SessionMode::Idle);
    assert!(!s.thresholds_locked());
    assert_eq!(s.snapshot().current, None, "stop clears the signal history");
    let mut out = Vec::new();
    s.tick(&frame(250.0, false), t0, &ThresholdConfig::default(), &mut out);
    assert_eq!(s.mode(), SessionMode::Idle);

    s.start(t0 + 10.0);
    assert_eq!(s.mode(), SessionMode::Standby);
    assert_eq!(log.shown.borrow().last(), Some(&Status::Go));
}

#[test]
fn sliders_lock_on_start_and_unlock_on_restart() {
    let mut s = Session::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    assert!(!s.thresholds_locked(), "calibrate_now alone leaves sliders editable");

    s.start(t0);
    assert!(s.thresholds_locked());
    s.restart();
    assert_eq!(s.mode(), SessionMode::Standby);
    assert!(!s.thresholds_locked());
}

#[test]
fn restart_during_countdown_unlocks_and_returns_to_idle() {
    let mut s = Session::default();
    s.start(0.0);
    assert_eq!(s.mode(), SessionMode::Countdown);
    s.restart();
    assert_eq!(s.mode(), SessionMode::Idle);
    assert_eq!(s.countdown_remaining(), None);
    assert!(!s.thresholds_locked());
}

#[test]
fn restart_after_stop_stays_idle() {
    let (mut s, rec, _log) = recorded_session();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    s.stop();
    s.restart();
    assert_eq!(s.mode(), SessionMode::Idle);
    assert!(s.is_calibrated());

    let th = ThresholdConfig::default();
    let mut out = Vec::new();
    for (i, hip) in [300.0, 250.0, 300.0].into_iter().enumerate() {
        s.tick(&frame(hip, false), t0 + i as f64 * 50.0, &th, &mut out);
    }
    assert!(out.is_empty());
    assert!(rec.calls.borrow().is_empty());
    assert_eq!(s.mode(), SessionMode::Idle);
}

#[test]
fn broken_hands_up_hold_keeps_crouch_message() {
    let (mut s, _rec, log) = recorded_session();
    let th = ThresholdConfig::default();
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    s.tick(&frame(340.0, true), t0, &th, &mut out);
    assert_eq!(out, vec![ActionEvent::CrouchStart]);
    s.tick(&frame(340.0, false), t0 + 50.0, &th, &mut out);
    assert_eq!(s.mode(), SessionMode::Crouching);
    let shown = log.shown.borrow();
    assert!(shown.contains(&Status::HoldToRestart { remaining_secs: 2 }));
    assert_eq!(shown.last(), Some(&Status::Crouch));
}

#[test]
fn snapshot_exposes_bands_only_when_active() {
    let mut s = Session::default();
    assert_eq!(s.snapshot().bands, None);
    let t0 = calibrate(&mut s, 300.0, 0.0);
    let mut out = Vec::new();
    s.tick(&frame(290.0, false), t0, &ThresholdConfig::default(), &mut out);
    let snap = s.snapshot();
    assert_eq!(snap.mode, SessionMode::Standby);
    let bands = snap.bands.unwrap();
    assert_eq!(bands.jump_trigger, 260.0);
    assert_eq!(bands.crouch_trigger, 330.0);
    assert_eq!(snap.current.map(|c| c.hip_y), Some(290.0));
    assert_eq!(snap.calibration_progress, 1.0);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = GestureConfig {
        min_confidence: 1.5,
        ..GestureConfig::default()
    };
    assert!(matches!(Session::new(cfg), Err(ConfigError::Confidence(_))));
    let cfg = GestureConfig {
        calibration_frames: 0,
        ..GestureConfig::default()
    };
    assert_eq!(cfg.validate(), Err(ConfigError::CalibrationFrames));
    assert!(Session::new(GestureConfig::default()).is_ok());
}
