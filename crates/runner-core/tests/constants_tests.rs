// Host-side tests for tuning constants and their relationships.

use runner_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Confidence is a probability
    assert!(MIN_CONFIDENCE > 0.0 && MIN_CONFIDENCE < 1.0);

    // Durations should be positive
    assert!(ACTION_COOLDOWN_MS > 0.0);
    assert!(MIN_CROUCH_HOLD_MS > 0.0);
    assert!(GESTURE_HOLD_MS > 0.0);
    assert!(COUNTDOWN_STEP_MS > 0.0);
    assert!(STATUS_FADE_MS > 0.0);

    assert!(CALIBRATION_FRAMES > 0);
    assert!(COUNTDOWN_SECS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    // A crouch must be scorable before its latch would release again
    assert!(MIN_CROUCH_HOLD_MS < ACTION_COOLDOWN_MS);

    // The restart hold is deliberate, far longer than any debounce
    assert!(GESTURE_HOLD_MS > ACTION_COOLDOWN_MS * 2.0);

    // Default bands leave room for a half-band return on each side
    assert!(DEFAULT_JUMP_THRESHOLD > 0 && DEFAULT_CROUCH_THRESHOLD > 0);
    assert!(ThresholdConfig::default().validate().is_ok());

    assert_eq!(KEYPOINT_COUNT, KeypointKind::ALL.len());
}

#[test]
fn default_config_mirrors_constants() {
    let cfg = GestureConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.calibration_frames, CALIBRATION_FRAMES);
    assert_eq!(cfg.action_cooldown_ms, ACTION_COOLDOWN_MS);
    assert_eq!(cfg.gesture_hold_ms, GESTURE_HOLD_MS);
    assert_eq!(cfg.min_confidence, MIN_CONFIDENCE);
}

#[test]
fn threshold_inputs_fall_back_per_field() {
    let th = ThresholdConfig::from_inputs("-15", "oops", " 25 ");
    assert_eq!(th.baseline_adjust, -15);
    assert_eq!(th.jump_threshold, DEFAULT_JUMP_THRESHOLD);
    assert_eq!(th.crouch_threshold, 25);

    let th = ThresholdConfig::from_inputs("12.7", "", "NaN");
    assert_eq!(th.baseline_adjust, 12);
    assert_eq!(th.jump_threshold, DEFAULT_JUMP_THRESHOLD);
    assert_eq!(th.crouch_threshold, DEFAULT_CROUCH_THRESHOLD);
}

#[test]
fn non_positive_thresholds_are_invalid() {
    let th = ThresholdConfig {
        jump_threshold: 0,
        ..ThresholdConfig::default()
    };
    assert!(matches!(
        th.validate(),
        Err(ConfigError::NonPositive {
            name: "jump_threshold",
            ..
        })
    ));
}
