// Gesture tuning constants shared by the web and replay front-ends.
//
// Pixel values are in the pose source's image space (y grows downward).
// Durations are milliseconds on the tick clock.

// Keypoint gating
pub const MIN_CONFIDENCE: f32 = 0.3; // keypoints scoring below this are ignored

// Calibration
pub const CALIBRATION_FRAMES: u32 = 30; // valid samples averaged into the baseline

// Debounce
pub const ACTION_COOLDOWN_MS: f64 = 300.0; // latch release delay after an action completes
pub const MIN_CROUCH_HOLD_MS: f64 = 100.0; // shorter crouches are not scored

// Hands-up restart gesture
pub const GESTURE_HOLD_MS: f64 = 2000.0; // continuous hold needed to fire a restart
pub const HANDS_UP_MARGIN_PX: f32 = 50.0; // wrist must sit this far above its shoulder
pub const WRIST_SYMMETRY_PX: f32 = 50.0; // max vertical gap between the two wrists

// Session countdown
pub const COUNTDOWN_SECS: u32 = 5;
pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

// Operator threshold defaults (slider start values)
pub const DEFAULT_BASELINE_ADJUST: i32 = 0;
pub const DEFAULT_JUMP_THRESHOLD: i32 = 40;
pub const DEFAULT_CROUCH_THRESHOLD: i32 = 30;

// Status line
pub const STATUS_FADE_MS: f64 = 800.0; // transient messages clear after this

// Pose source layout (MoveNet / COCO order, flat [x, y, score] triples)
pub const KEYPOINT_COUNT: usize = 17;
pub const FLAT_STRIDE: usize = 3;
