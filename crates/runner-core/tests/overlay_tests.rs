// Host-side tests for overlay geometry.

use runner_core::overlay::*;
use runner_core::*;

#[test]
fn bones_need_both_endpoints_confident() {
    let frame = PoseFrame::new([
        Keypoint::new(KeypointKind::LeftHip, 100.0, 300.0, 0.9),
        Keypoint::new(KeypointKind::RightHip, 160.0, 300.0, 0.9),
        Keypoint::new(KeypointKind::LeftKnee, 100.0, 400.0, 0.9),
        Keypoint::new(KeypointKind::RightKnee, 160.0, 400.0, 0.2),
    ]);
    let bones = visible_bones(&frame, MIN_CONFIDENCE);
    assert_eq!(bones.len(), 2);
    assert!(bones.contains(&(glam::Vec2::new(100.0, 300.0), glam::Vec2::new(160.0, 300.0))));
    assert!(bones.contains(&(glam::Vec2::new(100.0, 300.0), glam::Vec2::new(100.0, 400.0))));

    assert_eq!(visible_joints(&frame, MIN_CONFIDENCE).len(), 3);
}

#[test]
fn threshold_lines_run_top_to_bottom() {
    let bands = Bands::new(
        &Baseline {
            hip_y: 300.0,
            knee_y: 400.0,
        },
        &ThresholdConfig::default(),
    );
    let lines = threshold_lines(&bands);
    assert!(lines.windows(2).all(|w| w[0].y < w[1].y));
    assert_eq!(lines[1].y, 300.0);
    assert_eq!(lines[0].label, "jump");
    assert_eq!(lines[2].label, "crouch");
}
