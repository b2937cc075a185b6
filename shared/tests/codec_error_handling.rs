/// Tests for pose codec error handling
/// Covers decode failure paths for both wire messages

use glam::Vec3;
use posesync_shared::{ApplyPose, Pose, SubmitMove, WIRE_EPSILON};

#[test]
fn truncated_submit_move_is_an_error() {
    let pose = Pose::from_euler_degrees(Vec3::new(100.0, -50.0, 25.0), Vec3::new(10.0, 20.0, 30.0));
    let bytes = SubmitMove::from_pose(&pose).to_bytes();

    for cut in 0..bytes.len().min(3) {
        assert!(
            SubmitMove::from_bytes(&bytes[..cut]).is_err(),
            "decoding {} of {} bytes should fail",
            cut,
            bytes.len()
        );
    }
}

#[test]
fn empty_apply_pose_is_an_error() {
    assert!(ApplyPose::from_bytes(&[]).is_err());
}

#[test]
fn pose_round_trips_within_tolerance() {
    let submit = SubmitMove(posesync_shared::PosePayload {
        x: 1.5,
        y: -2.25,
        z: 0.0,
        euler_x: 0.0,
        euler_y: 90.0,
        euler_z: 0.0,
    });

    let out = SubmitMove::from_bytes(&submit.to_bytes()).unwrap();

    assert!((out.0.x - 1.5).abs() <= WIRE_EPSILON);
    assert!((out.0.y + 2.25).abs() <= WIRE_EPSILON);
    assert!((out.0.z).abs() <= WIRE_EPSILON);
    assert!((out.0.euler_x).abs() <= WIRE_EPSILON);
    assert!((out.0.euler_y - 90.0).abs() <= WIRE_EPSILON);
    assert!((out.0.euler_z).abs() <= WIRE_EPSILON);
}
