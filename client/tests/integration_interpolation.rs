/// Integration tests for the observer-side smoothing pipeline

use glam::{Quat, Vec3};
use posesync_client::ObservedEntity;
use posesync_shared::{ApplyPose, DistanceRateCurve, Pose, RateKey, SyncConfig};

fn at(x: f32) -> Pose {
    Pose::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY)
}

#[test]
fn received_poses_ease_in_over_one_send_interval() {
    let mut view = ObservedEntity::new(at(0.0), SyncConfig::default()); // 20 sends/sec

    view.receive_pose(&ApplyPose::from_pose(&at(4.0)));
    assert!(view.pose().position.x < 0.01);

    view.tick(0.025, 0.0); // half an interval
    assert!((view.pose().position.x - 2.0).abs() < 0.01);

    view.tick(0.025, 0.0);
    assert!((view.pose().position.x - 4.0).abs() < 0.01);

    // Without extrapolation the view parks at the target.
    view.tick(0.5, 0.0);
    assert!((view.pose().position.x - 4.0).abs() < 0.01);
}

#[test]
fn non_interpolating_views_apply_directly() {
    let mut config = SyncConfig::default();
    config.set_interpolate(false);
    let mut view = ObservedEntity::new(at(0.0), config);

    view.receive_pose(&ApplyPose::from_pose(&at(3.0)));
    assert!((view.pose().position.x - 3.0).abs() < 0.01);
}

#[test]
fn extrapolation_keeps_moving_past_the_target() {
    let mut config = SyncConfig::default();
    config.set_extrapolate(true);
    let mut view = ObservedEntity::new(at(0.0), config);

    view.receive_pose(&ApplyPose::from_pose(&at(2.0)));
    view.tick(0.075, 0.0); // t = 1.5
    assert!((view.pose().position.x - 3.0).abs() < 0.01);
}

#[test]
fn trusted_cadence_paces_by_observer_distance() {
    let mut config = SyncConfig::default();
    config.set_enable_distance_throttle(true);
    config.set_snap_distance(50.0);
    config.set_distance_rate_curve(
        DistanceRateCurve::new(vec![RateKey::new(0.0, 20.0), RateKey::new(100.0, 2.0)]).unwrap(),
    );
    let mut view = ObservedEntity::new(at(0.0), config);

    view.receive_pose(&ApplyPose::from_pose(&at(10.0)));

    // At distance 100 the expected cadence is 2 sends/sec, so a 0.1s tick
    // only advances the lerp by a fifth.
    view.tick(0.1, 100.0);
    assert!((view.smoothing().progress() - 0.2).abs() < 1e-6);
    assert!((view.pose().position.x - 2.0).abs() < 0.01);
}

#[test]
fn teleport_bypasses_gating_and_is_idempotent() {
    let mut view = ObservedEntity::new(at(0.0), SyncConfig::default());
    view.receive_pose(&ApplyPose::from_pose(&at(4.0)));

    view.teleport(Vec3::new(42.0, 0.0, 0.0), Quat::IDENTITY);
    assert_eq!(view.pose().position.x, 42.0);
    assert_eq!(view.smoothing().progress(), 0.0);

    let once = view.smoothing().clone();
    view.teleport(Vec3::new(42.0, 0.0, 0.0), Quat::IDENTITY);
    assert_eq!(&once, view.smoothing());
}

#[test]
fn snap_distance_gap_never_slides() {
    let mut view = ObservedEntity::new(at(0.0), SyncConfig::default()); // snap 5.0

    view.receive_pose(&ApplyPose::from_pose(&at(1_000.0)));
    assert!((view.pose().position.x - 1_000.0).abs() < 0.1);
    assert_eq!(view.smoothing().progress(), 1.0);
}
