//! Parametric motion tests
//!
//! Tests for:
//! - The shared arc function
//! - Jump and swim lifecycles through the controller
//! - Overlapping motions and restart rules
//! - Settings loading

use croak::animation::motion::arc;
use croak::animation::pose::{JUMP_DRIVES, SWIM_DRIVES};
use croak::prelude::*;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn setup() -> (Rig, CharacterController) {
    let (rig, parts) = build_frog_rig().unwrap();
    (rig, CharacterController::new(parts, CharacterSettings::default()))
}

fn root_position(rig: &Rig) -> Vec3 {
    rig.node(rig.root()).unwrap().transform.position
}

fn rotation(rig: &Rig, controller: &CharacterController, part: FrogPart) -> Vec3 {
    rig.node(controller.parts().get(part)).unwrap().transform.rotation
}

// ============================================================================
// Arc
// ============================================================================

#[test]
fn arc_is_zero_at_both_ends_and_peaks_midway() {
    let (v, d) = (5.0, 2.0);
    assert_eq!(arc(v, d, 0.0), 0.0);
    assert!(approx_eq(arc(v, d, d), 0.0));
    assert!(approx_eq(arc(v, d, d / 2.0), v * d / 4.0));

    for i in 1..10 {
        let t = d * i as f32 / 20.0;
        assert!(approx_eq(arc(v, d, t), arc(v, d, d - t)), "t = {t}");
        assert!(arc(v, d, t) < arc(v, d, d / 2.0));
    }
}

#[test]
fn arc_matches_projectile_form_for_stock_duration() {
    let v = 5.0;
    for i in 0..=20 {
        let t = i as f32 / 10.0;
        assert!(approx_eq(arc(v, 2.0, t), v * t - 0.5 * v * t * t));
    }
}

// ============================================================================
// Jump
// ============================================================================

#[test]
fn jump_rises_and_lands_in_one_second() {
    let (mut rig, mut ctrl) = setup();
    ctrl.apply(&mut rig, ControlAction::StartJump);
    assert!(ctrl.is_active(MotionKind::Jump));

    // 0.25 s = half a unit: f(0.5) = 5 * 0.5 * 0.75
    ctrl.update(&mut rig, 0.25);
    assert!(approx_eq(root_position(&rig).y, 1.875));

    ctrl.update(&mut rig, 0.25);
    assert!(approx_eq(root_position(&rig).y, 2.5));
    let leg = rotation(&rig, &ctrl, FrogPart::Leg1L);
    assert!(approx_eq(leg.x, -0.5));
    assert!(approx_eq(leg.y, 1.25));

    let events = ctrl.update(&mut rig, 0.5);
    assert_eq!(events.as_slice(), &[MotionEvent::Finished(MotionKind::Jump)]);
    assert_eq!(root_position(&rig).y, 0.0);
}

#[test]
fn jump_finishes_exactly_once_at_frame_rate() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Jump);

    let mut finished = 0;
    let mut peak: f32 = 0.0;
    for _ in 0..240 {
        for event in ctrl.update(&mut rig, 1.0 / 60.0) {
            assert_eq!(event, MotionEvent::Finished(MotionKind::Jump));
            finished += 1;
        }
        peak = peak.max(root_position(&rig).y);
    }

    assert_eq!(finished, 1);
    assert!(peak > 2.4 && peak <= 2.5 + EPSILON, "peak {peak}");
    assert_eq!(root_position(&rig).y, 0.0);
    assert!(!ctrl.state().any_active());
}

#[test]
fn joints_settle_after_jump() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Jump);
    for _ in 0..100 {
        ctrl.update(&mut rig, 1.0 / 60.0);
    }
    for drive in JUMP_DRIVES {
        let value = drive.axis.get(rotation(&rig, &ctrl, drive.part));
        assert_eq!(value, 0.0, "{:?}", drive.part);
    }
}

#[test]
fn restarting_a_running_jump_is_ignored() {
    let (mut rig, mut ctrl) = setup();
    assert!(ctrl.start(MotionKind::Jump));
    ctrl.update(&mut rig, 0.5);
    let before = *ctrl.state();

    assert!(!ctrl.start(MotionKind::Jump));
    ctrl.apply(&mut rig, ControlAction::StartJump);
    assert_eq!(*ctrl.state(), before);

    // Still lands on the first schedule.
    let events = ctrl.update(&mut rig, 0.5);
    assert_eq!(events.len(), 1);
}

#[test]
fn jump_can_be_started_again_after_landing() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Jump);
    ctrl.update(&mut rig, 1.0);
    assert!(!ctrl.is_active(MotionKind::Jump));

    assert!(ctrl.start(MotionKind::Jump));
    ctrl.update(&mut rig, 0.5);
    assert!(approx_eq(root_position(&rig).y, 2.5));
}

#[test]
fn jump_ends_early_when_root_drops_below_ground() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Jump);
    ctrl.update(&mut rig, 0.1);

    rig.node_mut(rig.root()).unwrap().transform.position.y = -0.5;
    let events = ctrl.update(&mut rig, 0.1);
    assert_eq!(events.as_slice(), &[MotionEvent::Finished(MotionKind::Jump)]);
    assert_eq!(root_position(&rig).y, 0.0);
}

// ============================================================================
// Swim
// ============================================================================

#[test]
fn swim_creeps_forward_without_lifting() {
    let (mut rig, mut ctrl) = setup();
    ctrl.apply(&mut rig, ControlAction::StartSwim);

    ctrl.update(&mut rig, 0.01);
    assert!(approx_eq(root_position(&rig).z, 0.1));
    assert_eq!(root_position(&rig).y, 0.0);

    let mut z = root_position(&rig).z;
    for _ in 0..30 {
        ctrl.update(&mut rig, 1.0 / 60.0);
        let next = root_position(&rig).z;
        assert!(next > z);
        z = next;
    }
    assert_eq!(root_position(&rig).y, 0.0);
}

#[test]
fn swim_holds_paddle_offsets() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Swim);
    ctrl.update(&mut rig, 0.5);

    // v = 5, f = 2.5
    let leg = rotation(&rig, &ctrl, FrogPart::Leg3L);
    assert!(approx_eq(leg.y, 1.0 + 0.5 * 2.5));
    let arm = rotation(&rig, &ctrl, FrogPart::Arm3L);
    assert!(approx_eq(arm.x, -0.75));

    let events = ctrl.update(&mut rig, 0.5);
    assert_eq!(events.as_slice(), &[MotionEvent::Finished(MotionKind::Swim)]);
    for drive in SWIM_DRIVES {
        let value = drive.axis.get(rotation(&rig, &ctrl, drive.part));
        assert!(approx_eq(value, drive.angle(5.0, 0.0)), "{:?}", drive.part);
    }
}

#[test]
fn jump_and_swim_can_overlap() {
    let (mut rig, mut ctrl) = setup();
    ctrl.start(MotionKind::Jump);
    ctrl.start(MotionKind::Swim);

    ctrl.update(&mut rig, 0.5);
    let root = root_position(&rig);
    assert!(approx_eq(root.y, 2.5));
    // Both motions creep: 2 * 5 * 0.02 * 50 ticks
    assert!(approx_eq(root.z, 10.0));

    // Swim is evaluated after jump, so it owns every joint both drive.
    // v = 5, f = 2.5: jump alone would leave Leg1L.y at 0.5 * 2.5.
    let leg = rotation(&rig, &ctrl, FrogPart::Leg1L);
    assert!(approx_eq(leg.y, 0.7 + 0.5 * 2.5), "Leg1L.y = {}", leg.y);
    assert!(approx_eq(leg.x, 0.03 * 5.0));
    for drive in SWIM_DRIVES {
        let value = drive.axis.get(rotation(&rig, &ctrl, drive.part));
        assert!(approx_eq(value, drive.angle(5.0, 2.5)), "{:?}", drive.part);
    }

    let events = ctrl.update(&mut rig, 0.5);
    assert_eq!(events.len(), 2);
    assert!(!ctrl.state().any_active());
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn custom_settings_change_the_arc() {
    let settings = CharacterSettings::from_json(
        r#"{ "jump": { "duration": 4.0, "height": 8.0, "unit_seconds": 0.25 } }"#,
    )
    .unwrap();
    let (mut rig, parts) = build_frog_rig().unwrap();
    let mut ctrl = CharacterController::new(parts, settings);

    ctrl.start(MotionKind::Jump);
    // 0.5 s = 2 units: v = 2, f = 2 * 2 * (1 - 2/4)
    ctrl.update(&mut rig, 0.5);
    assert!(approx_eq(root_position(&rig).y, 2.0));
}

#[test]
fn one_second_units_follow_wall_clock() {
    let mut settings = CharacterSettings::default();
    settings.jump = settings.jump.with_unit_seconds(1.0);
    let (mut rig, parts) = build_frog_rig().unwrap();
    let mut ctrl = CharacterController::new(parts, settings);

    ctrl.start(MotionKind::Jump);
    ctrl.update(&mut rig, 1.0);
    assert!(approx_eq(root_position(&rig).y, 5.0 * 1.0 - 0.5 * 5.0 * 1.0));

    let events = ctrl.update(&mut rig, 1.0);
    assert_eq!(events.len(), 1);
    assert_eq!(root_position(&rig).y, 0.0);
}

#[test]
fn degenerate_settings_are_rejected() {
    let err = CharacterSettings::from_json(r#"{ "swim": { "duration": 0.0 } }"#).unwrap_err();
    assert!(matches!(err, CroakError::InvalidSettings(_)));

    let err = CharacterSettings::from_json("{ not json").unwrap_err();
    assert!(matches!(err, CroakError::SettingsError(_)));
}
