//! Incremental control tests
//!
//! Tests for:
//! - Per-press nudges and their wraparound
//! - Body translation and tilt
//! - Key map routing through a session

use croak::animation::controls::{ARM_STROKE, LEG_STROKE, LOOK_LEFT, LOOK_RIGHT};
use croak::animation::BodyDirection;
use croak::app::KeyBinding;
use croak::prelude::*;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn rotation_y(rig: &Rig, part: FrogPart) -> f32 {
    rig.find(part.name()).unwrap().transform.rotation.y
}

fn root(session: &Session) -> (Vec3, Vec3) {
    let t = &session.rig().node(session.rig().root()).unwrap().transform;
    (t.position, t.rotation)
}

/// Replays `presses` increments of `delta` with the same wrap rule the
/// controls use, returning the final value and the press that first wrapped.
fn reference_accumulation(presses: usize, delta: f32, limit: f32) -> (f32, Option<usize>) {
    let mut value: f32 = 0.0;
    let mut first_wrap = None;
    for press in 1..=presses {
        value += delta;
        if value >= limit {
            value = 0.0;
            first_wrap.get_or_insert(press);
        }
    }
    (value, first_wrap)
}

// ============================================================================
// Nudges
// ============================================================================

#[test]
fn arm_stroke_accumulates_and_wraps() {
    let (mut rig, parts) = build_frog_rig().unwrap();
    let presses = 2000;

    let mut first_wrap = None;
    for press in 1..=presses {
        if ARM_STROKE.apply(&mut rig, &parts) {
            first_wrap.get_or_insert(press);
        }
    }

    let (expected, expected_wrap) = reference_accumulation(presses, 0.001, 1.5);
    assert_eq!(rotation_y(&rig, FrogPart::Arm1R), expected);
    assert_eq!(first_wrap, expected_wrap);
    let wrap = first_wrap.unwrap();
    assert!((1499..=1501).contains(&wrap), "wrapped at {wrap}");

    // Partners reset together with the watched joint.
    let since_wrap = (presses - wrap) as f32;
    assert!((rotation_y(&rig, FrogPart::Arm1L) + 0.001 * since_wrap).abs() < 1e-3);
    assert!((rotation_y(&rig, FrogPart::Arm3L) - 0.0004 * since_wrap).abs() < 1e-3);
}

#[test]
fn leg_stroke_moves_all_six_joints() {
    let (mut rig, parts) = build_frog_rig().unwrap();
    for _ in 0..10 {
        assert!(!LEG_STROKE.apply(&mut rig, &parts));
    }
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg1L), 0.01));
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg1R), -0.01));
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg2L), -0.012));
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg2R), 0.012));
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg3L), 0.014));
    assert!(approx_eq(rotation_y(&rig, FrogPart::Leg3R), -0.014));
}

#[test]
fn head_turns_wrap_in_both_directions() {
    let (mut rig, parts) = build_frog_rig().unwrap();

    let mut wrapped_at = None;
    for press in 1..=900 {
        if LOOK_LEFT.apply(&mut rig, &parts) {
            wrapped_at = Some(press);
            break;
        }
    }
    assert!(wrapped_at.is_some_and(|p| (799..=801).contains(&p)));
    assert_eq!(rotation_y(&rig, FrogPart::Head), 0.0);

    for _ in 0..5 {
        LOOK_RIGHT.apply(&mut rig, &parts);
    }
    assert!(approx_eq(rotation_y(&rig, FrogPart::Head), -0.005));
}

// ============================================================================
// Body controls through a session
// ============================================================================

#[test]
fn arrows_move_and_shift_arrows_tilt() {
    let mut session = Session::new(CharacterSettings::default()).unwrap();

    for _ in 0..3 {
        session.handle_key(KeyPress::new(Key::ArrowUp));
    }
    session.handle_key(KeyPress::new(Key::ArrowLeft));
    let (position, rotation) = root(&session);
    assert!(approx_eq(position.z, 0.03));
    assert!(approx_eq(position.x, 0.01));
    assert_eq!(rotation, Vec3::ZERO);

    session.handle_key(KeyPress::new(Key::ArrowDown).with_shift());
    session.handle_key(KeyPress::new(Key::ArrowRight).with_shift());
    session.handle_key(KeyPress::new(Key::ArrowRight).with_shift());
    let (position, rotation) = root(&session);
    assert!(approx_eq(position.z, 0.03));
    assert!(approx_eq(rotation.x, 0.01));
    assert!(approx_eq(rotation.z, 0.02));
}

#[test]
fn letter_keys_drive_limbs_and_motions() {
    let mut session = Session::new(CharacterSettings::default()).unwrap();

    assert_eq!(session.handle_key(KeyPress::new(Key::W)), Some(ControlAction::ArmStroke));
    assert_eq!(session.handle_key(KeyPress::new(Key::S)), Some(ControlAction::LegStroke));
    assert_eq!(session.handle_key(KeyPress::new(Key::A)), Some(ControlAction::LookLeft));
    assert!(approx_eq(rotation_y(session.rig(), FrogPart::Arm1R), 0.001));
    assert!(approx_eq(rotation_y(session.rig(), FrogPart::Leg1L), 0.001));
    assert!(approx_eq(rotation_y(session.rig(), FrogPart::Head), 0.001));

    session.handle_key(KeyPress::new(Key::Q));
    assert!(session.controller().is_active(MotionKind::Swim));
    assert!(!session.controller().is_active(MotionKind::Jump));
}

#[test]
fn auto_repeat_counts_as_a_press() {
    let mut session = Session::new(CharacterSettings::default()).unwrap();
    let mut press = KeyPress::new(Key::D);
    session.handle_key(press);
    press.repeat = true;
    session.handle_key(press);
    assert!(approx_eq(rotation_y(session.rig(), FrogPart::Head), -0.002));
}

#[test]
fn custom_key_map_is_honored() {
    let mut map = KeyMap::frog();
    map.bind(KeyBinding::plain(Key::Space), ControlAction::StartJump);
    map.bind(KeyBinding::shifted(Key::ArrowUp), ControlAction::Move(BodyDirection::Forward));

    let mut session = Session::new(CharacterSettings::default()).unwrap().with_key_map(map);
    session.handle_key(KeyPress::new(Key::Space));
    assert!(session.controller().is_active(MotionKind::Jump));

    session.handle_key(KeyPress::new(Key::ArrowUp).with_shift());
    let (position, rotation) = root(&session);
    assert!(approx_eq(position.z, 0.01));
    assert_eq!(rotation.x, 0.0);
}
