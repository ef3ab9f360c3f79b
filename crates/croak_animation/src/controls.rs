//! Discrete per-keypress controls.
//!
//! Each press applies one fixed delta with no time scaling. Nudge controls
//! wrap: once the watched angle crosses its threshold, every angle the
//! control drives snaps back to zero so repeated presses cycle.

use croak_core::Axis;
use croak_scene::{FrogPart, PartMap, Rig};

/// Direction of a body move or tilt, as seen on the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyDirection {
    Forward,
    Back,
    Left,
    Right,
}

/// Everything the input controller can ask of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Translate the body one step.
    Move(BodyDirection),
    /// Tilt (forward/back) or roll (left/right) the body one step.
    Tilt(BodyDirection),
    /// Walk-cycle nudge of the arms.
    ArmStroke,
    /// Walk-cycle nudge of the legs.
    LegStroke,
    LookLeft,
    LookRight,
    StartJump,
    StartSwim,
}

/// One fixed rotation delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudge {
    pub part: FrogPart,
    pub axis: Axis,
    pub delta: f32,
}

impl Nudge {
    #[must_use]
    pub const fn new(part: FrogPart, axis: Axis, delta: f32) -> Self {
        Self { part, axis, delta }
    }
}

/// Threshold test of a nudge control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapWhen {
    AtLeast(f32),
    AtMost(f32),
}

impl WrapWhen {
    #[inline]
    #[must_use]
    pub fn crossed(self, value: f32) -> bool {
        match self {
            WrapWhen::AtLeast(limit) => value >= limit,
            WrapWhen::AtMost(limit) => value <= limit,
        }
    }
}

/// A set of nudges applied together, with a wraparound clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeControl {
    pub nudges: &'static [Nudge],
    pub watch: FrogPart,
    pub watch_axis: Axis,
    pub wrap: WrapWhen,
}

impl NudgeControl {
    /// Applies one press. Returns `true` if the control wrapped back to zero.
    pub fn apply(&self, rig: &mut Rig, parts: &PartMap) -> bool {
        for nudge in self.nudges {
            if let Some(node) = rig.node_mut(parts.get(nudge.part)) {
                *nudge.axis.get_mut(&mut node.transform.rotation) += nudge.delta;
            }
        }

        let watched = rig
            .node(parts.get(self.watch))
            .map_or(0.0, |node| self.watch_axis.get(node.transform.rotation));
        if !self.wrap.crossed(watched) {
            return false;
        }

        for nudge in self.nudges {
            if let Some(node) = rig.node_mut(parts.get(nudge.part)) {
                *nudge.axis.get_mut(&mut node.transform.rotation) = 0.0;
            }
        }
        true
    }
}

use Axis::Y;
use FrogPart::{Arm1L, Arm1R, Arm3L, Arm3R, Head, Leg1L, Leg1R, Leg2L, Leg2R, Leg3L, Leg3R};

pub static ARM_STROKE: NudgeControl = NudgeControl {
    nudges: &[
        Nudge::new(Arm1L, Y, -0.001),
        Nudge::new(Arm1R, Y, 0.001),
        Nudge::new(Arm3L, Y, 0.0004),
        Nudge::new(Arm3R, Y, -0.0004),
    ],
    watch: Arm1R,
    watch_axis: Y,
    wrap: WrapWhen::AtLeast(1.5),
};

pub static LEG_STROKE: NudgeControl = NudgeControl {
    nudges: &[
        Nudge::new(Leg1L, Y, 0.001),
        Nudge::new(Leg1R, Y, -0.001),
        Nudge::new(Leg2L, Y, -0.0012),
        Nudge::new(Leg2R, Y, 0.0012),
        Nudge::new(Leg3L, Y, 0.0014),
        Nudge::new(Leg3R, Y, -0.0014),
    ],
    watch: Leg1L,
    watch_axis: Y,
    wrap: WrapWhen::AtLeast(1.5),
};

pub static LOOK_LEFT: NudgeControl = NudgeControl {
    nudges: &[Nudge::new(Head, Y, 0.001)],
    watch: Head,
    watch_axis: Y,
    wrap: WrapWhen::AtLeast(0.8),
};

pub static LOOK_RIGHT: NudgeControl = NudgeControl {
    nudges: &[Nudge::new(Head, Y, -0.001)],
    watch: Head,
    watch_axis: Y,
    wrap: WrapWhen::AtMost(-0.8),
};

/// Moves the rig root one `step` in its parent frame.
pub fn move_body(rig: &mut Rig, direction: BodyDirection, step: f32) {
    let root = rig.root();
    let Some(node) = rig.node_mut(root) else {
        return;
    };
    let position = &mut node.transform.position;
    match direction {
        BodyDirection::Forward => position.z += step,
        BodyDirection::Back => position.z -= step,
        BodyDirection::Left => position.x += step,
        BodyDirection::Right => position.x -= step,
    }
}

/// Tilts (X) or rolls (Z) the rig root by `step` radians.
pub fn tilt_body(rig: &mut Rig, direction: BodyDirection, step: f32) {
    let root = rig.root();
    let Some(node) = rig.node_mut(root) else {
        return;
    };
    let rotation = &mut node.transform.rotation;
    match direction {
        BodyDirection::Forward => rotation.x -= step,
        BodyDirection::Back => rotation.x += step,
        BodyDirection::Left => rotation.z -= step,
        BodyDirection::Right => rotation.z += step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croak_scene::build_frog_rig;
    use glam::Vec3;

    fn rotation_y(rig: &Rig, parts: &PartMap, part: FrogPart) -> f32 {
        rig.node(parts.get(part)).unwrap().transform.rotation.y
    }

    #[test]
    fn single_press_applies_each_delta_once() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        assert!(!LEG_STROKE.apply(&mut rig, &parts));
        assert_eq!(rotation_y(&rig, &parts, Leg1L), 0.001);
        assert_eq!(rotation_y(&rig, &parts, Leg2R), 0.0012);
        assert_eq!(rotation_y(&rig, &parts, Leg3R), -0.0014);
    }

    #[test]
    fn look_left_wraps_at_threshold() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        rig.node_mut(parts.get(Head)).unwrap().transform.rotation.y = 0.7995;
        assert!(LOOK_LEFT.apply(&mut rig, &parts));
        assert_eq!(rotation_y(&rig, &parts, Head), 0.0);
    }

    #[test]
    fn look_right_wraps_at_negative_threshold() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        rig.node_mut(parts.get(Head)).unwrap().transform.rotation.y = -0.7995;
        assert!(LOOK_RIGHT.apply(&mut rig, &parts));
        assert_eq!(rotation_y(&rig, &parts, Head), 0.0);
    }

    #[test]
    fn body_moves_and_tilts_on_root() {
        let (mut rig, _) = build_frog_rig().unwrap();
        move_body(&mut rig, BodyDirection::Forward, 0.01);
        move_body(&mut rig, BodyDirection::Left, 0.01);
        tilt_body(&mut rig, BodyDirection::Back, 0.01);
        tilt_body(&mut rig, BodyDirection::Right, 0.01);

        let t = &rig.node(rig.root()).unwrap().transform;
        assert_eq!(t.position, Vec3::new(0.01, 0.0, 0.01));
        assert_eq!(t.rotation, Vec3::new(0.01, 0.0, 0.01));
    }
}
