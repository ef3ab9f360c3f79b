//! Joint drive tables.
//!
//! Every joint angle of a parametric motion is
//! `baseline + speed_weight·v + curve_weight·f(t)` for the one shared arc
//! value `f(t)`. Jump only uses the curve weight; swim adds fixed paddle
//! offsets.

use croak_core::Axis;
use croak_scene::{FrogPart, PartMap, Rig};

/// Drives one rotation axis of one joint from the motion's arc value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDrive {
    pub part: FrogPart,
    pub axis: Axis,
    pub baseline: f32,
    pub speed_weight: f32,
    pub curve_weight: f32,
}

impl JointDrive {
    /// `angle = curve_weight · f(t)`
    #[must_use]
    pub const fn curve(part: FrogPart, axis: Axis, curve_weight: f32) -> Self {
        Self {
            part,
            axis,
            baseline: 0.0,
            speed_weight: 0.0,
            curve_weight,
        }
    }

    /// `angle = baseline + curve_weight · f(t)`
    #[must_use]
    pub const fn offset(part: FrogPart, axis: Axis, baseline: f32, curve_weight: f32) -> Self {
        Self {
            part,
            axis,
            baseline,
            speed_weight: 0.0,
            curve_weight,
        }
    }

    /// `angle = speed_weight · v`
    #[must_use]
    pub const fn speed(part: FrogPart, axis: Axis, speed_weight: f32) -> Self {
        Self {
            part,
            axis,
            baseline: 0.0,
            speed_weight,
            curve_weight: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn angle(&self, speed: f32, arc: f32) -> f32 {
        self.baseline + self.speed_weight * speed + self.curve_weight * arc
    }
}

use Axis::{X, Y};
use FrogPart::{Arm1L, Arm1R, Arm3L, Arm3R, Leg1L, Leg1R, Leg2L, Leg2R, Leg3L, Leg3R};

/// Legs flex on X and splay on Y, arms swing on Y; all peak mid-flight.
pub static JUMP_DRIVES: &[JointDrive] = &[
    JointDrive::curve(Leg1L, X, -0.2),
    JointDrive::curve(Leg1R, X, -0.2),
    JointDrive::curve(Leg1L, Y, 0.5),
    JointDrive::curve(Leg1R, Y, -0.5),
    JointDrive::curve(Leg2L, Y, -0.5),
    JointDrive::curve(Leg2R, Y, 0.5),
    JointDrive::curve(Leg3L, Y, 0.5),
    JointDrive::curve(Leg3R, Y, -0.5),
    JointDrive::curve(Arm1L, X, 0.1),
    JointDrive::curve(Arm1R, X, 0.1),
    JointDrive::curve(Arm1L, Y, -0.5),
    JointDrive::curve(Arm1R, Y, 0.5),
    JointDrive::curve(Arm3L, Y, 0.5),
    JointDrive::curve(Arm3R, Y, -0.5),
];

/// Paddle stroke: limbs held at fixed offsets and swept by the arc.
pub static SWIM_DRIVES: &[JointDrive] = &[
    JointDrive::speed(Leg1L, X, 0.03),
    JointDrive::speed(Leg1R, X, 0.03),
    JointDrive::offset(Leg1L, Y, 0.7, 0.5),
    JointDrive::offset(Leg1R, Y, -0.7, -0.5),
    JointDrive::offset(Leg2L, Y, -0.7, -0.5),
    JointDrive::offset(Leg2R, Y, 0.7, 0.5),
    JointDrive::offset(Leg3L, Y, 1.0, 0.5),
    JointDrive::offset(Leg3R, Y, -1.0, -0.5),
    JointDrive::speed(Arm1L, X, -0.1),
    JointDrive::speed(Arm1R, X, -0.1),
    JointDrive::speed(Arm3L, X, -0.15),
    JointDrive::speed(Arm3R, X, -0.15),
    JointDrive::offset(Arm1L, Y, -0.3, -0.5),
    JointDrive::offset(Arm1R, Y, 0.3, 0.5),
    JointDrive::offset(Arm3L, Y, 0.3, 0.5),
    JointDrive::offset(Arm3R, Y, -0.3, -0.5),
];

/// Overwrites every driven joint angle for the given speed and arc value.
pub fn apply_drives(rig: &mut Rig, parts: &PartMap, drives: &[JointDrive], speed: f32, arc: f32) {
    for drive in drives {
        if let Some(node) = rig.node_mut(parts.get(drive.part)) {
            *drive.axis.get_mut(&mut node.transform.rotation) = drive.angle(speed, arc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croak_scene::build_frog_rig;

    #[test]
    fn jump_drives_rest_at_zero_arc() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        rig.node_mut(parts.get(Leg1L)).unwrap().transform.rotation.y = 0.9;
        apply_drives(&mut rig, &parts, JUMP_DRIVES, 5.0, 0.0);
        for drive in JUMP_DRIVES {
            let rotation = rig.node(parts.get(drive.part)).unwrap().transform.rotation;
            assert_eq!(drive.axis.get(rotation), 0.0);
        }
    }

    #[test]
    fn swim_drives_combine_baseline_speed_and_arc() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        apply_drives(&mut rig, &parts, SWIM_DRIVES, 5.0, 2.0);

        let leg = rig.node(parts.get(Leg1L)).unwrap().transform.rotation;
        assert!((leg.x - 0.15).abs() < 1e-6);
        assert!((leg.y - 1.7).abs() < 1e-6);

        let arm = rig.node(parts.get(Arm3R)).unwrap().transform.rotation;
        assert!((arm.x + 0.75).abs() < 1e-6);
        assert!((arm.y + 1.3).abs() < 1e-6);
    }

    #[test]
    fn drives_leave_other_axes_alone() {
        let (mut rig, parts) = build_frog_rig().unwrap();
        rig.node_mut(parts.get(Leg2L)).unwrap().transform.rotation.z = 0.25;
        apply_drives(&mut rig, &parts, JUMP_DRIVES, 5.0, 1.0);
        let rotation = rig.node(parts.get(Leg2L)).unwrap().transform.rotation;
        assert_eq!(rotation.z, 0.25);
        assert_eq!(rotation.y, -0.5);
    }
}
