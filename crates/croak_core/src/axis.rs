use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three local axes of a rig node.
///
/// Rotations are stored as independent Euler angles, so a pose can drive a
/// single axis of a joint without disturbing the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Reads the component of `v` along this axis.
    #[inline]
    #[must_use]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Returns a mutable reference to the component of `v` along this axis.
    #[inline]
    pub fn get_mut(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}
