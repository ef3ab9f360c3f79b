use glam::{Affine3A, EulerRot, Mat4, Quat, Vec3};

/// Transform component of a rig node.
///
/// Position, Euler rotation (XYZ order, radians) and scale, plus cached
/// local/world matrices with shadow-state dirty checking. Rotation is kept
/// as three independent angles so poses can accumulate or overwrite a
/// single axis of a joint.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    last_position: Vec3,
    last_rotation: Vec3,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Vec3::ZERO,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    /// Creates a transform translated by `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    // ========================================================================
    // Shadow state check
    // ========================================================================

    /// Recomputes the local matrix if position, rotation or scale changed
    /// since the last call. Returns whether it changed.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.quaternion(), self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    // ========================================================================
    // Getters & Helpers
    // ========================================================================

    /// Rotation as a quaternion (XYZ Euler order).
    #[inline]
    #[must_use]
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// World matrix as `Mat4`, the layout a renderer uploads.
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    /// World-space translation of this transform.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    pub(crate) fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Forces the next [`update_local_matrix`](Self::update_local_matrix) to recompute.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_local_matrix_only_when_changed() {
        let mut t = Transform::new();
        assert!(t.update_local_matrix());
        assert!(!t.update_local_matrix());

        t.rotation.y += 0.001;
        assert!(t.update_local_matrix());
        assert!(!t.update_local_matrix());

        t.mark_dirty();
        assert!(t.update_local_matrix());
    }

    #[test]
    fn local_matrix_applies_translation() {
        let mut t = Transform::from_position(Vec3::new(0.0, 2.8, 1.29));
        t.update_local_matrix();
        let p = t.local_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 2.8, 1.29)).length() < 1e-6);
    }

    #[test]
    fn single_axis_rotation_matches_quat() {
        let mut t = Transform::new();
        t.rotation.y = 0.5;
        let angle = t.quaternion().angle_between(Quat::from_rotation_y(0.5));
        assert!(angle < 1e-5);
    }
}
