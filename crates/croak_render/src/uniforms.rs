//! GPU uniform layouts and the per-node matrix table.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use rustc_hash::FxHashMap;

use croak_scene::{NodeHandle, Rig};

use crate::camera::OrbitCamera;
use crate::style::SceneStyle;

/// Matrix slots in [`ModelUniforms`]. Slot 0 is the ground.
pub const MAX_SLOTS: usize = 32;

/// Per-frame camera and lighting data (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_projection: Mat4,
    pub view: Mat4,
    pub camera_position: Vec4,
    /// xyz = position
    pub light_position: Vec4,
    /// rgb = color, w = intensity
    pub light_color: Vec4,
    pub ground_color: Vec4,
    pub ground_emissive: Vec4,
    /// rgb = rim color, w = rim exponent
    pub rim: Vec4,
}

impl FrameUniforms {
    #[must_use]
    pub fn new(camera: &OrbitCamera, style: &SceneStyle) -> Self {
        let view = camera.view_matrix();
        Self {
            view_projection: camera.projection_matrix() * view,
            view,
            camera_position: camera.position().extend(1.0),
            light_position: style.light_position.extend(1.0),
            light_color: style.light_color.extend(style.light_intensity),
            ground_color: style.ground_color.extend(1.0),
            ground_emissive: style.ground_emissive.extend(1.0),
            rim: style.rim_color.extend(style.rim_power),
        }
    }
}

/// World matrices indexed by slot (group 0, binding 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ModelUniforms {
    pub world: [Mat4; MAX_SLOTS],
}

impl Default for ModelUniforms {
    fn default() -> Self {
        Self {
            world: [Mat4::IDENTITY; MAX_SLOTS],
        }
    }
}

/// Assigns every rig node a matrix slot, in depth-first order from slot 1.
///
/// The rig's topology never changes after it is built, so the table is
/// computed once. Nodes past the last slot are not drawn.
#[derive(Debug, Clone)]
pub struct NodeSlots {
    slots: FxHashMap<NodeHandle, u32>,
}

impl NodeSlots {
    #[must_use]
    pub fn new(rig: &Rig) -> Self {
        let slots: FxHashMap<NodeHandle, u32> = rig
            .iter_depth_first()
            .zip(1..MAX_SLOTS as u32)
            .collect();
        if slots.len() < rig.len() {
            log::warn!(
                "Rig has {} nodes; only {} can be drawn",
                rig.len(),
                slots.len()
            );
        }
        Self { slots }
    }

    #[must_use]
    pub fn slot(&self, node: NodeHandle) -> Option<u32> {
        self.slots.get(&node).copied()
    }

    /// Copies each node's current world matrix into its slot.
    pub fn pack(&self, rig: &Rig, out: &mut ModelUniforms) {
        out.world[0] = Mat4::IDENTITY;
        for (&handle, &slot) in &self.slots {
            if let Some(node) = rig.node(handle) {
                out.world[slot as usize] = node.transform.world_matrix_as_mat4();
            }
        }
    }
}
