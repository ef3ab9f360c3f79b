use std::collections::BTreeSet;

use glam::{Affine3A, Vec3};

use crate::NodeHandle;
use crate::transform::Transform;

/// A named transform in the rig hierarchy.
///
/// # Hierarchy
///
/// - `parent`: handle of the owning node (`None` for the rig root)
/// - `children`: ordered child handles; the order never affects the result
///
/// # Bound assets
///
/// Meshes delivered by the asset collaborator are recorded by asset name.
/// The set is ordered, so the node looks the same no matter in which order
/// the loads completed.
#[derive(Debug, Clone)]
pub struct RigNode {
    name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    /// Local transform, initialized to the rest pose.
    pub transform: Transform,

    rest_offset: Vec3,
    assets: BTreeSet<String>,
}

impl RigNode {
    #[must_use]
    pub fn new(name: impl Into<String>, rest_offset: Vec3) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::from_position(rest_offset),
            rest_offset,
            assets: BTreeSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn rest_offset(&self) -> Vec3 {
        self.rest_offset
    }

    /// Puts the node back at its rest offset with no rotation.
    pub fn reset_to_rest(&mut self) {
        self.transform.position = self.rest_offset;
        self.transform.rotation = Vec3::ZERO;
        self.transform.scale = Vec3::ONE;
    }

    /// Records an asset as bound to this node. Returns `false` if it was
    /// already bound.
    pub fn bind_asset(&mut self, asset_name: impl Into<String>) -> bool {
        self.assets.insert(asset_name.into())
    }

    /// Names of the bound assets, in name order.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(String::as_str)
    }

    #[must_use]
    pub fn has_asset(&self, asset_name: &str) -> bool {
        self.assets.contains(asset_name)
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        self.transform.world_matrix()
    }
}
