//! Routing of loaded assets to rig nodes.
//!
//! Assets are identified by the stem of their file name. A
//! [`BindingTable`] maps that name to the rig node that should carry it.

use rustc_hash::FxHashMap;

use croak_core::{CroakError, Result};
use croak_scene::{NodeHandle, Rig, TopologyEntry};

/// Model files making up the frog, relative to the asset root.
pub const FROG_ASSETS: [&str; 15] = [
    "models/arm_001_L.glb",
    "models/arm_001_R.glb",
    "models/arm_002_L.glb",
    "models/arm_002_R.glb",
    "models/arm_003_L.glb",
    "models/arm_003_R.glb",
    "models/head.glb",
    "models/leg_001_L.glb",
    "models/leg_001_R.glb",
    "models/leg_002_L.glb",
    "models/leg_002_R.glb",
    "models/leg_003_L.glb",
    "models/leg_003_R.glb",
    "models/spine.glb",
    "models/spine_001.glb",
];

/// Extracts the asset name from a path: the last segment without its
/// extension (`models/arm_001_L.glb` → `arm_001_L`).
#[must_use]
pub fn asset_name(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.split_once('.') {
        Some((stem, _)) => stem,
        None => file,
    }
}

/// Maps asset names to rig node names.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    slots: FxHashMap<String, String>,
}

impl BindingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One slot per topology node, named after the node itself.
    #[must_use]
    pub fn from_topology(entries: &[TopologyEntry]) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.name, entry.name);
        }
        table
    }

    /// The frog table: every part binds to its own node, and the second
    /// spine piece shares the spine node.
    #[must_use]
    pub fn frog() -> Self {
        let mut table = Self::from_topology(croak_scene::FROG_TOPOLOGY);
        table.insert("spine_001", "spine");
        table
    }

    pub fn insert(&mut self, asset: impl Into<String>, node: impl Into<String>) {
        self.slots.insert(asset.into(), node.into());
    }

    #[must_use]
    pub fn node_for(&self, asset: &str) -> Option<&str> {
        self.slots.get(asset).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Binds the asset at `path` to its rig node and returns that node.
///
/// Binding the same asset twice leaves the rig unchanged, so completion
/// order and duplicate deliveries do not matter.
pub fn bind_asset(rig: &mut Rig, table: &BindingTable, path: &str) -> Result<NodeHandle> {
    let name = asset_name(path);
    let node_name = table
        .node_for(name)
        .ok_or_else(|| CroakError::UnknownAsset(name.to_string()))?;
    let handle = rig.require(node_name)?;

    if let Some(node) = rig.node_mut(handle)
        && node.bind_asset(name)
    {
        log::debug!("Bound '{name}' to '{node_name}'");
    }
    Ok(handle)
}
