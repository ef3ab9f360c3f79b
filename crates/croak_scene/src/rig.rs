use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use croak_core::{CroakError, Result};

use crate::NodeHandle;
use crate::node::RigNode;
use crate::topology::{self, TopologyEntry};
use crate::transform_system;

/// A tree of named transform nodes built from a topology table.
///
/// The rig owns its nodes in a slot map and keeps a name index for lookups.
/// Nodes are created once and never removed; poses only mutate transforms.
#[derive(Debug, Clone)]
pub struct Rig {
    nodes: SlotMap<NodeHandle, RigNode>,
    names: FxHashMap<String, NodeHandle>,
    root: NodeHandle,
}

impl Rig {
    /// Builds the rig described by `entries`.
    ///
    /// Every node starts at its rest offset. Children keep the relative order
    /// in which they appear in the table.
    pub fn from_topology(entries: &[TopologyEntry]) -> Result<Self> {
        let root_name = topology::validate(entries)?;

        let mut nodes: SlotMap<NodeHandle, RigNode> = SlotMap::with_capacity_and_key(entries.len());
        let mut names: FxHashMap<String, NodeHandle> = FxHashMap::default();
        for entry in entries {
            let handle = nodes.insert(RigNode::new(entry.name, entry.rest_offset));
            names.insert(entry.name.to_string(), handle);
        }

        for entry in entries {
            let Some(parent_name) = entry.parent else {
                continue;
            };
            let child = names[entry.name];
            let parent = names[parent_name];
            nodes[child].parent = Some(parent);
            nodes[parent].children.push(child);
        }

        let root = names[root_name];
        log::debug!("Built rig '{root_name}' with {} nodes", nodes.len());

        Ok(Self { nodes, names, root })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&RigNode> {
        self.nodes.get(handle)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut RigNode> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn handle(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    /// Like [`handle`](Self::handle) but reports a missing node as an error.
    pub fn require(&self, name: &str) -> Result<NodeHandle> {
        self.handle(name)
            .ok_or_else(|| CroakError::NodeNotFound(name.to_string()))
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RigNode> {
        self.handle(name).and_then(|h| self.nodes.get(h))
    }

    /// Returns `true` if `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(RigNode::parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(RigNode::parent);
        }
        false
    }

    /// Handles in depth-first pre-order, starting at the root.
    #[must_use]
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            rig: self,
            stack: vec![self.root],
        }
    }

    /// Parent name of every node, keyed by node name.
    #[must_use]
    pub fn parent_names(&self) -> FxHashMap<&str, Option<&str>> {
        self.nodes
            .values()
            .map(|node| {
                let parent = node.parent.and_then(|p| self.nodes.get(p)).map(RigNode::name);
                (node.name(), parent)
            })
            .collect()
    }

    /// World-space translation of a node as of the last
    /// [`update_world_matrices`](Self::update_world_matrices).
    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.nodes.get(handle).map(|n| n.transform.world_position())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Re-parents `child` under `parent`, keeping both sides in sync.
    ///
    /// The rig root cannot be moved, and a node cannot be attached to itself
    /// or to one of its descendants.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return Err(CroakError::NodeNotFound(format!("{child:?} or {parent:?}")));
        }
        if child == parent {
            return Err(CroakError::InvalidAttach("cannot attach a node to itself".into()));
        }
        if child == self.root {
            return Err(CroakError::InvalidAttach("cannot re-parent the rig root".into()));
        }
        if self.is_ancestor(child, parent) {
            return Err(CroakError::InvalidAttach(format!(
                "'{}' is a descendant of '{}'",
                self.nodes[parent].name(),
                self.nodes[child].name()
            )));
        }

        if let Some(old) = self.nodes[child].parent
            && let Some(old_parent) = self.nodes.get_mut(old)
            && let Some(i) = old_parent.children.iter().position(|&x| x == child)
        {
            old_parent.children.remove(i);
        }

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
        Ok(())
    }

    /// Restores every node to its rest pose.
    pub fn rest_pose(&mut self) {
        for node in self.nodes.values_mut() {
            node.reset_to_rest();
        }
    }

    /// Propagates local transforms into world matrices. Call once per frame
    /// before the renderer reads the rig.
    pub fn update_world_matrices(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, self.root);
    }
}

/// Depth-first pre-order iterator over a [`Rig`].
pub struct DepthFirst<'a> {
    rig: &'a Rig,
    stack: Vec<NodeHandle>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        if let Some(node) = self.rig.nodes.get(handle) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(handle)
    }
}
