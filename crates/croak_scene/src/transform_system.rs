//! Transform System
//!
//! Propagates local transforms down the rig into world matrices. Kept apart
//! from [`Rig`](crate::Rig) so it only borrows the node arena.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::NodeHandle;
use crate::node::RigNode;

/// Updates world matrices for the tree under `root`, which is treated as
/// a top-level node (identity parent).
///
/// Uses an explicit stack instead of recursion. A node's world matrix is
/// recomputed when its own local matrix changed or any ancestor's did.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, RigNode>, root: NodeHandle) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(16);
    stack.push((root, Affine3A::IDENTITY, false));

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);
        }

        let current_world = node.transform.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, current_world, world_needs_update));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn chain(length: usize) -> (SlotMap<NodeHandle, RigNode>, Vec<NodeHandle>) {
        let mut nodes: SlotMap<NodeHandle, RigNode> = SlotMap::with_key();
        let mut handles: Vec<NodeHandle> = Vec::new();
        for i in 0..length {
            let mut node = RigNode::new(format!("n{i}"), Vec3::X);
            node.parent = handles.last().copied();
            let handle = nodes.insert(node);
            if let Some(&prev) = handles.last() {
                nodes[prev].children.push(handle);
            }
            handles.push(handle);
        }
        (nodes, handles)
    }

    #[test]
    fn chain_accumulates_offsets() {
        let (mut nodes, handles) = chain(4);
        update_hierarchy_iterative(&mut nodes, handles[0]);

        for (i, &h) in handles.iter().enumerate() {
            let x = nodes[h].transform.world_position().x;
            assert!((x - (i + 1) as f32).abs() < 1e-5, "node {i}: x = {x}");
        }
    }

    #[test]
    fn parent_change_propagates_to_clean_children() {
        let (mut nodes, handles) = chain(3);
        update_hierarchy_iterative(&mut nodes, handles[0]);

        nodes[handles[0]].transform.position.y = 2.0;
        update_hierarchy_iterative(&mut nodes, handles[0]);

        let leaf = nodes[handles[2]].transform.world_position();
        assert!((leaf.y - 2.0).abs() < 1e-5);
    }
}
