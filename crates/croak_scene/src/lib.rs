//! Rig hierarchy for croak.
//!
//! - [`Rig`]: tree of named transform nodes built from a topology table
//! - [`RigNode`]: one node (transform, rest offset, bound assets)
//! - [`Transform`]: TRS with Euler rotation and cached matrices
//! - [`TopologyEntry`]: static table row describing a node
//! - [`frog`]: the frog's part identifiers and topology
//! - [`transform_system`]: world-matrix propagation

pub mod frog;
pub mod node;
pub mod rig;
pub mod topology;
pub mod transform;
pub mod transform_system;

pub use frog::{FROG_TOPOLOGY, FrogPart, PartMap, build_frog_rig};
pub use node::RigNode;
pub use rig::Rig;
pub use topology::TopologyEntry;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`Rig`].
    pub struct NodeHandle;
}
