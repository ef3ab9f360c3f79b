//! Topology tables: the static description of a rig.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use croak_core::{CroakError, Result};

/// One row of a topology table: a node name, its parent (`None` for the
/// root) and its rest-pose offset relative to that parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyEntry {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub rest_offset: Vec3,
}

impl TopologyEntry {
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            rest_offset: Vec3::ZERO,
        }
    }

    #[must_use]
    pub const fn child(name: &'static str, parent: &'static str, rest_offset: Vec3) -> Self {
        Self {
            name,
            parent: Some(parent),
            rest_offset,
        }
    }
}

/// Checks that `entries` describe exactly one tree and returns the root
/// entry's name.
///
/// Table order is irrelevant: parents may be listed after their children.
pub fn validate(entries: &[TopologyEntry]) -> Result<&'static str> {
    let mut by_name: FxHashMap<&'static str, &TopologyEntry> = FxHashMap::default();
    for entry in entries {
        if by_name.insert(entry.name, entry).is_some() {
            return Err(CroakError::DuplicateNode(entry.name.to_string()));
        }
    }

    let mut root: Option<&'static str> = None;
    for entry in entries {
        match entry.parent {
            None => {
                if let Some(first) = root {
                    return Err(CroakError::MultipleRoots {
                        first: first.to_string(),
                        second: entry.name.to_string(),
                    });
                }
                root = Some(entry.name);
            }
            Some(parent) => {
                if !by_name.contains_key(parent) {
                    return Err(CroakError::MissingParent {
                        node: entry.name.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
        }
    }
    let root = root.ok_or(CroakError::NoRoot)?;

    // With a single root and every parent resolvable, any node whose parent
    // chain does not reach the root sits on a cycle.
    for entry in entries {
        let mut seen: FxHashSet<&'static str> = FxHashSet::default();
        let mut current = entry;
        while let Some(parent) = current.parent {
            if !seen.insert(current.name) {
                return Err(CroakError::CycleDetected(current.name.to_string()));
            }
            current = by_name[parent];
        }
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_parent_listed_after_child() {
        let table = [
            TopologyEntry::child("hand", "arm", Vec3::X),
            TopologyEntry::child("arm", "body", Vec3::Y),
            TopologyEntry::root("body"),
        ];
        assert_eq!(validate(&table).unwrap(), "body");
    }

    #[test]
    fn rejects_missing_parent() {
        let table = [
            TopologyEntry::root("body"),
            TopologyEntry::child("arm", "shoulder", Vec3::ZERO),
        ];
        assert!(matches!(
            validate(&table),
            Err(CroakError::MissingParent { ref node, ref parent }) if node == "arm" && parent == "shoulder"
        ));
    }

    #[test]
    fn rejects_duplicates_and_root_count() {
        let dup = [TopologyEntry::root("body"), TopologyEntry::root("body")];
        assert!(matches!(validate(&dup), Err(CroakError::DuplicateNode(_))));

        let two = [TopologyEntry::root("a"), TopologyEntry::root("b")];
        assert!(matches!(validate(&two), Err(CroakError::MultipleRoots { .. })));

        let none = [
            TopologyEntry::child("a", "b", Vec3::ZERO),
            TopologyEntry::child("b", "a", Vec3::ZERO),
        ];
        assert!(matches!(validate(&none), Err(CroakError::NoRoot)));
    }

    #[test]
    fn rejects_detached_cycle() {
        let table = [
            TopologyEntry::root("body"),
            TopologyEntry::child("a", "b", Vec3::ZERO),
            TopologyEntry::child("b", "a", Vec3::ZERO),
        ];
        assert!(matches!(validate(&table), Err(CroakError::CycleDetected(_))));
    }
}
