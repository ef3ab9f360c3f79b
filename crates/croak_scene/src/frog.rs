//! The frog rig: part identifiers and the fixed topology table.
//!
//! Offsets are the measured joint positions of the frog model, relative to
//! the parent part.

use glam::Vec3;

use croak_core::Result;

use crate::NodeHandle;
use crate::rig::Rig;
use crate::topology::TopologyEntry;

/// Typed identifier of each frog rig node.
///
/// `Arm1`/`Leg1` attach to the spine, `Arm2`/`Leg2` to those, and
/// `Arm3`/`Leg3` are the extremities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrogPart {
    Spine,
    Head,
    Arm1L,
    Arm2L,
    Arm3L,
    Arm1R,
    Arm2R,
    Arm3R,
    Leg1L,
    Leg2L,
    Leg3L,
    Leg1R,
    Leg2R,
    Leg3R,
}

impl FrogPart {
    pub const COUNT: usize = 14;

    pub const ALL: [FrogPart; Self::COUNT] = [
        FrogPart::Spine,
        FrogPart::Head,
        FrogPart::Arm1L,
        FrogPart::Arm2L,
        FrogPart::Arm3L,
        FrogPart::Arm1R,
        FrogPart::Arm2R,
        FrogPart::Arm3R,
        FrogPart::Leg1L,
        FrogPart::Leg2L,
        FrogPart::Leg3L,
        FrogPart::Leg1R,
        FrogPart::Leg2R,
        FrogPart::Leg3R,
    ];

    /// Node name in the rig, which is also the stem of the part's model file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FrogPart::Spine => "spine",
            FrogPart::Head => "head",
            FrogPart::Arm1L => "arm_001_L",
            FrogPart::Arm2L => "arm_002_L",
            FrogPart::Arm3L => "arm_003_L",
            FrogPart::Arm1R => "arm_001_R",
            FrogPart::Arm2R => "arm_002_R",
            FrogPart::Arm3R => "arm_003_R",
            FrogPart::Leg1L => "leg_001_L",
            FrogPart::Leg2L => "leg_002_L",
            FrogPart::Leg3L => "leg_003_L",
            FrogPart::Leg1R => "leg_001_R",
            FrogPart::Leg2R => "leg_002_R",
            FrogPart::Leg3R => "leg_003_R",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.name() == name)
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

pub static FROG_TOPOLOGY: &[TopologyEntry] = &[
    TopologyEntry::root("spine"),
    TopologyEntry::child("head", "spine", Vec3::new(0.0, 2.8, 1.29)),
    TopologyEntry::child("arm_001_L", "spine", Vec3::new(0.15, 3.25, 0.85)),
    TopologyEntry::child("arm_002_L", "arm_001_L", Vec3::new(0.85, -1.2, -0.4)),
    TopologyEntry::child("arm_003_L", "arm_002_L", Vec3::new(0.71, -0.57, -0.22)),
    TopologyEntry::child("arm_001_R", "spine", Vec3::new(-0.15, 3.25, 0.85)),
    TopologyEntry::child("arm_002_R", "arm_001_R", Vec3::new(-0.85, -1.2, -0.4)),
    TopologyEntry::child("arm_003_R", "arm_002_R", Vec3::new(-0.71, -0.57, -0.22)),
    TopologyEntry::child("leg_001_L", "spine", Vec3::new(0.39, 1.38, -2.11)),
    TopologyEntry::child("leg_002_L", "leg_001_L", Vec3::new(1.97, -0.12, 1.59)),
    TopologyEntry::child("leg_003_L", "leg_002_L", Vec3::new(-0.94, -0.46, -3.05)),
    TopologyEntry::child("leg_001_R", "spine", Vec3::new(-0.39, 1.38, -2.11)),
    TopologyEntry::child("leg_002_R", "leg_001_R", Vec3::new(-1.97, -0.12, 1.59)),
    TopologyEntry::child("leg_003_R", "leg_002_R", Vec3::new(0.94, -0.46, -3.05)),
];

/// Resolved node handle for every [`FrogPart`].
#[derive(Debug, Clone, Copy)]
pub struct PartMap {
    handles: [NodeHandle; FrogPart::COUNT],
}

impl PartMap {
    /// Looks up every frog part in `rig`.
    pub fn resolve(rig: &Rig) -> Result<Self> {
        let mut handles = [NodeHandle::default(); FrogPart::COUNT];
        for part in FrogPart::ALL {
            handles[part.index()] = rig.require(part.name())?;
        }
        Ok(Self { handles })
    }

    #[inline]
    #[must_use]
    pub fn get(&self, part: FrogPart) -> NodeHandle {
        self.handles[part.index()]
    }
}

/// Builds the frog rig and resolves its part handles.
pub fn build_frog_rig() -> Result<(Rig, PartMap)> {
    let rig = Rig::from_topology(FROG_TOPOLOGY)?;
    let parts = PartMap::resolve(&rig)?;
    Ok((rig, parts))
}
