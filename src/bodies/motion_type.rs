#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Motion type of a rigid object, determining which operations are meaningful on it.
///
/// Variants are ordered by capability: `Static < Kinematic < Dynamic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MotionType {
    /// Refers to an error, such as a query on an object that does not exist
    /// or has not been initialized
    Error,

    /// Not expected to move; kinematic updates are ignored.
    /// Scene collision geometry is always static.
    Static,

    /// Moved by script, not simulated. Default for objects without a dynamics engine.
    Kinematic,

    /// Simulated by a dynamics engine. Can, but should not, be moved kinematically.
    Dynamic,
}

impl MotionType {
    /// Whether kinematic pose edits have any effect
    pub fn allows_kinematic_updates(self) -> bool {
        matches!(self, Self::Kinematic | Self::Dynamic)
    }

    /// Whether forces, impulses and engine-owned velocities have any effect
    pub fn allows_forces(self) -> bool {
        self == Self::Dynamic
    }
}

/// Role of a rigid object in the physical world. `None` marks an
/// object that has not been initialized yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidObjectType {
    /// Not initialized
    None,

    /// Static scene collision geometry
    Scene,

    /// A standard object tracked by the physics manager
    Object,
}

/// Decides whether an object may switch from `current` to `requested`.
///
/// Scenes may only be static. Objects may always be static or kinematic,
/// and dynamic only when the backend simulates dynamics. Uninitialized
/// objects and `MotionType::Error` requests are never legal.
pub fn is_transition_legal(
    object_type: RigidObjectType,
    current: MotionType,
    requested: MotionType,
    dynamics_supported: bool,
) -> bool {
    if current == MotionType::Error && object_type != RigidObjectType::None {
        // an initialized object never sits in the error state
        return false;
    }

    match (object_type, requested) {
        (RigidObjectType::None, _) | (_, MotionType::Error) => false,
        (RigidObjectType::Scene, requested) => requested == MotionType::Static,
        (RigidObjectType::Object, MotionType::Static | MotionType::Kinematic) => true,
        (RigidObjectType::Object, MotionType::Dynamic) => dynamics_supported,
    }
}
