pub mod config;
pub mod configuration;
pub mod storage;
pub mod events;
mod manager;

pub use self::config::{PhysicsConfig, PhysicsSimulationLibrary};
pub use self::configuration::{ConfigValue, Configuration};
pub use self::storage::{Handle, HandleStorage};
pub use self::events::{EventQueue, ObjectEvent, ObjectEventType};
pub use self::manager::PhysicsManager;

/// A unique identifier for an object owned by a [`PhysicsManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub(crate) u32);

impl Handle for ObjectId {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}
