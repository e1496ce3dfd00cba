pub mod math;
pub mod scene;
pub mod assets;
pub mod core;
pub mod bodies;
pub mod integration;
pub mod sim;

/// Re-export common types for easier usage
pub use crate::core::{ObjectId, PhysicsConfig, PhysicsManager, PhysicsSimulationLibrary};
pub use crate::bodies::{DynamicsBackend, MotionType, RigidObject, RigidObjectType};
pub use crate::scene::{NodeHandle, SceneGraph};
pub use crate::sim::{PathFinder, Simulator, SimulatorConfiguration};
pub use crate::math::{Transform, Vector3};

/// Error types for the physics layer
pub mod error {
    use crate::bodies::{MotionType, RigidObjectType};
    use crate::scene::NodeHandle;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Initialization failed: {0}")]
        InitializationFailed(String),

        #[error("Illegal motion type change for {object_type:?} object: {current:?} -> {requested:?}")]
        IllegalMotionType {
            object_type: RigidObjectType,
            current: MotionType,
            requested: MotionType,
        },

        #[error("Object is already initialized")]
        AlreadyInitialized,

        #[error("Object is not initialized")]
        NotInitialized,

        #[error("Scene node {0} no longer exists")]
        NodeNotFound(NodeHandle),

        #[error("Not implemented: {0}")]
        Unimplemented(&'static str),
    }

    impl PhysicsError {
        /// Whether the caller can recover by retrying with other input.
        /// Misuse of the API is not recoverable.
        pub fn is_recoverable(&self) -> bool {
            matches!(
                self,
                Self::InitializationFailed(_) | Self::IllegalMotionType { .. } | Self::ResourceNotFound(_)
            )
        }
    }
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::error::PhysicsError;
    use super::*;

    #[test]
    fn misuse_is_not_recoverable() {
        assert!(!PhysicsError::AlreadyInitialized.is_recoverable());
        assert!(!PhysicsError::NotInitialized.is_recoverable());
        assert!(!PhysicsError::Unimplemented("reset_transformation").is_recoverable());
        assert!(PhysicsError::InitializationFailed("empty".into()).is_recoverable());
        assert!(PhysicsError::IllegalMotionType {
            object_type: RigidObjectType::Scene,
            current: MotionType::Static,
            requested: MotionType::Dynamic,
        }
        .is_recoverable());
    }
}
