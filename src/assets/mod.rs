//! Narrow collaborator surface for templates and collision geometry.
//!
//! Everything here is consumed read-only by the physics layer.

mod mesh;
mod attributes;
mod resource_manager;

pub use self::mesh::CollisionMeshData;
pub use self::attributes::{PhysicsObjectAttributes, PhysicsSceneAttributes};
pub use self::resource_manager::ResourceManager;
