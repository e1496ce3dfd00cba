use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::{CollisionMeshData, PhysicsObjectAttributes, PhysicsSceneAttributes};
use crate::error::PhysicsError;
use crate::Result;

/// Registry of templates and collision mesh groups.
///
/// Loading assets from disk is somebody else's job; this only hands out
/// what was registered, by handle.
#[derive(Debug, Default, Clone)]
pub struct ResourceManager {
    object_templates: BTreeMap<String, Arc<PhysicsObjectAttributes>>,
    scene_templates: BTreeMap<String, Arc<PhysicsSceneAttributes>>,
    collision_meshes: BTreeMap<String, Arc<Vec<CollisionMeshData>>>,
}

impl ResourceManager {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collision mesh group, replacing any group under the same handle
    pub fn register_collision_mesh(&mut self, handle: impl Into<String>, group: Vec<CollisionMeshData>) {
        self.collision_meshes.insert(handle.into(), Arc::new(group));
    }

    /// Registers an object template under its own handle and returns the shared copy
    pub fn register_object_template(&mut self, attributes: PhysicsObjectAttributes) -> Arc<PhysicsObjectAttributes> {
        let shared = Arc::new(attributes);
        self.object_templates.insert(shared.handle.clone(), Arc::clone(&shared));
        shared
    }

    /// Registers scene attributes under their own handle
    pub fn register_scene(&mut self, attributes: PhysicsSceneAttributes) -> Arc<PhysicsSceneAttributes> {
        let shared = Arc::new(attributes);
        self.scene_templates.insert(shared.handle.clone(), Arc::clone(&shared));
        shared
    }

    /// Gets an object template by handle
    pub fn get_object_attributes(&self, handle: &str) -> Result<Arc<PhysicsObjectAttributes>> {
        self.object_templates
            .get(handle)
            .cloned()
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("object template '{handle}' not found")))
    }

    /// Gets scene attributes by handle
    pub fn get_scene_attributes(&self, handle: &str) -> Result<Arc<PhysicsSceneAttributes>> {
        self.scene_templates
            .get(handle)
            .cloned()
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("scene '{handle}' not found")))
    }

    /// Gets a collision mesh group by handle
    pub fn get_collision_mesh_group(&self, handle: &str) -> Result<Arc<Vec<CollisionMeshData>>> {
        self.collision_meshes
            .get(handle)
            .cloned()
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("collision mesh '{handle}' not found")))
    }

    /// Returns the handles of all registered object templates
    pub fn object_template_handles(&self) -> Vec<&str> {
        self.object_templates.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_shared_not_copied() {
        let mut resources = ResourceManager::new();
        let registered = resources.register_object_template(PhysicsObjectAttributes::new("box", "cube"));

        let fetched = resources.get_object_attributes("box").unwrap();

        assert!(Arc::ptr_eq(&registered, &fetched));
        assert_eq!(resources.object_template_handles(), vec!["box"]);
    }

    #[test]
    fn missing_handles_are_reported() {
        let resources = ResourceManager::new();

        assert!(matches!(resources.get_scene_attributes("nowhere"), Err(PhysicsError::ResourceNotFound(_))));
        assert!(resources.get_collision_mesh_group("nothing").is_err());
    }
}
