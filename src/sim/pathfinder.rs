use crate::assets::CollisionMeshData;
use crate::error::PhysicsError;
use crate::math::{Aabb, Vector3};
use crate::Result;

/// Navigability queries over a loaded scene.
///
/// Only the horizontal extent of the scene's collision geometry is used:
/// a point is navigable when it lies inside the scene bounds in x and z.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFinder {
    scene_id: String,
    bounds: Aabb,
}

impl PathFinder {
    /// Derives a path finder from the collision meshes of a scene
    pub fn from_scene(scene_id: impl Into<String>, mesh_group: &[CollisionMeshData]) -> Result<Self> {
        let scene_id = scene_id.into();
        let bounds = CollisionMeshData::group_bounds(mesh_group)
            .ok_or_else(|| PhysicsError::InitializationFailed(format!("scene '{scene_id}' has no geometry")))?;
        Ok(Self { scene_id, bounds })
    }

    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn is_navigable(&self, point: Vector3) -> bool {
        // height is ignored
        let on_floor = Vector3::new(point.x, self.bounds.center().y, point.z);
        self.bounds.contains_point(on_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigability_ignores_height() {
        let finder = PathFinder::from_scene("floor", &[CollisionMeshData::quad(2.0, 3.0)]).unwrap();

        assert!(finder.is_navigable(Vector3::new(1.5, 100.0, -2.5)));
        assert!(!finder.is_navigable(Vector3::new(2.5, 0.0, 0.0)));
        assert_eq!(finder.scene_id(), "floor");
    }

    #[test]
    fn empty_scene_has_no_path_finder() {
        assert!(PathFinder::from_scene("void", &[]).is_err());
    }
}
