use crate::error::PhysicsError;
use crate::math::{Aabb, Vector3};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Indexed triangle geometry used to build a collision representation
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CollisionMeshData {
    /// Vertex positions
    pub positions: Vec<Vector3>,

    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

impl CollisionMeshData {
    /// Creates mesh data from vertices and indices without validating it
    pub fn from_positions_and_indices(positions: Vec<Vector3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// A closed unit cube centered at the origin
    pub fn unit_cube() -> Self {
        let h = 0.5;
        let positions = vec![
            Vector3::new(-h, -h, -h),
            Vector3::new(h, -h, -h),
            Vector3::new(h, h, -h),
            Vector3::new(-h, h, -h),
            Vector3::new(-h, -h, h),
            Vector3::new(h, -h, h),
            Vector3::new(h, h, h),
            Vector3::new(-h, h, h),
        ];
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 6, 2, 3, 7, 6, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Self { positions, indices }
    }

    /// A horizontal quad in the XZ plane, the usual floor of a test scene
    pub fn quad(half_x: f32, half_z: f32) -> Self {
        let positions = vec![
            Vector3::new(-half_x, 0.0, -half_z),
            Vector3::new(half_x, 0.0, -half_z),
            Vector3::new(half_x, 0.0, half_z),
            Vector3::new(-half_x, 0.0, half_z),
        ];
        Self {
            positions,
            indices: vec![0, 2, 1, 0, 3, 2],
        }
    }

    /// Returns the number of triangles described by the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the bounds of the vertex positions
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Checks the topology is consistent: non-empty, whole triangles,
    /// indices in range and finite positions
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(PhysicsError::InitializationFailed("collision mesh has no vertices".into()));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(PhysicsError::InitializationFailed(format!(
                "collision mesh index count {} is not a non-zero multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.positions.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(PhysicsError::InitializationFailed(format!(
                "collision mesh index {bad} out of range for {vertex_count} vertices"
            )));
        }
        if self.positions.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(PhysicsError::InitializationFailed(
                "collision mesh has non-finite vertex positions".into(),
            ));
        }
        Ok(())
    }

    /// Validates a whole mesh group; an empty group is invalid
    pub fn validate_group(group: &[CollisionMeshData]) -> Result<()> {
        if group.is_empty() {
            return Err(PhysicsError::InitializationFailed("collision mesh group is empty".into()));
        }
        group.iter().try_for_each(Self::validate)
    }

    /// Returns the bounds of every mesh in a group
    pub fn group_bounds(group: &[CollisionMeshData]) -> Option<Aabb> {
        group
            .iter()
            .filter_map(Self::bounds)
            .reduce(|a, b| a.union(&b))
    }
}
