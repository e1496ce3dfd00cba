use crate::assets::{CollisionMeshData, PhysicsObjectAttributes, PhysicsSceneAttributes, ResourceManager};
use crate::bodies::MotionType;
use crate::math::{Matrix3, Transform, Vector3};
use crate::Result;

/// Extension points a physics engine implements for one rigid object.
///
/// Every method has the solver-less default: initialization succeeds with
/// nothing built, forces and velocities are ignored, physical parameters
/// read as zero and the object never sleeps. A [`crate::bodies::RigidObject`]
/// only calls into its backend after it has checked that the requested
/// operation is legal for its current state.
pub trait DynamicsBackend: std::fmt::Debug + Send {
    /// Returns the name of the backend
    fn name(&self) -> &str;

    /// Whether objects using this backend may become [`MotionType::Dynamic`]
    fn supports_dynamics(&self) -> bool {
        false
    }

    /// Builds engine-side state for static scene geometry
    fn initialize_scene_finalize(
        &mut self,
        _resources: &ResourceManager,
        _attributes: &PhysicsSceneAttributes,
        _mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        Ok(())
    }

    /// Builds engine-side state for a movable object
    fn initialize_object_finalize(
        &mut self,
        _resources: &ResourceManager,
        _attributes: &PhysicsObjectAttributes,
        _mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        Ok(())
    }

    /// Post-creation processing once the owner has finished setting the object up
    fn finalize_object(&mut self) {}

    /// Allocates or releases engine state for a legal motion-type change.
    /// An error vetoes the change.
    fn set_motion_type(&mut self, _current: MotionType, _requested: MotionType) -> Result<()> {
        Ok(())
    }

    /// Receives the world pose after a kinematic change
    fn sync_pose(&mut self, _pose: &Transform) {}

    /// Advances engine-owned motion by `dt`. Returns the new world pose if
    /// the engine moved the object.
    fn step(&mut self, _dt: f32, _gravity: Vector3) -> Option<Transform> {
        None
    }

    /// Whether the object is being actively simulated rather than sleeping
    fn is_active(&self) -> bool {
        true
    }

    /// Wakes the object up
    fn set_active(&mut self) {}

    /// Applies a world-space force at `rel_pos` relative to the center of mass
    fn apply_force(&mut self, _force: Vector3, _rel_pos: Vector3) {}

    /// Applies a world-space impulse at `rel_pos` relative to the center of mass
    fn apply_impulse(&mut self, _impulse: Vector3, _rel_pos: Vector3) {}

    /// Applies an internal torque
    fn apply_torque(&mut self, _torque: Vector3) {}

    /// Applies an internal impulse torque
    fn apply_impulse_torque(&mut self, _impulse: Vector3) {}

    fn set_linear_velocity(&mut self, _velocity: Vector3) {}

    fn set_angular_velocity(&mut self, _velocity: Vector3) {}

    fn get_linear_velocity(&self) -> Vector3 {
        Vector3::zeros()
    }

    fn get_angular_velocity(&self) -> Vector3 {
        Vector3::zeros()
    }

    fn get_mass(&self) -> f64 {
        0.0
    }

    fn set_mass(&mut self, _mass: f64) {}

    /// Center of mass in the object's local frame
    fn get_com(&self) -> Vector3 {
        Vector3::zeros()
    }

    fn set_com(&mut self, _com: Vector3) {}

    /// Diagonal of the inertia matrix
    fn get_inertia_vector(&self) -> Vector3 {
        Vector3::zeros()
    }

    fn set_inertia_vector(&mut self, _inertia: Vector3) {}

    /// Full inertia matrix; backends without off-diagonal terms use the diagonal
    fn get_inertia_matrix(&self) -> Matrix3 {
        Matrix3::from_diagonal(&self.get_inertia_vector())
    }

    fn get_friction_coefficient(&self) -> f64 {
        0.0
    }

    fn set_friction_coefficient(&mut self, _friction: f64) {}

    fn get_restitution_coefficient(&self) -> f64 {
        0.0
    }

    fn set_restitution_coefficient(&mut self, _restitution: f64) {}

    fn get_linear_damping(&self) -> f64 {
        0.0
    }

    fn set_linear_damping(&mut self, _damping: f64) {}

    fn get_angular_damping(&self) -> f64 {
        0.0
    }

    fn set_angular_damping(&mut self, _damping: f64) {}
}

/// Backend without a dynamics engine: objects are at most kinematic
#[derive(Debug, Default, Clone, Copy)]
pub struct KinematicBackend;

impl DynamicsBackend for KinematicBackend {
    fn name(&self) -> &str {
        "kinematic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinematic_backend_reports_unsimulated_defaults() {
        let mut backend = KinematicBackend;
        backend.set_mass(12.0);
        backend.apply_force(Vector3::x(), Vector3::zeros());
        backend.set_linear_velocity(Vector3::y());

        assert!(!backend.supports_dynamics());
        assert!(backend.is_active());
        assert_eq!(backend.get_mass(), 0.0);
        assert_eq!(backend.get_linear_velocity(), Vector3::zeros());
        assert_eq!(backend.get_inertia_matrix(), Matrix3::zeros());
        assert!(backend.step(1.0, Vector3::new(0.0, -9.8, 0.0)).is_none());
    }
}
