use std::sync::Arc;

use crate::assets::{CollisionMeshData, PhysicsObjectAttributes, PhysicsSceneAttributes, ResourceManager};
use crate::bodies::{is_transition_legal, DynamicsBackend, MotionType, RigidObjectType};
use crate::core::Configuration;
use crate::error::PhysicsError;
use crate::integration::VelocityControl;
use crate::math::{self, Matrix3, Quaternion, Transform, Vector3};
use crate::scene::{NodeHandle, SceneGraph};
use crate::Result;

/// Template an object was built from
#[derive(Debug, Clone)]
pub enum InitializationAttributes {
    Scene(Arc<PhysicsSceneAttributes>),
    Object(Arc<PhysicsObjectAttributes>),
}

/// A single physical entity attached to a scene node.
///
/// The object owns its motion type and velocity control. Its pose lives in
/// the [`SceneGraph`], which is passed in by the caller for every operation
/// that reads or writes it. Anything engine-side is delegated to the
/// object's [`DynamicsBackend`].
#[derive(Debug)]
pub struct RigidObject {
    node: NodeHandle,
    backend: Box<dyn DynamicsBackend>,
    object_motion_type: MotionType,
    rigid_object_type: RigidObjectType,
    initialization_attributes: Option<InitializationAttributes>,
    velocity_control: VelocityControl,
    attributes: Configuration,

    /// Child node carrying the render asset
    pub visual_node: Option<NodeHandle>,

    /// Child node carrying the bounding-box collision proxy, if any
    pub bb_node: Option<NodeHandle>,
}

impl RigidObject {
    /// Creates an uninitialized object bound to `node`
    pub fn new(node: NodeHandle, backend: Box<dyn DynamicsBackend>) -> Self {
        Self {
            node,
            backend,
            object_motion_type: MotionType::Error,
            rigid_object_type: RigidObjectType::None,
            initialization_attributes: None,
            velocity_control: VelocityControl::default(),
            attributes: Configuration::new(),
            visual_node: None,
            bb_node: None,
        }
    }

    /// Returns the scene node this object is attached to
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Whether one of the initialization entry points has succeeded
    pub fn is_initialized(&self) -> bool {
        self.rigid_object_type != RigidObjectType::None
    }

    /// Returns whether this is scene geometry or an object
    pub fn rigid_object_type(&self) -> RigidObjectType {
        self.rigid_object_type
    }

    /// Returns the current motion type; `MotionType::Error` before initialization
    pub fn get_motion_type(&self) -> MotionType {
        self.object_motion_type
    }

    /// Name of the dynamics backend driving this object
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether the backend can simulate this object as dynamic
    pub fn supports_dynamics(&self) -> bool {
        self.backend.supports_dynamics()
    }

    // Initialization

    /// Initializes the object as static scene geometry
    pub fn initialize_scene(
        &mut self,
        resources: &ResourceManager,
        attributes: Arc<PhysicsSceneAttributes>,
        mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        self.check_uninitialized()?;
        CollisionMeshData::validate_group(mesh_group).map_err(|e| self.initialization_failed(e))?;
        self.backend
            .initialize_scene_finalize(resources, &attributes, mesh_group)
            .map_err(|e| self.initialization_failed(e))?;

        self.rigid_object_type = RigidObjectType::Scene;
        self.object_motion_type = MotionType::Static;
        self.initialization_attributes = Some(InitializationAttributes::Scene(attributes));
        log::debug!("initialized scene object on {}", self.node);
        Ok(())
    }

    /// Initializes the object as a movable object; it starts out kinematic
    pub fn initialize_object(
        &mut self,
        resources: &ResourceManager,
        attributes: Arc<PhysicsObjectAttributes>,
        mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        self.check_uninitialized()?;
        CollisionMeshData::validate_group(mesh_group).map_err(|e| self.initialization_failed(e))?;
        self.backend
            .initialize_object_finalize(resources, &attributes, mesh_group)
            .map_err(|e| self.initialization_failed(e))?;

        self.rigid_object_type = RigidObjectType::Object;
        self.object_motion_type = MotionType::Kinematic;
        self.initialization_attributes = Some(InitializationAttributes::Object(attributes));
        log::debug!("initialized object '{}' on {}", self.template_handle(), self.node);
        Ok(())
    }

    /// Post-creation processing, run by the owner once setup is complete
    pub fn finalize_object(&mut self) -> Result<()> {
        self.check_initialized("finalize_object")?;
        self.backend.finalize_object();
        Ok(())
    }

    fn check_uninitialized(&self) -> Result<()> {
        if self.is_initialized() {
            log::error!("{} is already initialized as {:?}", self.node, self.rigid_object_type);
            return Err(PhysicsError::AlreadyInitialized);
        }
        Ok(())
    }

    fn check_initialized(&self, operation: &str) -> Result<()> {
        if !self.is_initialized() {
            log::error!("{operation} called on uninitialized object {}", self.node);
            return Err(PhysicsError::NotInitialized);
        }
        Ok(())
    }

    fn initialization_failed(&self, error: PhysicsError) -> PhysicsError {
        log::warn!("initialization of {} failed: {error}", self.node);
        match error {
            PhysicsError::InitializationFailed(_) => error,
            other => PhysicsError::InitializationFailed(other.to_string()),
        }
    }

    fn template_handle(&self) -> &str {
        match &self.initialization_attributes {
            Some(InitializationAttributes::Object(attributes)) => &attributes.handle,
            Some(InitializationAttributes::Scene(attributes)) => &attributes.handle,
            None => "",
        }
    }

    // Motion type

    /// Switches the motion type if the transition is legal for this object
    /// and the backend accepts it. On failure nothing changes.
    pub fn set_motion_type(&mut self, requested: MotionType) -> Result<()> {
        self.check_initialized("set_motion_type")?;

        let current = self.object_motion_type;
        if !is_transition_legal(self.rigid_object_type, current, requested, self.backend.supports_dynamics()) {
            return Err(PhysicsError::IllegalMotionType {
                object_type: self.rigid_object_type,
                current,
                requested,
            });
        }
        if current == requested {
            return Ok(());
        }

        self.backend.set_motion_type(current, requested)?;
        self.object_motion_type = requested;
        log::debug!("{} motion type {current:?} -> {requested:?}", self.node);
        Ok(())
    }

    // Kinematic mutation

    /// Decides whether a kinematic edit goes ahead: `Ok(false)` means the
    /// edit is ignored because the object is static.
    fn begin_kinematic_edit(&self, graph: &SceneGraph, operation: &str) -> Result<bool> {
        self.check_initialized(operation)?;
        if !graph.is_alive(self.node) {
            log::error!("{operation} on {} whose node was removed", self.node);
            return Err(PhysicsError::NodeNotFound(self.node));
        }

        if !self.object_motion_type.allows_kinematic_updates() {
            log::warn!("{operation} ignored: {} is static", self.node);
            return Ok(false);
        }
        if self.object_motion_type.allows_forces() {
            log::warn!("{operation} on dynamic {}: kinematic updates on dynamic objects are not recommended", self.node);
        }
        Ok(true)
    }

    /// Applies `edit` to the node's local transform and syncs the backend
    fn edit_transformation<F>(&mut self, graph: &mut SceneGraph, operation: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Transform),
    {
        if !self.begin_kinematic_edit(graph, operation)? {
            return Ok(());
        }

        let mut transformation = graph.transformation(self.node)?;
        edit(&mut transformation);
        graph.set_transformation(self.node, transformation)?;
        self.sync_to_backend(graph)
    }

    /// Pushes the node's current world pose to the backend
    pub fn sync_to_backend(&mut self, graph: &SceneGraph) -> Result<()> {
        let pose = graph.absolute_transformation(self.node)?;
        self.backend.sync_pose(&pose);
        Ok(())
    }

    /// Returns the node's local transform
    pub fn get_transformation(&self, graph: &SceneGraph) -> Result<Transform> {
        graph.transformation(self.node)
    }

    /// Returns the node's local translation
    pub fn get_translation(&self, graph: &SceneGraph) -> Result<Vector3> {
        Ok(graph.transformation(self.node)?.position)
    }

    /// Returns the node's local rotation
    pub fn get_rotation(&self, graph: &SceneGraph) -> Result<Quaternion> {
        Ok(graph.transformation(self.node)?.rotation)
    }

    /// Replaces the node's local transform
    pub fn set_transformation(&mut self, graph: &mut SceneGraph, transformation: Transform) -> Result<()> {
        self.edit_transformation(graph, "set_transformation", |t| *t = transformation)
    }

    /// Replaces the node's local translation
    pub fn set_translation(&mut self, graph: &mut SceneGraph, translation: Vector3) -> Result<()> {
        self.edit_transformation(graph, "set_translation", |t| t.position = translation)
    }

    /// Replaces the node's local rotation
    pub fn set_rotation(&mut self, graph: &mut SceneGraph, rotation: Quaternion) -> Result<()> {
        self.edit_transformation(graph, "set_rotation", |t| t.rotation = rotation)
    }

    /// Translates in the parent frame
    pub fn translate(&mut self, graph: &mut SceneGraph, vector: Vector3) -> Result<()> {
        self.edit_transformation(graph, "translate", |t| t.position += vector)
    }

    /// Translates along the object's own axes
    pub fn translate_local(&mut self, graph: &mut SceneGraph, vector: Vector3) -> Result<()> {
        self.edit_transformation(graph, "translate_local", |t| {
            let offset = t.transform_direction(vector);
            t.position += offset;
        })
    }

    /// Rotates by `angle` radians about `axis` in the parent frame
    pub fn rotate(&mut self, graph: &mut SceneGraph, angle: f32, axis: Vector3) -> Result<()> {
        let delta = math::axis_angle(axis, angle);
        self.edit_transformation(graph, "rotate", |t| {
            t.rotation = Quaternion::new_normalize((delta * t.rotation).into_inner())
        })
    }

    /// Rotates by `angle` radians about `axis` in the object's own frame
    pub fn rotate_local(&mut self, graph: &mut SceneGraph, angle: f32, axis: Vector3) -> Result<()> {
        let delta = math::axis_angle(axis, angle);
        self.edit_transformation(graph, "rotate_local", |t| {
            t.rotation = Quaternion::new_normalize((t.rotation * delta).into_inner())
        })
    }

    /// Rotates about the parent's x axis
    pub fn rotate_x(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate(graph, angle, math::x_axis())
    }

    /// Rotates about the parent's y axis
    pub fn rotate_y(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate(graph, angle, math::y_axis())
    }

    /// Rotates about the parent's z axis
    pub fn rotate_z(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate(graph, angle, math::z_axis())
    }

    /// Rotates about the object's own x axis
    pub fn rotate_x_local(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate_local(graph, angle, math::x_axis())
    }

    /// Rotates about the object's own y axis
    pub fn rotate_y_local(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate_local(graph, angle, math::y_axis())
    }

    /// Rotates about the object's own z axis
    pub fn rotate_z_local(&mut self, graph: &mut SceneGraph, angle: f32) -> Result<()> {
        self.rotate_local(graph, angle, math::z_axis())
    }

    /// Not implemented: always fails and leaves the pose unchanged
    pub fn reset_transformation(&mut self, _graph: &mut SceneGraph) -> Result<()> {
        log::warn!("reset_transformation is not implemented; {} keeps its pose", self.node);
        Err(PhysicsError::Unimplemented("reset_transformation"))
    }

    // Origin shifting

    /// Moves the object's local origin by `shift`: every child of the node
    /// is translated by `-shift`. The node itself stays put.
    pub fn shift_origin(&mut self, graph: &mut SceneGraph, shift: Vector3) -> Result<()> {
        self.check_initialized("shift_origin")?;
        let children = graph.children(self.node)?.to_vec();
        for child in children {
            let mut transformation = graph.transformation(child)?;
            transformation.position -= shift;
            graph.set_transformation(child, transformation)?;
        }
        Ok(())
    }

    /// Shifts the origin so the cumulative bounding box is centered on it
    pub fn shift_origin_to_bb_center(&mut self, graph: &mut SceneGraph) -> Result<()> {
        self.check_initialized("shift_origin_to_bb_center")?;
        match graph.cumulative_bb(self.node)? {
            Some(bounds) => self.shift_origin(graph, bounds.center()),
            None => Ok(()),
        }
    }

    // Stepping

    /// Applies the velocity control for one step of `dt`.
    ///
    /// Kinematic objects have their pose integrated directly. Dynamic objects
    /// get the commanded velocities set on the backend instead.
    pub fn apply_velocity_control(&mut self, graph: &mut SceneGraph, dt: f32) -> Result<()> {
        if !self.velocity_control.is_active() {
            return Ok(());
        }

        match self.object_motion_type {
            MotionType::Kinematic => {
                let current = graph.transformation(self.node)?;
                let next = self.velocity_control.integrate_transform(dt, &current);
                graph.set_transformation(self.node, next)?;
                self.sync_to_backend(graph)
            }
            MotionType::Dynamic => {
                let pose = graph.absolute_transformation(self.node)?;
                let (linear, angular) = self.velocity_control.world_velocities(&pose);
                if self.velocity_control.controlling_lin_vel {
                    self.backend.set_linear_velocity(linear);
                }
                if self.velocity_control.controlling_ang_vel {
                    self.backend.set_angular_velocity(angular);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Runs the backend's dynamics for `dt` and writes the resulting pose
    /// into the node. Returns whether the object moved.
    pub fn step_dynamics(&mut self, graph: &mut SceneGraph, dt: f32, gravity: Vector3) -> Result<bool> {
        if !self.object_motion_type.allows_forces() {
            return Ok(false);
        }

        let Some(world) = self.backend.step(dt, gravity) else {
            return Ok(false);
        };

        let parent_world = match graph.parent(self.node)? {
            Some(parent) => graph.absolute_transformation(parent)?,
            None => Transform::identity(),
        };
        let mut local = parent_world.inverse().combine(&world);
        local.scale = graph.transformation(self.node)?.scale;
        graph.set_transformation(self.node, local)?;
        Ok(true)
    }

    // Forces and velocities

    /// Forwards a backend mutation once the object is initialized; before
    /// that the call is logged and dropped.
    fn forward_to_backend<F>(&mut self, operation: &str, forward: F)
    where
        F: FnOnce(&mut dyn DynamicsBackend),
    {
        if self.check_initialized(operation).is_ok() {
            forward(self.backend.as_mut());
        }
    }

    /// Applies a world-space force at `rel_pos` relative to the center of mass
    pub fn apply_force(&mut self, force: Vector3, rel_pos: Vector3) {
        self.forward_to_backend("apply_force", |backend| backend.apply_force(force, rel_pos));
    }

    /// Applies a world-space impulse at `rel_pos` relative to the center of mass
    pub fn apply_impulse(&mut self, impulse: Vector3, rel_pos: Vector3) {
        self.forward_to_backend("apply_impulse", |backend| backend.apply_impulse(impulse, rel_pos));
    }

    /// Applies a world-space torque
    pub fn apply_torque(&mut self, torque: Vector3) {
        self.forward_to_backend("apply_torque", |backend| backend.apply_torque(torque));
    }

    /// Applies a world-space angular impulse
    pub fn apply_impulse_torque(&mut self, impulse: Vector3) {
        self.forward_to_backend("apply_impulse_torque", |backend| backend.apply_impulse_torque(impulse));
    }

    /// Sets the engine's linear velocity; ignored unless the object is dynamic
    pub fn set_linear_velocity(&mut self, velocity: Vector3) {
        self.forward_to_backend("set_linear_velocity", |backend| backend.set_linear_velocity(velocity));
    }

    /// Sets the engine's angular velocity; ignored unless the object is dynamic
    pub fn set_angular_velocity(&mut self, velocity: Vector3) {
        self.forward_to_backend("set_angular_velocity", |backend| backend.set_angular_velocity(velocity));
    }

    /// Gets the engine's linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.backend.get_linear_velocity()
    }

    /// Gets the engine's angular velocity
    pub fn get_angular_velocity(&self) -> Vector3 {
        self.backend.get_angular_velocity()
    }

    /// Whether the object is being actively simulated rather than sleeping
    pub fn is_active(&self) -> bool {
        self.backend.is_active()
    }

    /// Wakes the object up
    pub fn set_active(&mut self) {
        self.forward_to_backend("set_active", |backend| backend.set_active());
    }

    // Physical parameters

    /// Gets the mass
    pub fn get_mass(&self) -> f64 {
        self.backend.get_mass()
    }

    /// Sets the mass
    pub fn set_mass(&mut self, mass: f64) {
        self.forward_to_backend("set_mass", |backend| backend.set_mass(mass));
    }

    /// Gets the center of mass in the object's frame
    pub fn get_com(&self) -> Vector3 {
        self.backend.get_com()
    }

    /// Sets the center of mass in the object's frame
    pub fn set_com(&mut self, com: Vector3) {
        self.forward_to_backend("set_com", |backend| backend.set_com(com));
    }

    /// Gets the diagonal of the inertia tensor
    pub fn get_inertia_vector(&self) -> Vector3 {
        self.backend.get_inertia_vector()
    }

    /// Sets the diagonal of the inertia tensor
    pub fn set_inertia_vector(&mut self, inertia: Vector3) {
        self.forward_to_backend("set_inertia_vector", |backend| backend.set_inertia_vector(inertia));
    }

    /// Gets the inertia tensor
    pub fn get_inertia_matrix(&self) -> Matrix3 {
        self.backend.get_inertia_matrix()
    }

    /// Gets the friction coefficient
    pub fn get_friction_coefficient(&self) -> f64 {
        self.backend.get_friction_coefficient()
    }

    /// Sets the friction coefficient
    pub fn set_friction_coefficient(&mut self, friction: f64) {
        self.forward_to_backend("set_friction_coefficient", |backend| {
            backend.set_friction_coefficient(friction)
        });
    }

    /// Gets the restitution coefficient
    pub fn get_restitution_coefficient(&self) -> f64 {
        self.backend.get_restitution_coefficient()
    }

    /// Sets the restitution coefficient
    pub fn set_restitution_coefficient(&mut self, restitution: f64) {
        self.forward_to_backend("set_restitution_coefficient", |backend| {
            backend.set_restitution_coefficient(restitution)
        });
    }

    /// Gets the linear damping
    pub fn get_linear_damping(&self) -> f64 {
        self.backend.get_linear_damping()
    }

    /// Sets the linear damping
    pub fn set_linear_damping(&mut self, damping: f64) {
        self.forward_to_backend("set_linear_damping", |backend| backend.set_linear_damping(damping));
    }

    /// Gets the angular damping
    pub fn get_angular_damping(&self) -> f64 {
        self.backend.get_angular_damping()
    }

    /// Sets the angular damping
    pub fn set_angular_damping(&mut self, damping: f64) {
        self.forward_to_backend("set_angular_damping", |backend| backend.set_angular_damping(damping));
    }

    /// Returns the template scale; ones for scenes and uninitialized objects
    pub fn get_scale(&self) -> Vector3 {
        match &self.initialization_attributes {
            Some(InitializationAttributes::Object(attributes)) => attributes.scale,
            _ => Vector3::repeat(1.0),
        }
    }

    // Attributes

    /// Returns the template this object was initialized from
    pub fn get_initialization_attributes(&self) -> Option<&InitializationAttributes> {
        self.initialization_attributes.as_ref()
    }

    /// Returns the object template, if this object was built from one
    pub fn get_object_attributes(&self) -> Option<Arc<PhysicsObjectAttributes>> {
        match &self.initialization_attributes {
            Some(InitializationAttributes::Object(attributes)) => Some(Arc::clone(attributes)),
            _ => None,
        }
    }

    /// Returns the scene template, if this object was built from one
    pub fn get_scene_attributes(&self) -> Option<Arc<PhysicsSceneAttributes>> {
        match &self.initialization_attributes {
            Some(InitializationAttributes::Scene(attributes)) => Some(Arc::clone(attributes)),
            _ => None,
        }
    }

    /// Returns the velocity control applied every step
    pub fn get_velocity_control(&self) -> &VelocityControl {
        &self.velocity_control
    }

    /// Returns the velocity control for editing
    pub fn get_velocity_control_mut(&mut self) -> &mut VelocityControl {
        &mut self.velocity_control
    }

    /// User attributes attached to this object
    pub fn attributes(&self) -> &Configuration {
        &self.attributes
    }

    /// User attributes attached to this object, for editing
    pub fn attributes_mut(&mut self) -> &mut Configuration {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EulerDynamics, KinematicBackend};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn object_in(graph: &mut SceneGraph, backend: Box<dyn DynamicsBackend>) -> RigidObject {
        let node = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let mut object = RigidObject::new(node, backend);
        object
            .initialize_object(
                &ResourceManager::new(),
                Arc::new(PhysicsObjectAttributes::default()),
                &[CollisionMeshData::unit_cube()],
            )
            .unwrap();
        object
    }

    #[test]
    fn uninitialized_object_rejects_mutation() {
        let mut graph = SceneGraph::new();
        let node = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let mut object = RigidObject::new(node, Box::new(KinematicBackend));

        assert_eq!(object.get_motion_type(), MotionType::Error);
        assert!(matches!(object.translate(&mut graph, Vector3::x()), Err(PhysicsError::NotInitialized)));
        assert!(matches!(object.set_motion_type(MotionType::Static), Err(PhysicsError::NotInitialized)));
        assert!(matches!(object.finalize_object(), Err(PhysicsError::NotInitialized)));
    }

    #[test]
    fn uninitialized_object_ignores_backend_mutation() {
        let mut graph = SceneGraph::new();
        let node = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let child = graph.add_child(node, Transform::identity()).unwrap();
        let mut object = RigidObject::new(node, Box::new(EulerDynamics::default()));
        let mass = object.get_mass();

        object.set_mass(5.0);
        object.set_friction_coefficient(0.9);
        object.apply_impulse(Vector3::x(), Vector3::zeros());
        object.set_linear_velocity(Vector3::y());
        object.set_active();

        assert!(!object.is_initialized());
        assert_eq!(object.get_mass(), mass);
        assert_eq!(object.get_linear_velocity(), Vector3::zeros());
        assert_eq!(
            object.shift_origin(&mut graph, Vector3::x()),
            Err(PhysicsError::NotInitialized)
        );
        assert_eq!(
            object.shift_origin_to_bb_center(&mut graph),
            Err(PhysicsError::NotInitialized)
        );
        assert_eq!(graph.transformation(child).unwrap().position, Vector3::zeros());
    }

    #[test]
    fn failed_initialization_can_be_retried() {
        let mut graph = SceneGraph::new();
        let node = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let mut object = RigidObject::new(node, Box::new(KinematicBackend));
        let resources = ResourceManager::new();
        let attributes = Arc::new(PhysicsObjectAttributes::default());

        let broken = CollisionMeshData::from_positions_and_indices(vec![Vector3::zeros()], vec![0, 1, 2]);
        let result = object.initialize_object(&resources, Arc::clone(&attributes), &[broken]);
        assert!(matches!(result, Err(PhysicsError::InitializationFailed(_))));
        assert_eq!(object.rigid_object_type(), RigidObjectType::None);

        object
            .initialize_object(&resources, attributes, &[CollisionMeshData::unit_cube()])
            .unwrap();
        assert_eq!(object.get_motion_type(), MotionType::Kinematic);
    }

    #[test]
    fn kinematic_edit_on_static_object_is_ignored() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(KinematicBackend));
        object.set_motion_type(MotionType::Static).unwrap();

        object.translate(&mut graph, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        object.rotate_y(&mut graph, 1.0).unwrap();

        assert_eq!(object.get_transformation(&graph).unwrap(), Transform::identity());
    }

    #[test]
    fn translate_local_follows_orientation() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(KinematicBackend));

        object.rotate_y(&mut graph, FRAC_PI_2).unwrap();
        object.translate_local(&mut graph, Vector3::x()).unwrap();

        assert_relative_eq!(object.get_translation(&graph).unwrap(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn kinematic_edits_sync_the_backend_pose() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(EulerDynamics::default()));
        object.set_motion_type(MotionType::Dynamic).unwrap();

        object.set_translation(&mut graph, Vector3::new(0.0, 10.0, 0.0)).unwrap();
        assert!(object.step_dynamics(&mut graph, 0.1, Vector3::zeros()).unwrap());

        // stepping from the synced pose, not from the origin
        assert_relative_eq!(object.get_translation(&graph).unwrap(), Vector3::new(0.0, 10.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn velocity_control_moves_kinematic_objects() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(KinematicBackend));
        *object.get_velocity_control_mut() = VelocityControl::new().with_linear(Vector3::new(0.0, 0.0, 2.0), false);

        object.apply_velocity_control(&mut graph, 0.5).unwrap();

        assert_relative_eq!(object.get_translation(&graph).unwrap(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn velocity_control_drives_dynamic_objects_through_the_backend() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(EulerDynamics::default()));
        object.set_motion_type(MotionType::Dynamic).unwrap();
        *object.get_velocity_control_mut() = VelocityControl::new().with_linear(Vector3::x(), false);

        object.apply_velocity_control(&mut graph, 0.1).unwrap();

        assert_eq!(object.get_translation(&graph).unwrap(), Vector3::zeros());
        assert_relative_eq!(object.get_linear_velocity(), Vector3::x());
    }

    #[test]
    fn shift_origin_moves_children_only() {
        let mut graph = SceneGraph::new();
        let mut object = object_in(&mut graph, Box::new(KinematicBackend));
        let child = graph.add_child(object.node(), Transform::identity()).unwrap();

        object.shift_origin(&mut graph, Vector3::new(1.0, 0.0, 0.0)).unwrap();

        // the origin moved to +x, so the content sits at -x relative to it
        assert_eq!(graph.transformation(child).unwrap().position, -Vector3::x());
        assert_eq!(object.get_translation(&graph).unwrap(), Vector3::zeros());
    }

    #[test]
    fn scale_comes_from_the_template() {
        let mut graph = SceneGraph::new();
        let node = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let mut object = RigidObject::new(node, Box::new(KinematicBackend));
        assert_eq!(object.get_scale(), Vector3::repeat(1.0));

        let attributes = PhysicsObjectAttributes::default().with_scale(Vector3::repeat(3.0));
        object
            .initialize_object(&ResourceManager::new(), Arc::new(attributes), &[CollisionMeshData::unit_cube()])
            .unwrap();

        assert_eq!(object.get_scale(), Vector3::repeat(3.0));
        assert!(object.get_scene_attributes().is_none());
    }
}
