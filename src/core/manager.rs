use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::{CollisionMeshData, PhysicsObjectAttributes, ResourceManager};
use crate::bodies::{MotionType, RigidObject};
use crate::core::events::{EventQueue, ObjectEventType};
use crate::core::storage::HandleStorage;
use crate::core::{ObjectId, PhysicsConfig};
use crate::error::PhysicsError;
use crate::math::{Transform, EPSILON};
use crate::scene::{NodeHandle, SceneGraph};
use crate::Result;

/// Owns the rigid objects of a scene and steps them.
///
/// The manager is the only place objects are created and the only caller
/// that upgrades them to [`MotionType::Dynamic`]. It never owns the scene
/// graph; every operation touching nodes takes it as an argument.
#[derive(Debug)]
pub struct PhysicsManager {
    config: PhysicsConfig,
    objects: HandleStorage<ObjectId, RigidObject>,
    scene: Option<RigidObject>,

    /// Last reported activity of each object, for sleep/awake events
    activity: BTreeMap<ObjectId, bool>,

    events: EventQueue,

    /// The total elapsed simulation time
    world_time: f32,
}

impl PhysicsManager {
    /// Creates an empty manager
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            objects: HandleStorage::new(),
            scene: None,
            activity: BTreeMap::new(),
            events: EventQueue::new(),
            world_time: 0.0,
        }
    }

    /// Returns a reference to the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Whether objects created by this manager may become dynamic
    pub fn dynamics_supported(&self) -> bool {
        self.config.create_backend().supports_dynamics()
    }

    /// Builds the static scene object from the scene template `scene_handle`.
    ///
    /// A previous scene object is replaced and its node removed. The scene's
    /// gravity becomes the gravity of the simulation.
    pub fn add_scene(&mut self, graph: &mut SceneGraph, resources: &ResourceManager, scene_handle: &str) -> Result<NodeHandle> {
        let attributes = resources.get_scene_attributes(scene_handle)?;
        let mesh_group = resources.get_collision_mesh_group(&attributes.collision_mesh_handle)?;

        let node = graph.add_child(graph.root(), Transform::identity())?;
        let built = graph
            .set_mesh_bounds(node, CollisionMeshData::group_bounds(&mesh_group))
            .and_then(|_| {
                let mut scene = RigidObject::new(node, self.config.create_backend());
                scene.initialize_scene(resources, Arc::clone(&attributes), &mesh_group)?;
                scene.finalize_object()?;
                scene.sync_to_backend(graph)?;
                Ok(scene)
            });

        let scene = match built {
            Ok(scene) => scene,
            Err(e) => {
                discard_node(graph, node);
                return Err(e);
            }
        };

        if let Some(previous) = self.scene.replace(scene) {
            if graph.is_alive(previous.node()) {
                graph.remove_node(previous.node())?;
            }
        }
        self.config.gravity = attributes.gravity;

        log::debug!("added scene '{scene_handle}' on {node}");
        Ok(node)
    }

    /// Creates an object from the template `template_handle` under `parent`
    /// (the graph root when `None`).
    ///
    /// The object gets a visual child node scaled by the template and, for
    /// bounding-box collision templates, a bounding-box child. It is made
    /// dynamic when the engine supports it. Nothing is left in the graph
    /// when creation fails.
    pub fn add_object(
        &mut self,
        graph: &mut SceneGraph,
        resources: &ResourceManager,
        template_handle: &str,
        parent: Option<NodeHandle>,
    ) -> Result<ObjectId> {
        let attributes = resources.get_object_attributes(template_handle)?;
        let mesh_group = resources.get_collision_mesh_group(&attributes.collision_mesh_handle)?;

        let parent = parent.unwrap_or_else(|| graph.root());
        let node = graph.add_child(parent, Transform::identity())?;

        let object = match self.build_object(graph, resources, node, attributes, &mesh_group) {
            Ok(object) => object,
            Err(e) => {
                discard_node(graph, node);
                return Err(e);
            }
        };

        let active = object.is_active();
        let id = self.objects.add(object);
        self.activity.insert(id, active);
        self.events.push(ObjectEventType::Added, id);

        log::debug!("added object {id} from '{template_handle}' on {node}");
        Ok(id)
    }

    fn build_object(
        &self,
        graph: &mut SceneGraph,
        resources: &ResourceManager,
        node: NodeHandle,
        attributes: Arc<PhysicsObjectAttributes>,
        mesh_group: &[CollisionMeshData],
    ) -> Result<RigidObject> {
        let mut object = RigidObject::new(node, self.config.create_backend());

        let visual = graph.add_child(node, Transform::from_scale(attributes.scale))?;
        graph.set_mesh_bounds(visual, CollisionMeshData::group_bounds(mesh_group))?;
        object.visual_node = Some(visual);

        if attributes.bounding_box_collisions {
            object.bb_node = Some(graph.add_child(node, Transform::identity())?);
        }

        object.initialize_object(resources, attributes, mesh_group)?;
        object.finalize_object()?;
        object.sync_to_backend(graph)?;

        if object.supports_dynamics() {
            object.set_motion_type(MotionType::Dynamic)?;
        }
        Ok(object)
    }

    /// Removes an object and its node subtree
    pub fn remove_object(&mut self, graph: &mut SceneGraph, id: ObjectId) -> Result<()> {
        let object = self
            .objects
            .remove(id)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("object {id}")))?;
        self.activity.remove(&id);

        if graph.is_alive(object.node()) {
            graph.remove_node(object.node())?;
        }
        self.events.push(ObjectEventType::Removed, id);

        log::debug!("removed object {id}");
        Ok(())
    }

    /// Drops every object whose node is no longer in the graph
    pub fn prune_dead_objects(&mut self, graph: &SceneGraph) -> Vec<ObjectId> {
        let dead: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| !graph.is_alive(object.node()))
            .map(|(id, _)| id)
            .collect();

        for &id in &dead {
            self.objects.remove(id);
            self.activity.remove(&id);
            self.events.push(ObjectEventType::Removed, id);
            log::debug!("pruned object {id} whose node was removed");
        }
        dead
    }

    /// Gets an object by id
    pub fn get_object(&self, id: ObjectId) -> Result<&RigidObject> {
        self.objects
            .get(id)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("object {id}")))
    }

    /// Gets a mutable object by id
    pub fn get_object_mut(&mut self, id: ObjectId) -> Result<&mut RigidObject> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("object {id}")))
    }

    /// Returns the static scene object, if a scene was added
    pub fn get_scene_object(&self) -> Option<&RigidObject> {
        self.scene.as_ref()
    }

    /// Returns the static scene object for editing
    pub fn get_scene_object_mut(&mut self) -> Option<&mut RigidObject> {
        self.scene.as_mut()
    }

    /// Returns the ids of all objects in creation order
    pub fn existing_object_ids(&self) -> Vec<ObjectId> {
        self.objects.handles()
    }

    /// Number of live objects, not counting the scene
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Whether `id` names a live object
    pub fn contains_object(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    /// Changes an object's motion type
    pub fn set_object_motion_type(&mut self, id: ObjectId, motion_type: MotionType) -> Result<()> {
        let object = self
            .objects
            .get_mut(id)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("object {id}")))?;

        let previous = object.get_motion_type();
        object.set_motion_type(motion_type)?;
        if previous != motion_type {
            self.events.push(ObjectEventType::MotionTypeChanged, id);
        }
        Ok(())
    }

    /// Returns an object's motion type, or `MotionType::Error` for unknown ids
    pub fn get_object_motion_type(&self, id: ObjectId) -> MotionType {
        self.objects
            .get(id)
            .map_or(MotionType::Error, RigidObject::get_motion_type)
    }

    /// Advances the simulation by `time_step`.
    ///
    /// The step is split into chunks of at most `config.time_step`, capped at
    /// `config.max_substeps` chunks. Events from the previous step are
    /// discarded first.
    pub fn step_physics(&mut self, graph: &mut SceneGraph, time_step: f32) -> Result<()> {
        self.events.clear();

        let fixed_step = self.config.time_step;
        let max_steps = self.config.max_substeps;

        let mut remaining_time = time_step;
        let mut steps = 0;

        while remaining_time > EPSILON && steps < max_steps {
            let dt = fixed_step.min(remaining_time);

            self.step_simulation(graph, dt)?;

            remaining_time -= dt;
            steps += 1;
        }

        self.world_time += time_step;
        Ok(())
    }

    /// Performs a single step: velocity control, then dynamics
    fn step_simulation(&mut self, graph: &mut SceneGraph, dt: f32) -> Result<()> {
        let gravity = self.config.gravity;

        for (id, object) in self.objects.iter_mut() {
            // removed nodes are cleaned up by prune_dead_objects
            if !graph.is_alive(object.node()) {
                continue;
            }

            object.apply_velocity_control(graph, dt)?;
            if object.step_dynamics(graph, dt, gravity)? {
                self.events.push(ObjectEventType::TransformChanged, id);
            }

            let active = object.is_active();
            if let Some(last) = self.activity.insert(id, active) {
                match (last, active) {
                    (true, false) => self.events.push(ObjectEventType::Sleep, id),
                    (false, true) => self.events.push(ObjectEventType::Awake, id),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Returns the current simulation time
    pub fn get_world_time(&self) -> f32 {
        self.world_time
    }

    /// Events emitted by the last step and by object changes since then
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Resets world time and drops pending events; objects keep their state
    pub fn reset(&mut self) {
        self.world_time = 0.0;
        self.events.clear();
    }
}

/// Removes a node created for a failed build. A failure here is logged so
/// it does not mask the build error.
fn discard_node(graph: &mut SceneGraph, node: NodeHandle) {
    if let Err(e) = graph.remove_node(node) {
        log::error!("could not remove {node} after a failed build: {e}");
    }
}
