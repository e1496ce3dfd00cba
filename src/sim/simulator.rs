use std::sync::Arc;

use crate::assets::ResourceManager;
use crate::core::{ObjectId, PhysicsConfig, PhysicsManager, PhysicsSimulationLibrary};
use crate::scene::SceneGraph;
use crate::sim::PathFinder;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration of a [`Simulator`]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulatorConfiguration {
    /// Handle of the scene to load
    pub scene_id: String,

    /// Whether to run the configured dynamics engine; otherwise objects are
    /// kinematic only
    pub enable_physics: bool,

    pub physics: PhysicsConfig,
}

impl SimulatorConfiguration {
    /// Configuration for `scene_id` with physics disabled
    pub fn new(scene_id: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            ..Self::default()
        }
    }

    /// The physics configuration actually used by the physics manager
    fn effective_physics(&self) -> PhysicsConfig {
        if self.enable_physics {
            self.physics.clone()
        } else {
            PhysicsConfig {
                simulator: PhysicsSimulationLibrary::NoPhysics,
                ..self.physics.clone()
            }
        }
    }
}

/// Scene graph, physics and navigation for one loaded scene
#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfiguration,
    resources: Arc<ResourceManager>,
    graph: SceneGraph,
    physics: PhysicsManager,
    path_finder: Arc<PathFinder>,
}

impl Simulator {
    /// Loads the scene named by `config.scene_id`
    pub fn new(config: SimulatorConfiguration, resources: Arc<ResourceManager>) -> Result<Self> {
        let path_finder = Arc::new(load_path_finder(&config, &resources)?);
        let (graph, physics) = load_scene(&config, &resources)?;

        log::debug!("loaded scene '{}'", config.scene_id);
        Ok(Self {
            config,
            resources,
            graph,
            physics,
            path_finder,
        })
    }

    /// Switches to a new configuration.
    ///
    /// The same scene with the same physics only resets the simulation and
    /// keeps everything else. A new physics configuration rebuilds the scene
    /// graph and physics but keeps the path finder. A new scene rebuilds
    /// everything. On error the simulator is left unchanged.
    pub fn reconfigure(&mut self, config: SimulatorConfiguration) -> Result<()> {
        if config.scene_id != self.config.scene_id {
            let path_finder = Arc::new(load_path_finder(&config, &self.resources)?);
            let (graph, physics) = load_scene(&config, &self.resources)?;
            log::debug!("reconfigured from scene '{}' to '{}'", self.config.scene_id, config.scene_id);

            self.graph = graph;
            self.physics = physics;
            self.path_finder = path_finder;
        } else if config.effective_physics() != self.config.effective_physics() {
            let (graph, physics) = load_scene(&config, &self.resources)?;
            log::debug!("rebuilt physics for scene '{}'", config.scene_id);

            self.graph = graph;
            self.physics = physics;
        } else {
            log::debug!("scene '{}' unchanged, resetting", config.scene_id);
            self.reset();
        }

        self.config = config;
        Ok(())
    }

    /// Resets simulation time and events; the scene and its objects stay loaded
    pub fn reset(&mut self) {
        self.physics.reset();
    }

    /// Shared handle to the current scene's path finder
    pub fn get_path_finder(&self) -> Arc<PathFinder> {
        Arc::clone(&self.path_finder)
    }

    /// Returns the active configuration
    pub fn config(&self) -> &SimulatorConfiguration {
        &self.config
    }

    /// Returns the resource registry scenes and objects are loaded from
    pub fn resources(&self) -> &Arc<ResourceManager> {
        &self.resources
    }

    /// Returns the scene graph
    pub fn scene_graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Returns the scene graph for editing
    pub fn scene_graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Returns the physics manager
    pub fn physics_manager(&self) -> &PhysicsManager {
        &self.physics
    }

    /// Returns the physics manager for editing
    pub fn physics_manager_mut(&mut self) -> &mut PhysicsManager {
        &mut self.physics
    }

    /// Graph and physics manager together, for edits that need both
    pub fn physics_and_graph_mut(&mut self) -> (&mut PhysicsManager, &mut SceneGraph) {
        (&mut self.physics, &mut self.graph)
    }

    /// Adds an object from a registered template at the scene root
    pub fn add_object(&mut self, template_handle: &str) -> Result<ObjectId> {
        self.physics
            .add_object(&mut self.graph, &self.resources, template_handle, None)
    }

    /// Advances physics by `dt` seconds
    pub fn step_physics(&mut self, dt: f32) -> Result<()> {
        self.physics.step_physics(&mut self.graph, dt)
    }
}

fn load_path_finder(config: &SimulatorConfiguration, resources: &ResourceManager) -> Result<PathFinder> {
    let attributes = resources.get_scene_attributes(&config.scene_id)?;
    let mesh_group = resources.get_collision_mesh_group(&attributes.collision_mesh_handle)?;
    PathFinder::from_scene(config.scene_id.as_str(), &mesh_group)
}

fn load_scene(config: &SimulatorConfiguration, resources: &ResourceManager) -> Result<(SceneGraph, PhysicsManager)> {
    let mut graph = SceneGraph::new();
    let mut physics = PhysicsManager::new(config.effective_physics());
    physics.add_scene(&mut graph, resources, &config.scene_id)?;
    Ok((graph, physics))
}
