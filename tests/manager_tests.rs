use scene_physics::{
    assets::{CollisionMeshData, PhysicsObjectAttributes, PhysicsSceneAttributes, ResourceManager},
    core::{ObjectEventType, PhysicsConfig, PhysicsManager, PhysicsSimulationLibrary},
    error::PhysicsError,
    integration::VelocityControl,
    math::{Transform, Vector3},
    scene::SceneGraph,
    MotionType,
};
use approx::assert_relative_eq;

fn resources(scene_gravity: Vector3) -> ResourceManager {
    let mut resources = ResourceManager::new();
    resources.register_collision_mesh("cube", vec![CollisionMeshData::unit_cube()]);
    resources.register_collision_mesh("floor", vec![CollisionMeshData::quad(10.0, 10.0)]);
    resources.register_object_template(PhysicsObjectAttributes::new("crate", "cube"));
    resources.register_object_template(
        PhysicsObjectAttributes::new("big_crate", "cube")
            .with_scale(Vector3::repeat(2.0))
            .with_bounding_box_collisions(true),
    );
    resources.register_object_template(PhysicsObjectAttributes::new("puck", "cube").with_damping(0.0, 0.0));
    resources.register_scene(PhysicsSceneAttributes {
        gravity: scene_gravity,
        ..PhysicsSceneAttributes::new("room", "floor")
    });
    resources
}

fn euler_manager() -> PhysicsManager {
    PhysicsManager::new(PhysicsConfig::with_simulator(PhysicsSimulationLibrary::Euler))
}

#[test]
fn test_kinematic_only_manager_creates_kinematic_objects() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::new(0.0, -9.8, 0.0));
    let mut manager = PhysicsManager::new(PhysicsConfig::default());

    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let id = manager.add_object(&mut graph, &resources, "crate", None).unwrap();

    assert!(!manager.dynamics_supported());
    assert_eq!(manager.get_object_motion_type(id), MotionType::Kinematic);
    assert!(manager
        .set_object_motion_type(id, MotionType::Dynamic)
        .is_err());
    assert_eq!(manager.get_scene_object().unwrap().get_motion_type(), MotionType::Static);
    assert_eq!(manager.events().get_events_of_type(ObjectEventType::Added).len(), 1);
}

#[test]
fn test_dynamic_object_falls_under_scene_gravity() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::new(0.0, -9.8, 0.0));
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();

    let id = manager.add_object(&mut graph, &resources, "puck", None).unwrap();
    manager
        .get_object_mut(id)
        .unwrap()
        .set_translation(&mut graph, Vector3::new(0.0, 10.0, 0.0))
        .unwrap();
    assert_eq!(manager.get_object_motion_type(id), MotionType::Dynamic);

    for _ in 0..60 {
        manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();
    }

    let object = manager.get_object(id).unwrap();
    let y = object.get_translation(&graph).unwrap().y;
    // explicit Euler lands slightly below the analytic 10 - 4.9
    assert!(y < 5.1 && y > 4.5, "y = {y}");
    assert_relative_eq!(object.get_linear_velocity().y, -9.8, epsilon = 1e-3);
    assert_relative_eq!(manager.get_world_time(), 1.0, epsilon = 1e-4);
}

#[test]
fn test_step_reports_transform_changes() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::new(0.0, -9.8, 0.0));
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let id = manager.add_object(&mut graph, &resources, "crate", None).unwrap();

    manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();

    let moved = manager.events().get_events_of_type(ObjectEventType::TransformChanged);
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].object, id);
}

#[test]
fn test_forces_are_ignored_while_kinematic() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let id = manager.add_object(&mut graph, &resources, "puck", None).unwrap();
    manager.set_object_motion_type(id, MotionType::Kinematic).unwrap();

    let object = manager.get_object_mut(id).unwrap();
    object.apply_impulse(Vector3::new(5.0, 0.0, 0.0), Vector3::zeros());
    object.apply_force(Vector3::new(0.0, 5.0, 0.0), Vector3::zeros());
    object.set_linear_velocity(Vector3::x());
    manager.step_physics(&mut graph, 0.5).unwrap();

    let object = manager.get_object(id).unwrap();
    assert_eq!(object.get_linear_velocity(), Vector3::zeros());
    assert_eq!(object.get_translation(&graph).unwrap(), Vector3::zeros());
    assert_eq!(
        manager.events().get_events_of_type(ObjectEventType::TransformChanged).len(),
        0
    );
}

#[test]
fn test_impulse_moves_dynamic_object() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let id = manager.add_object(&mut graph, &resources, "puck", None).unwrap();

    // unit mass: the impulse becomes the velocity
    manager
        .get_object_mut(id)
        .unwrap()
        .apply_impulse(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros());
    for _ in 0..30 {
        manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();
    }

    let x = manager.get_object(id).unwrap().get_translation(&graph).unwrap().x;
    assert_relative_eq!(x, 1.0, epsilon = 1e-4);
}

#[test]
fn test_resting_object_falls_asleep_and_wakes() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let id = manager.add_object(&mut graph, &resources, "puck", None).unwrap();

    let mut slept = false;
    for _ in 0..90 {
        manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();
        slept |= !manager.events().get_events_of_type(ObjectEventType::Sleep).is_empty();
    }
    assert!(slept);
    assert!(!manager.get_object(id).unwrap().is_active());

    manager
        .get_object_mut(id)
        .unwrap()
        .apply_impulse(Vector3::z(), Vector3::zeros());
    manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();

    assert!(manager.get_object(id).unwrap().is_active());
    assert_eq!(manager.events().get_events_of_type(ObjectEventType::Awake).len(), 1);
}

#[test]
fn test_velocity_control_drives_kinematic_and_dynamic_objects() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();

    let dynamic = manager.add_object(&mut graph, &resources, "puck", None).unwrap();
    let kinematic = manager.add_object(&mut graph, &resources, "puck", None).unwrap();
    manager.set_object_motion_type(kinematic, MotionType::Kinematic).unwrap();

    for id in [dynamic, kinematic] {
        *manager.get_object_mut(id).unwrap().get_velocity_control_mut() =
            VelocityControl::new().with_linear(Vector3::x(), false);
    }

    for _ in 0..60 {
        manager.step_physics(&mut graph, 1.0 / 60.0).unwrap();
    }

    for id in [dynamic, kinematic] {
        let x = manager.get_object(id).unwrap().get_translation(&graph).unwrap().x;
        assert_relative_eq!(x, 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_object_nodes_carry_visual_and_bounding_box_children() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = PhysicsManager::new(PhysicsConfig::default());
    let id = manager.add_object(&mut graph, &resources, "big_crate", None).unwrap();

    let object = manager.get_object(id).unwrap();
    let visual = object.visual_node.unwrap();
    assert!(object.bb_node.is_some());
    assert_eq!(graph.children(object.node()).unwrap().len(), 2);
    assert_eq!(graph.transformation(visual).unwrap().scale, Vector3::repeat(2.0));

    let bounds = graph.cumulative_bb(object.node()).unwrap().unwrap();
    assert_relative_eq!(bounds.extents(), Vector3::repeat(2.0), epsilon = 1e-6);
    assert_eq!(object.get_scale(), Vector3::repeat(2.0));
}

#[test]
fn test_objects_can_be_parented() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = PhysicsManager::new(PhysicsConfig::default());
    let table = graph
        .add_child(graph.root(), Transform::from_position(Vector3::new(0.0, 1.0, 0.0)))
        .unwrap();

    let id = manager.add_object(&mut graph, &resources, "crate", Some(table)).unwrap();
    let node = manager.get_object(id).unwrap().node();

    assert_eq!(graph.parent(node).unwrap(), Some(table));
    assert_relative_eq!(graph.absolute_transformation(node).unwrap().position, Vector3::y());
}

#[test]
fn test_dynamic_object_under_a_moved_parent_keeps_its_world_pose() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    manager.add_scene(&mut graph, &resources, "room").unwrap();
    let shelf = graph
        .add_child(graph.root(), Transform::from_position(Vector3::new(3.0, 2.0, 0.0)))
        .unwrap();

    let id = manager.add_object(&mut graph, &resources, "puck", Some(shelf)).unwrap();
    manager.step_physics(&mut graph, 0.1).unwrap();

    let node = manager.get_object(id).unwrap().node();
    assert_relative_eq!(graph.transformation(node).unwrap().position, Vector3::zeros(), epsilon = 1e-5);
    assert_relative_eq!(
        graph.absolute_transformation(node).unwrap().position,
        Vector3::new(3.0, 2.0, 0.0),
        epsilon = 1e-5
    );
}

#[test]
fn test_removed_nodes_are_pruned() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = PhysicsManager::new(PhysicsConfig::default());
    let keep = manager.add_object(&mut graph, &resources, "crate", None).unwrap();
    let gone = manager.add_object(&mut graph, &resources, "crate", None).unwrap();

    let node = manager.get_object(gone).unwrap().node();
    graph.remove_node(node).unwrap();

    assert_eq!(
        manager.get_object_mut(gone).unwrap().translate(&mut graph, Vector3::x()),
        Err(PhysicsError::NodeNotFound(node))
    );
    manager.step_physics(&mut graph, 0.1).unwrap();

    assert_eq!(manager.prune_dead_objects(&graph), vec![gone]);
    assert_eq!(manager.existing_object_ids(), vec![keep]);
    assert!(!manager.contains_object(gone));
    assert_eq!(manager.get_object_motion_type(gone), MotionType::Error);
}

#[test]
fn test_remove_object_removes_its_subtree() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = PhysicsManager::new(PhysicsConfig::default());
    let id = manager.add_object(&mut graph, &resources, "big_crate", None).unwrap();
    assert_eq!(graph.node_count(), 4);

    manager.remove_object(&mut graph, id).unwrap();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(manager.num_objects(), 0);
    assert_eq!(manager.events().get_events_of_type(ObjectEventType::Removed).len(), 1);
}

#[test]
fn test_new_scene_replaces_the_old_one() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = PhysicsManager::new(PhysicsConfig::default());

    let first = manager.add_scene(&mut graph, &resources, "room").unwrap();
    let second = manager.add_scene(&mut graph, &resources, "room").unwrap();

    assert!(!graph.is_alive(first));
    assert!(graph.is_alive(second));
    assert_eq!(manager.get_scene_object().unwrap().node(), second);
    assert!(matches!(
        manager.add_scene(&mut graph, &resources, "attic"),
        Err(PhysicsError::ResourceNotFound(_))
    ));
    assert_eq!(manager.get_scene_object().unwrap().node(), second);
}

#[test]
fn test_motion_type_changes_are_reported() {
    let mut graph = SceneGraph::new();
    let resources = resources(Vector3::zeros());
    let mut manager = euler_manager();
    let id = manager.add_object(&mut graph, &resources, "crate", None).unwrap();
    manager.events_mut().clear();

    manager.set_object_motion_type(id, MotionType::Static).unwrap();
    manager.set_object_motion_type(id, MotionType::Static).unwrap();
    assert!(manager.set_object_motion_type(id, MotionType::Error).is_err());

    assert_eq!(manager.events().get_events_of_type(ObjectEventType::MotionTypeChanged).len(), 1);

    manager.reset();
    assert!(manager.events().is_empty());
    assert_eq!(manager.get_world_time(), 0.0);
}
