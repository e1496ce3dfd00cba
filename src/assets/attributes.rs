use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Template of physical parameters for a movable object.
///
/// Templates are shared between every object built from them, so the
/// physics layer only ever reads them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PhysicsObjectAttributes {
    /// Handle the template is registered under
    pub handle: String,

    /// Mass (kg)
    pub mass: f64,

    /// Coefficient of friction
    pub friction_coefficient: f64,

    /// Coefficient of restitution (bounciness), 0-1
    pub restitution_coefficient: f64,

    /// Linear damping, 0-1 per second
    pub linear_damping: f64,

    /// Angular damping, 0-1 per second
    pub angular_damping: f64,

    /// Scale of the object relative to its loaded meshes
    pub scale: Vector3,

    /// Center of mass in the object's local frame
    pub com: Vector3,

    /// Diagonal of the inertia matrix; all zero means "compute from bounds"
    pub inertia: Vector3,

    /// Collision margin used by engines that inflate shapes
    pub margin: f64,

    /// Whether the collision meshes should be merged into one shape
    pub join_collision_meshes: bool,

    /// Whether to collide using the bounding box instead of the meshes
    pub bounding_box_collisions: bool,

    /// Render asset handle
    pub render_mesh_handle: String,

    /// Collision asset handle, looked up in the resource manager
    pub collision_mesh_handle: String,
}

impl PhysicsObjectAttributes {
    /// Creates a template with default parameters that collides with the
    /// mesh group registered under `collision_mesh_handle`
    pub fn new(handle: impl Into<String>, collision_mesh_handle: impl Into<String>) -> Self {
        let collision_mesh_handle = collision_mesh_handle.into();
        Self {
            handle: handle.into(),
            render_mesh_handle: collision_mesh_handle.clone(),
            collision_mesh_handle,
            ..Self::default()
        }
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the scale
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the friction and restitution coefficients
    pub fn with_material(mut self, friction: f64, restitution: f64) -> Self {
        self.friction_coefficient = friction;
        self.restitution_coefficient = restitution;
        self
    }

    /// Sets the linear and angular damping
    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Sets the inertia diagonal
    pub fn with_inertia(mut self, inertia: Vector3) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the center of mass
    pub fn with_com(mut self, com: Vector3) -> Self {
        self.com = com;
        self
    }

    /// Enables bounding-box collisions (also attaches a bounding-box node)
    pub fn with_bounding_box_collisions(mut self, enabled: bool) -> Self {
        self.bounding_box_collisions = enabled;
        self
    }
}

impl Default for PhysicsObjectAttributes {
    fn default() -> Self {
        Self {
            handle: String::new(),
            mass: 1.0,
            friction_coefficient: 0.5,
            restitution_coefficient: 0.1,
            linear_damping: 0.2,
            angular_damping: 0.2,
            scale: Vector3::repeat(1.0),
            com: Vector3::zeros(),
            inertia: Vector3::zeros(),
            margin: 0.01,
            join_collision_meshes: true,
            bounding_box_collisions: false,
            render_mesh_handle: String::new(),
            collision_mesh_handle: String::new(),
        }
    }
}

/// Template of physical parameters for static scene geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PhysicsSceneAttributes {
    /// Handle the scene is registered under
    pub handle: String,

    /// Coefficient of friction of the scene surfaces
    pub friction_coefficient: f64,

    /// Coefficient of restitution of the scene surfaces
    pub restitution_coefficient: f64,

    /// Gravity requested by the scene
    pub gravity: Vector3,

    /// Render asset handle
    pub render_mesh_handle: String,

    /// Collision asset handle, looked up in the resource manager
    pub collision_mesh_handle: String,
}

impl PhysicsSceneAttributes {
    /// Creates scene attributes whose collision geometry is registered under
    /// `collision_mesh_handle`
    pub fn new(handle: impl Into<String>, collision_mesh_handle: impl Into<String>) -> Self {
        let collision_mesh_handle = collision_mesh_handle.into();
        Self {
            handle: handle.into(),
            render_mesh_handle: collision_mesh_handle.clone(),
            collision_mesh_handle,
            ..Self::default()
        }
    }
}

impl Default for PhysicsSceneAttributes {
    fn default() -> Self {
        Self {
            handle: String::new(),
            friction_coefficient: 0.4,
            restitution_coefficient: 0.05,
            gravity: Vector3::new(0.0, -9.8, 0.0),
            render_mesh_handle: String::new(),
            collision_mesh_handle: String::new(),
        }
    }
}
