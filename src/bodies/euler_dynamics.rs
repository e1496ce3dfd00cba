use crate::assets::{CollisionMeshData, PhysicsObjectAttributes, PhysicsSceneAttributes, ResourceManager};
use crate::bodies::{BodyState, DynamicsBackend, ForceType, MotionType};
use crate::integration::{EulerIntegrator, Integrator};
use crate::math::{Transform, Vector3};
use crate::Result;

/// Thresholds that decide when a resting body goes to sleep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepSettings {
    /// Whether bodies may sleep at all
    pub allow_sleeping: bool,

    /// Linear speed below which a body counts as resting
    pub linear_threshold: f32,

    /// Angular speed below which a body counts as resting
    pub angular_threshold: f32,

    /// How long a body must rest before it sleeps
    pub time_threshold: f32,
}

impl Default for SleepSettings {
    fn default() -> Self {
        Self {
            allow_sleeping: true,
            linear_threshold: 0.001,
            angular_threshold: 0.001,
            time_threshold: 1.0,
        }
    }
}

/// Minimal dynamics engine for one object.
///
/// Integrates gravity, forces, impulses and damping and puts resting
/// bodies to sleep. There is no collision detection or contact response.
#[derive(Debug)]
pub struct EulerDynamics {
    body: BodyState,
    integrator: Box<dyn Integrator>,
    sleep: SleepSettings,
}

impl Default for EulerDynamics {
    fn default() -> Self {
        Self::new(SleepSettings::default())
    }
}

impl EulerDynamics {
    /// Creates a backend with the default Euler integrator
    pub fn new(sleep: SleepSettings) -> Self {
        Self {
            body: BodyState::default(),
            integrator: Box::new(EulerIntegrator::new()),
            sleep,
        }
    }

    /// Returns the engine-side body
    pub fn body(&self) -> &BodyState {
        &self.body
    }

    /// Returns the name of the integrator in use
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    fn update_sleep(&mut self, dt: f32) {
        if !self.sleep.allow_sleeping || !self.body.can_sleep() {
            return;
        }

        let resting = self.body.get_linear_velocity().norm_squared() <= self.sleep.linear_threshold.powi(2)
            && self.body.get_angular_velocity().norm_squared() <= self.sleep.angular_threshold.powi(2);

        if resting {
            let rested = self.body.get_sleeping_time() + dt;
            if rested >= self.sleep.time_threshold {
                self.body.put_to_sleep();
            } else {
                self.body.set_sleeping_time(rested);
            }
        } else {
            self.body.set_sleeping_time(0.0);
        }
    }
}

/// Inertia diagonal of a solid box with the given extents
fn box_inertia(mass: f32, extents: Vector3) -> Vector3 {
    let sq = extents.component_mul(&extents);
    Vector3::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 12.0)
}

impl DynamicsBackend for EulerDynamics {
    fn name(&self) -> &str {
        "euler"
    }

    fn supports_dynamics(&self) -> bool {
        true
    }

    fn initialize_scene_finalize(
        &mut self,
        _resources: &ResourceManager,
        attributes: &PhysicsSceneAttributes,
        _mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        self.body.set_mass(0.0);
        self.body.set_inertia(Vector3::zeros());
        self.body.set_friction(attributes.friction_coefficient as f32);
        self.body.set_restitution(attributes.restitution_coefficient as f32);
        Ok(())
    }

    fn initialize_object_finalize(
        &mut self,
        _resources: &ResourceManager,
        attributes: &PhysicsObjectAttributes,
        mesh_group: &[CollisionMeshData],
    ) -> Result<()> {
        let mass = attributes.mass as f32;
        self.body.set_mass(mass);
        self.body.set_com(attributes.com);
        self.body.set_friction(attributes.friction_coefficient as f32);
        self.body.set_restitution(attributes.restitution_coefficient as f32);
        self.body.set_linear_damping(attributes.linear_damping as f32);
        self.body.set_angular_damping(attributes.angular_damping as f32);

        let inertia = if attributes.inertia == Vector3::zeros() {
            CollisionMeshData::group_bounds(mesh_group)
                .map(|bounds| box_inertia(mass, bounds.extents().component_mul(&attributes.scale)))
                .unwrap_or_else(|| Vector3::repeat(mass))
        } else {
            attributes.inertia
        };
        self.body.set_inertia(inertia);
        Ok(())
    }

    fn set_motion_type(&mut self, _current: MotionType, requested: MotionType) -> Result<()> {
        self.body.set_simulated(requested == MotionType::Dynamic);
        Ok(())
    }

    fn sync_pose(&mut self, pose: &Transform) {
        self.body.set_transform(*pose);
        self.body.wake_up();
    }

    fn step(&mut self, dt: f32, gravity: Vector3) -> Option<Transform> {
        if !self.body.is_simulated() || self.body.is_sleeping() {
            return None;
        }

        self.body.apply_gravity(gravity, dt);
        self.integrator.integrate(&mut self.body, dt);
        self.update_sleep(dt);

        Some(self.body.get_transform())
    }

    fn is_active(&self) -> bool {
        !self.body.is_sleeping()
    }

    fn set_active(&mut self) {
        self.body.wake_up();
    }

    fn apply_force(&mut self, force: Vector3, rel_pos: Vector3) {
        self.body.add_force(ForceType::ForceAtPoint { force, rel_pos });
    }

    fn apply_impulse(&mut self, impulse: Vector3, rel_pos: Vector3) {
        self.body.add_force(ForceType::ImpulseAtPoint { impulse, rel_pos });
    }

    fn apply_torque(&mut self, torque: Vector3) {
        self.body.add_force(ForceType::Torque(torque));
    }

    fn apply_impulse_torque(&mut self, impulse: Vector3) {
        self.body.add_force(ForceType::AngularImpulse(impulse));
    }

    fn set_linear_velocity(&mut self, velocity: Vector3) {
        if self.body.is_simulated() {
            self.body.set_linear_velocity(velocity);
        }
    }

    fn set_angular_velocity(&mut self, velocity: Vector3) {
        if self.body.is_simulated() {
            self.body.set_angular_velocity(velocity);
        }
    }

    fn get_linear_velocity(&self) -> Vector3 {
        self.body.get_linear_velocity()
    }

    fn get_angular_velocity(&self) -> Vector3 {
        self.body.get_angular_velocity()
    }

    fn get_mass(&self) -> f64 {
        f64::from(self.body.get_mass())
    }

    fn set_mass(&mut self, mass: f64) {
        self.body.set_mass(mass as f32);
    }

    fn get_com(&self) -> Vector3 {
        self.body.get_com()
    }

    fn set_com(&mut self, com: Vector3) {
        self.body.set_com(com);
    }

    fn get_inertia_vector(&self) -> Vector3 {
        self.body.get_inertia()
    }

    fn set_inertia_vector(&mut self, inertia: Vector3) {
        self.body.set_inertia(inertia);
    }

    fn get_friction_coefficient(&self) -> f64 {
        f64::from(self.body.get_friction())
    }

    fn set_friction_coefficient(&mut self, friction: f64) {
        self.body.set_friction(friction as f32);
    }

    fn get_restitution_coefficient(&self) -> f64 {
        f64::from(self.body.get_restitution())
    }

    fn set_restitution_coefficient(&mut self, restitution: f64) {
        self.body.set_restitution(restitution as f32);
    }

    fn get_linear_damping(&self) -> f64 {
        f64::from(self.body.get_linear_damping())
    }

    fn set_linear_damping(&mut self, damping: f64) {
        self.body.set_linear_damping(damping as f32);
    }

    fn get_angular_damping(&self) -> f64 {
        f64::from(self.body.get_angular_damping())
    }

    fn set_angular_damping(&mut self, damping: f64) {
        self.body.set_angular_damping(damping as f32);
    }
}
