use crate::bodies::{body_flags::BodyFlags, ForceType};
use crate::math::{Matrix3, Transform, Vector3, EPSILON};

/// Engine-side state of a simulated rigid body
#[derive(Debug, Clone)]
pub struct BodyState {
    /// Pose of the body in world space
    transform: Transform,

    /// Linear velocity
    linear_velocity: Vector3,

    /// Angular velocity
    angular_velocity: Vector3,

    /// Mass; zero means immovable
    mass: f32,

    /// Inverse of the mass (zero for immovable bodies)
    inv_mass: f32,

    /// Diagonal of the inertia tensor in the local frame
    inertia: Vector3,

    /// Inverse inertia tensor in world space
    inv_inertia_world: Matrix3,

    /// Center of mass in the local frame
    com: Vector3,

    /// Friction coefficient
    friction: f32,

    /// Restitution coefficient
    restitution: f32,

    /// Linear damping, fraction of velocity lost per second
    linear_damping: f32,

    /// Angular damping, fraction of velocity lost per second
    angular_damping: f32,

    /// The body's flags
    flags: BodyFlags,

    /// How long the body has been at rest
    sleeping_time: f32,

    /// Forces to be applied in the next integration step
    forces: Vec<ForceType>,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            mass: 1.0,
            inv_mass: 1.0,
            inertia: Vector3::repeat(1.0),
            inv_inertia_world: Matrix3::identity(),
            com: Vector3::zeros(),
            friction: 0.5,
            restitution: 0.1,
            linear_damping: 0.0,
            angular_damping: 0.0,
            flags: BodyFlags::CAN_SLEEP,
            sleeping_time: 0.0,
            forces: Vec::new(),
        }
    }
}

impl BodyState {
    /// Returns the body's transform
    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    /// Sets the body's transform
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_inertia_world();
    }

    /// Returns the linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    /// Sets the linear velocity and wakes the body
    pub fn set_linear_velocity(&mut self, velocity: Vector3) {
        self.linear_velocity = velocity;
        self.wake_up();
    }

    /// Returns the angular velocity
    pub fn get_angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Sets the angular velocity and wakes the body
    pub fn set_angular_velocity(&mut self, velocity: Vector3) {
        self.angular_velocity = velocity;
        self.wake_up();
    }

    /// Returns the mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the mass (and inverse mass)
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(0.0);
        self.inv_mass = if self.mass > EPSILON { 1.0 / self.mass } else { 0.0 };
    }

    /// Returns the inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the diagonal of the local inertia tensor
    pub fn get_inertia(&self) -> Vector3 {
        self.inertia
    }

    /// Sets the diagonal of the local inertia tensor
    pub fn set_inertia(&mut self, inertia: Vector3) {
        self.inertia = inertia.map(|i| i.max(0.0));
        self.update_inertia_world();
    }

    /// Returns the inverse inertia tensor in world space
    pub fn get_inverse_inertia_world(&self) -> &Matrix3 {
        &self.inv_inertia_world
    }

    /// Returns the center of mass in the local frame
    pub fn get_com(&self) -> Vector3 {
        self.com
    }

    /// Sets the center of mass in the local frame
    pub fn set_com(&mut self, com: Vector3) {
        self.com = com;
    }

    /// Returns the friction coefficient
    pub fn get_friction(&self) -> f32 {
        self.friction
    }

    /// Sets the friction coefficient
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.max(0.0);
    }

    /// Returns the restitution coefficient
    pub fn get_restitution(&self) -> f32 {
        self.restitution
    }

    /// Sets the restitution coefficient
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }

    /// Returns the linear damping
    pub fn get_linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets the linear damping
    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping.max(0.0);
    }

    /// Returns the angular damping
    pub fn get_angular_damping(&self) -> f32 {
        self.angular_damping
    }

    /// Sets the angular damping
    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping.max(0.0);
    }

    /// Returns the body's flags
    pub fn flags(&self) -> BodyFlags {
        self.flags
    }

    /// Returns whether the body is simulated
    pub fn is_simulated(&self) -> bool {
        self.flags.contains(BodyFlags::SIMULATED)
    }

    /// Turns simulation on or off. Turning it off drops velocities and pending forces.
    pub fn set_simulated(&mut self, simulated: bool) {
        self.flags.set(BodyFlags::SIMULATED, simulated);
        if simulated {
            self.wake_up();
        } else {
            self.linear_velocity = Vector3::zeros();
            self.angular_velocity = Vector3::zeros();
            self.forces.clear();
        }
    }

    /// Returns whether the body is sleeping
    pub fn is_sleeping(&self) -> bool {
        self.flags.contains(BodyFlags::SLEEPING)
    }

    /// Returns whether the body can sleep
    pub fn can_sleep(&self) -> bool {
        self.flags.contains(BodyFlags::CAN_SLEEP)
    }

    /// Puts the body to sleep
    pub fn put_to_sleep(&mut self) {
        if self.is_simulated() && !self.is_sleeping() {
            self.flags.insert(BodyFlags::SLEEPING);
            self.linear_velocity = Vector3::zeros();
            self.angular_velocity = Vector3::zeros();
            self.forces.clear();
        }
    }

    /// Wakes up the body
    pub fn wake_up(&mut self) {
        if self.is_sleeping() {
            self.flags.remove(BodyFlags::SLEEPING);
        }
        self.sleeping_time = 0.0;
    }

    /// Returns the time the body has been at rest
    pub fn get_sleeping_time(&self) -> f32 {
        self.sleeping_time
    }

    /// Sets the time the body has been at rest
    pub fn set_sleeping_time(&mut self, time: f32) {
        self.sleeping_time = time;
    }

    /// Queues a force for the next integration step. Ignored unless simulated.
    pub fn add_force(&mut self, force: ForceType) {
        if self.is_simulated() {
            self.wake_up();
            self.forces.push(force);
        }
    }

    /// Returns the forces queued for the next step
    pub fn pending_forces(&self) -> &[ForceType] {
        &self.forces
    }

    /// Updates the inverse inertia tensor in world space
    fn update_inertia_world(&mut self) {
        let inv_local = Matrix3::from_diagonal(&self.inertia.map(|i| if i > EPSILON { 1.0 / i } else { 0.0 }));
        let rotation = self.transform.rotation.to_rotation_matrix();
        let rotation = rotation.matrix();

        // R * inv_I * R^T
        self.inv_inertia_world = rotation * inv_local * rotation.transpose();
    }

    /// Applies queued forces and impulses to the velocities, then clears them
    pub fn integrate_forces(&mut self, dt: f32) {
        if !self.is_simulated() || self.is_sleeping() {
            return;
        }

        for force in std::mem::take(&mut self.forces) {
            match force {
                ForceType::ForceAtPoint { force, rel_pos } => {
                    self.linear_velocity += force * self.inv_mass * dt;
                    // τ = r × F
                    let torque = rel_pos.cross(&force);
                    self.angular_velocity += self.inv_inertia_world * torque * dt;
                }
                ForceType::Torque(torque) => {
                    self.angular_velocity += self.inv_inertia_world * torque * dt;
                }
                ForceType::ImpulseAtPoint { impulse, rel_pos } => {
                    self.linear_velocity += impulse * self.inv_mass;
                    let angular_impulse = rel_pos.cross(&impulse);
                    self.angular_velocity += self.inv_inertia_world * angular_impulse;
                }
                ForceType::AngularImpulse(impulse) => {
                    self.angular_velocity += self.inv_inertia_world * impulse;
                }
            }
        }
    }

    /// Accelerates the body by `gravity` over `dt` without waking it.
    /// Immovable and sleeping bodies are unaffected.
    pub fn apply_gravity(&mut self, gravity: Vector3, dt: f32) {
        if !self.is_simulated() || self.is_sleeping() || self.inv_mass == 0.0 {
            return;
        }

        self.linear_velocity += gravity * dt;
    }

    /// Scales velocities down by the damping factors over `dt`
    pub fn apply_damping(&mut self, dt: f32) {
        if !self.is_simulated() || self.is_sleeping() {
            return;
        }

        self.linear_velocity *= (1.0 - self.linear_damping * dt).clamp(0.0, 1.0);
        self.angular_velocity *= (1.0 - self.angular_damping * dt).clamp(0.0, 1.0);
    }

    /// Advances the pose by the current velocities
    pub fn integrate_velocity(&mut self, dt: f32) {
        if !self.is_simulated() || self.is_sleeping() {
            return;
        }

        self.transform.position += self.linear_velocity * dt;

        let angle = self.angular_velocity.norm() * dt;
        if angle > EPSILON {
            let rotation = crate::math::axis_angle(self.angular_velocity, angle);
            self.transform.rotation = crate::math::Quaternion::new_normalize(
                (rotation * self.transform.rotation).into_inner(),
            );
            self.update_inertia_world();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simulated_body() -> BodyState {
        let mut body = BodyState::default();
        body.set_simulated(true);
        body
    }

    #[test]
    fn forces_are_ignored_unless_simulated() {
        let mut body = BodyState::default();
        body.add_force(ForceType::Torque(Vector3::x()));
        assert!(body.pending_forces().is_empty());

        body.set_simulated(true);
        body.add_force(ForceType::Torque(Vector3::x()));
        assert_eq!(body.pending_forces().len(), 1);
    }

    #[test]
    fn impulse_changes_velocity_by_inverse_mass() {
        let mut body = simulated_body();
        body.set_mass(2.0);
        body.add_force(ForceType::ImpulseAtPoint {
            impulse: Vector3::new(4.0, 0.0, 0.0),
            rel_pos: Vector3::zeros(),
        });

        body.integrate_forces(1.0 / 60.0);

        assert_relative_eq!(body.get_linear_velocity(), Vector3::new(2.0, 0.0, 0.0));
        assert!(body.pending_forces().is_empty());
    }

    #[test]
    fn off_center_impulse_spins_the_body() {
        let mut body = simulated_body();
        body.add_force(ForceType::ImpulseAtPoint {
            impulse: Vector3::new(0.0, 0.0, 1.0),
            rel_pos: Vector3::new(1.0, 0.0, 0.0),
        });

        body.integrate_forces(0.1);

        // r × J = x × z = -y
        assert_relative_eq!(body.get_angular_velocity(), Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn leaving_simulation_clears_motion() {
        let mut body = simulated_body();
        body.set_linear_velocity(Vector3::new(1.0, 2.0, 3.0));
        body.add_force(ForceType::Torque(Vector3::y()));

        body.set_simulated(false);

        assert_eq!(body.get_linear_velocity(), Vector3::zeros());
        assert!(body.pending_forces().is_empty());
    }

    #[test]
    fn gravity_does_not_reset_rest_time() {
        let mut body = simulated_body();
        body.set_sleeping_time(0.5);

        body.apply_gravity(Vector3::new(0.0, -10.0, 0.0), 0.1);

        assert_relative_eq!(body.get_linear_velocity().y, -1.0);
        assert_eq!(body.get_sleeping_time(), 0.5);
    }

    #[test]
    fn zero_mass_is_immovable() {
        let mut body = simulated_body();
        body.set_mass(0.0);
        body.add_force(ForceType::ImpulseAtPoint {
            impulse: Vector3::x(),
            rel_pos: Vector3::zeros(),
        });
        body.integrate_forces(1.0);

        assert_eq!(body.get_inverse_mass(), 0.0);
        assert_eq!(body.get_linear_velocity(), Vector3::zeros());
    }
}
