use crate::math::{self, Transform, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Constant linear and angular velocity command for a rigid object.
///
/// Works without a dynamics engine: kinematic objects have their pose
/// integrated directly, dynamic objects get the velocities set on the
/// engine before each step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VelocityControl {
    /// Constant linear velocity
    pub lin_vel: Vector3,

    /// Constant angular velocity; the direction is the axis, the length the rate (rad/s)
    pub ang_vel: Vector3,

    /// Whether the linear velocity is applied
    pub controlling_lin_vel: bool,

    /// Whether the linear velocity is expressed in the object's local frame
    /// (commands like "forward" or "strafe")
    pub lin_vel_is_local: bool,

    /// Whether the angular velocity is applied
    pub controlling_ang_vel: bool,

    /// Whether the angular velocity is expressed in the object's local frame
    /// (commands like "roll" or "yaw")
    pub ang_vel_is_local: bool,
}

impl VelocityControl {
    /// Creates a control with nothing enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables linear control with the given velocity
    pub fn with_linear(mut self, velocity: Vector3, local: bool) -> Self {
        self.lin_vel = velocity;
        self.controlling_lin_vel = true;
        self.lin_vel_is_local = local;
        self
    }

    /// Enables angular control with the given velocity
    pub fn with_angular(mut self, velocity: Vector3, local: bool) -> Self {
        self.ang_vel = velocity;
        self.controlling_ang_vel = true;
        self.ang_vel_is_local = local;
        self
    }

    /// Whether any axis of motion is being controlled
    pub fn is_active(&self) -> bool {
        self.controlling_lin_vel || self.controlling_ang_vel
    }

    /// Applies the control velocities to `transform` over `dt` with explicit Euler.
    ///
    /// Axes whose control flag is off are left untouched. Scale passes through.
    pub fn integrate_transform(&self, dt: f32, transform: &Transform) -> Transform {
        let mut result = *transform;

        if self.controlling_lin_vel {
            let displacement = self.lin_vel * dt;
            result.position += if self.lin_vel_is_local {
                transform.rotation * displacement
            } else {
                displacement
            };
        }

        if self.controlling_ang_vel {
            let angle = self.ang_vel.norm() * dt;
            if angle > math::EPSILON {
                let delta = math::axis_angle(self.ang_vel, angle);
                let rotation = if self.ang_vel_is_local {
                    transform.rotation * delta
                } else {
                    delta * transform.rotation
                };
                result.rotation = math::Quaternion::new_normalize(rotation.into_inner());
            }
        }

        result
    }

    /// Returns the commanded (linear, angular) velocities in world space for
    /// an object posed at `transform`. Uncontrolled axes are zero.
    pub fn world_velocities(&self, transform: &Transform) -> (Vector3, Vector3) {
        let linear = match (self.controlling_lin_vel, self.lin_vel_is_local) {
            (false, _) => Vector3::zeros(),
            (true, true) => transform.rotation * self.lin_vel,
            (true, false) => self.lin_vel,
        };
        let angular = match (self.controlling_ang_vel, self.ang_vel_is_local) {
            (false, _) => Vector3::zeros(),
            (true, true) => transform.rotation * self.ang_vel,
            (true, false) => self.ang_vel,
        };
        (linear, angular)
    }
}
