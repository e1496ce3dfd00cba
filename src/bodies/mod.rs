mod motion_type;
mod body_state;
mod backend;
mod euler_dynamics;
mod rigid_object;

pub use self::motion_type::{is_transition_legal, MotionType, RigidObjectType};
pub use self::body_state::BodyState;
pub use self::backend::{DynamicsBackend, KinematicBackend};
pub use self::euler_dynamics::{EulerDynamics, SleepSettings};
pub use self::rigid_object::{InitializationAttributes, RigidObject};

use crate::math::Vector3;

/// Types of forces that can be applied to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceType {
    /// Force applied away from the center of mass (can cause torque)
    ForceAtPoint {
        /// The force to apply
        force: Vector3,

        /// Application point relative to the center of mass, in world space
        rel_pos: Vector3,
    },

    /// Torque that causes angular acceleration
    Torque(Vector3),

    /// Impulse applied away from the center of mass
    ImpulseAtPoint {
        /// The impulse to apply
        impulse: Vector3,

        /// Application point relative to the center of mass, in world space
        rel_pos: Vector3,
    },

    /// Angular impulse (instantaneous change in angular velocity)
    AngularImpulse(Vector3),
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of simulated bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body is owned by the dynamics engine
            const SIMULATED = 0x01;

            /// Body is currently sleeping
            const SLEEPING = 0x02;

            /// Body can go to sleep when inactive
            const CAN_SLEEP = 0x04;
        }
    }
}
