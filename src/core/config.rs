use crate::bodies::{DynamicsBackend, EulerDynamics, KinematicBackend, SleepSettings};
use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Dynamics engine used for the objects of a physics manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PhysicsSimulationLibrary {
    /// No dynamics: objects are static or kinematic only
    #[default]
    NoPhysics,

    /// The built-in explicit Euler engine
    Euler,
}

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PhysicsConfig {
    /// The engine backing every object
    pub simulator: PhysicsSimulationLibrary,

    /// The fixed time step for the simulation
    pub time_step: f32,

    /// The maximum number of substeps per call to `step_physics`
    pub max_substeps: u32,

    /// Gravity applied to dynamic objects
    pub gravity: Vector3,

    /// The linear velocity threshold below which bodies can sleep
    pub linear_sleep_threshold: f32,

    /// The angular velocity threshold below which bodies can sleep
    pub angular_sleep_threshold: f32,

    /// The time a body must be inactive before sleeping
    pub sleep_time_threshold: f32,

    /// Whether to allow sleeping bodies
    pub allow_sleeping: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            simulator: PhysicsSimulationLibrary::NoPhysics,
            time_step: 1.0 / 60.0,
            max_substeps: 10,
            gravity: Vector3::new(0.0, -9.8, 0.0),
            linear_sleep_threshold: 0.001,
            angular_sleep_threshold: 0.001,
            sleep_time_threshold: 1.0,
            allow_sleeping: true,
        }
    }
}

impl PhysicsConfig {
    /// Default configuration running the given engine
    pub fn with_simulator(simulator: PhysicsSimulationLibrary) -> Self {
        Self {
            simulator,
            ..Self::default()
        }
    }

    pub fn sleep_settings(&self) -> SleepSettings {
        SleepSettings {
            allow_sleeping: self.allow_sleeping,
            linear_threshold: self.linear_sleep_threshold,
            angular_threshold: self.angular_sleep_threshold,
            time_threshold: self.sleep_time_threshold,
        }
    }

    /// Creates a fresh backend for one object
    pub fn create_backend(&self) -> Box<dyn DynamicsBackend> {
        match self.simulator {
            PhysicsSimulationLibrary::NoPhysics => Box::new(KinematicBackend),
            PhysicsSimulationLibrary::Euler => Box::new(EulerDynamics::new(self.sleep_settings())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_the_selected_library() {
        assert!(!PhysicsConfig::default().create_backend().supports_dynamics());
        assert!(PhysicsConfig::with_simulator(PhysicsSimulationLibrary::Euler)
            .create_backend()
            .supports_dynamics());
    }
}
