use crate::bodies::BodyState;

/// Trait for numerical integration algorithms used by dynamics backends
pub trait Integrator: std::fmt::Debug + Send + Sync {
    /// Integrates accumulated forces and velocities of a body over a time step
    fn integrate(&self, body: &mut BodyState, dt: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
