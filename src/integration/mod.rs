mod integrator;
mod euler;
mod velocity_control;

pub use self::integrator::Integrator;
pub use self::euler::EulerIntegrator;
pub use self::velocity_control::VelocityControl;
