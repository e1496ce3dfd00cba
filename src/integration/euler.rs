use crate::bodies::BodyState;
use crate::integration::Integrator;

/// Forward Euler integrator: forces into velocities, damping, then
/// velocities into the pose
#[derive(Debug, Default, Clone, Copy)]
pub struct EulerIntegrator;

impl EulerIntegrator {
    /// Creates a new Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(&self, body: &mut BodyState, dt: f32) {
        // Skip integration for bodies the engine does not own or that sleep
        if !body.is_simulated() || body.is_sleeping() {
            return;
        }

        body.integrate_forces(dt);
        body.apply_damping(dt);
        body.integrate_velocity(dt);
    }

    fn name(&self) -> &str {
        "Euler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::ForceType;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn constant_force_accelerates_body() {
        let mut body = BodyState::default();
        body.set_simulated(true);
        body.set_mass(2.0);
        let integrator = EulerIntegrator::new();

        for _ in 0..10 {
            body.add_force(ForceType::ForceAtPoint {
                force: Vector3::new(0.0, -20.0, 0.0),
                rel_pos: Vector3::zeros(),
            });
            integrator.integrate(&mut body, 0.1);
        }

        // v = F/m * t = -10 * 1.0
        assert_relative_eq!(body.get_linear_velocity().y, -10.0, epsilon = 1e-4);
        assert!(body.get_transform().position.y < 0.0);
    }

    #[test]
    fn unsimulated_body_does_not_move() {
        let mut body = BodyState::default();
        body.set_linear_velocity(Vector3::x());
        EulerIntegrator::new().integrate(&mut body, 1.0);

        assert_eq!(body.get_transform().position, Vector3::zeros());
    }
}
