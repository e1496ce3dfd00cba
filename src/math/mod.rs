mod transform;
mod aabb;

pub use transform::Transform;
pub use aabb::Aabb;

use nalgebra as na;

/// 3D vector used for positions, velocities, forces and scales
pub type Vector3 = na::Vector3<f32>;

/// Unit quaternion used for orientations
pub type Quaternion = na::UnitQuaternion<f32>;

/// 3x3 matrix, used for inertia tensors
pub type Matrix3 = na::Matrix3<f32>;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns the unit X axis
#[inline]
pub fn x_axis() -> Vector3 {
    Vector3::x()
}

/// Returns the unit Y axis
#[inline]
pub fn y_axis() -> Vector3 {
    Vector3::y()
}

/// Returns the unit Z axis
#[inline]
pub fn z_axis() -> Vector3 {
    Vector3::z()
}

/// Builds a rotation of `angle` radians about `axis`.
///
/// A zero-length axis yields the identity rotation.
pub fn axis_angle(axis: Vector3, angle: f32) -> Quaternion {
    match na::Unit::try_new(axis, EPSILON) {
        Some(unit) => Quaternion::from_axis_angle(&unit, angle),
        None => Quaternion::identity(),
    }
}

/// Angle in radians of the rotation taking `a` to `b`.
///
/// Uses `atan2` on the relative quaternion so it stays accurate for
/// nearly equal rotations, where `acos` of the scalar part does not.
pub fn angle_between(a: &Quaternion, b: &Quaternion) -> f32 {
    let relative = a.rotation_to(b);
    let q = relative.quaternion();
    2.0 * q.imag().norm().atan2(q.scalar().abs())
}
