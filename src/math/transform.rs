use crate::math::{Quaternion, Vector3, EPSILON};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Represents a transformation in 3D space (position, rotation, and scale)
///
/// Rigid objects only move their rotation and position; scale is carried so
/// that visual child nodes can apply the template scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 3D space
    pub position: Vector3,

    /// Rotation as a unit quaternion
    pub rotation: Quaternion,

    /// Scale in each axis
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a new transform with the given position, rotation, and scale
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a new identity transform (no translation, no rotation, unit scale)
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Quaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Creates a new transform from a position and rotation
    #[inline]
    pub fn from_position_rotation(position: Vector3, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3::repeat(1.0),
        }
    }

    /// Creates a new transform that only scales
    #[inline]
    pub fn from_scale(scale: Vector3) -> Self {
        Self {
            scale,
            ..Self::identity()
        }
    }

    /// Transforms a point by this transform
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation * point.component_mul(&self.scale) + self.position
    }

    /// Transforms a direction vector by this transform (ignoring translation)
    #[inline]
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rotation * direction.component_mul(&self.scale)
    }

    /// Inverts this transform.
    ///
    /// Exact for uniform scale, which is all the scene graph produces.
    pub fn inverse(&self) -> Self {
        let inv_scale = self.scale.map(|s| if s.abs() > EPSILON { 1.0 / s } else { 1.0 });
        let inv_rotation = self.rotation.inverse();
        let inv_position = -(inv_rotation * self.position).component_mul(&inv_scale);

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Combines this transform with a child transform: the result maps
    /// child-local coordinates through `child` and then through `self`
    pub fn combine(&self, child: &Self) -> Self {
        Self {
            position: self.transform_point(child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }

    /// Returns true when position and rotation match within `epsilon`
    pub fn approx_eq_rigid(&self, other: &Self, epsilon: f32) -> bool {
        (self.position - other.position).norm() <= epsilon
            && crate::math::angle_between(&self.rotation, &other.rotation) <= epsilon
    }
}
