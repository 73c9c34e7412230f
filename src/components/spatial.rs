use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Kinematic state of a rigid body.
///
/// World frame is right-handed with Z up; the body frame is X forward,
/// Y left, Z up. The attitude quaternion rotates body to world.
///
/// Owned by the physics step: everything else reads it, and it is only
/// written through force application, the per-tick sanitizer, or the
/// floating-origin teleport.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in body frame [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Body X axis in world coordinates
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * Vector3::x()
    }

    /// Body Y axis in world coordinates
    pub fn left(&self) -> Vector3<f64> {
        self.attitude * Vector3::y()
    }

    /// Body Z axis in world coordinates
    pub fn up(&self) -> Vector3<f64> {
        self.attitude * Vector3::z()
    }
}
