use bevy::prelude::*;
use nalgebra::Vector3;

use crate::utils::constants::{MAX_ALTITUDE, MAX_ANGULAR_RATE, MAX_SPEED, MIN_ALTITUDE};

/// Configuration for the physics step
#[derive(Resource)]
pub struct PhysicsConfig {
    pub timestep: f64,
    pub gravity: Vector3<f64>,

    // Sanity clamps applied to kinematic state every tick
    pub max_velocity: f64,
    pub max_angular_velocity: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0, // 120 Hz
            gravity: Vector3::new(0.0, 0.0, -9.81),
            max_velocity: MAX_SPEED,
            max_angular_velocity: MAX_ANGULAR_RATE,
            min_altitude: MIN_ALTITUDE,
            max_altitude: MAX_ALTITUDE,
        }
    }
}

/// Floating-origin rebase settings. The check runs once per tick at the step
/// boundary, after integration.
#[derive(Resource)]
pub struct RebaseConfig {
    /// Horizontal distance from the origin that triggers a rebase (m)
    pub threshold: f64,
}

impl Default for RebaseConfig {
    fn default() -> Self {
        Self { threshold: 4000.0 }
    }
}

/// Cumulative origin drift since startup. Collaborators that generate
/// large-scale content (terrain streaming, navigation) read this to keep
/// their own coordinates consistent across rebases.
#[derive(Resource, Default)]
pub struct OriginOffset {
    pub accumulated: Vector3<f64>,
    pub rebase_count: u32,
}
