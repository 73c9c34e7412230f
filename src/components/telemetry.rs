use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Derived flight data, recomputed from kinematic state every tick.
///
/// Everything here is a pure function of the current state except
/// `previous_velocity`, which is the one piece of carried state and exists
/// only to estimate acceleration for the g-force readout.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Telemetry {
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Altitude above the sea-level reference (m)
    pub altitude_msl: f64,
    /// Altitude above ground (m)
    pub altitude_agl: f64,
    /// Vertical speed, positive up (m/s)
    pub vertical_speed: f64,
    /// Angle of attack (deg)
    pub aoa_deg: f64,
    /// Load factor (g)
    pub g_force: f64,
    /// Heading (deg, 0-360, 0 = +X north)
    pub heading_deg: f64,
    /// Velocity at the previous tick, for acceleration estimation
    pub previous_velocity: Vector3<f64>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            airspeed: 0.0,
            altitude_msl: 0.0,
            altitude_agl: 0.0,
            vertical_speed: 0.0,
            aoa_deg: 0.0,
            g_force: 1.0,
            heading_deg: 0.0,
            previous_velocity: Vector3::zeros(),
        }
    }
}
