use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{SpatialComponent, Telemetry};
use crate::resources::{GroundModel, PhysicsConfig, Wind};
use crate::utils::constants::GRAVITY;

/// Airspeed below which angle of attack is meaningless and reads zero
const MIN_AOA_AIRSPEED: f64 = 0.5;

/// Recompute all derived flight data from the current kinematic state.
///
/// Pure except for the previous-velocity carry used to estimate
/// acceleration for the g-force readout.
pub fn update_telemetry(
    telemetry: &mut Telemetry,
    spatial: &SpatialComponent,
    wind: &Vector3<f64>,
    ground_height: f64,
    gravity: &Vector3<f64>,
    dt: f64,
) {
    let air_velocity = spatial.velocity - wind;

    telemetry.airspeed = air_velocity.norm();
    telemetry.altitude_msl = spatial.position.z;
    telemetry.altitude_agl = spatial.position.z - ground_height;
    telemetry.vertical_speed = spatial.velocity.z;

    // Heading from the horizontal projection of the body forward axis.
    // 0 deg = +X (north), 90 deg = -Y (east), clockwise viewed from above.
    let forward = spatial.forward();
    telemetry.heading_deg = if forward.x.abs() > 1e-9 || forward.y.abs() > 1e-9 {
        (-forward.y).atan2(forward.x).to_degrees().rem_euclid(360.0)
    } else {
        telemetry.heading_deg
    };

    // Angle of attack from the body-frame airflow
    telemetry.aoa_deg = if telemetry.airspeed > MIN_AOA_AIRSPEED {
        let v_body = spatial.attitude.inverse() * air_velocity;
        (-v_body.z).atan2(v_body.x).to_degrees()
    } else {
        0.0
    };

    // Load factor from the acceleration estimate minus gravity
    let acceleration = (spatial.velocity - telemetry.previous_velocity) / dt;
    telemetry.g_force = (acceleration - gravity).norm() / GRAVITY;
    telemetry.previous_velocity = spatial.velocity;
}

pub fn telemetry_system(
    mut query: Query<(&mut Telemetry, &SpatialComponent)>,
    wind: Res<Wind>,
    ground: Res<GroundModel>,
    config: Res<PhysicsConfig>,
) {
    for (mut telemetry, spatial) in query.iter_mut() {
        let ground_height = ground.height_at(spatial.position.x, spatial.position.y);
        update_telemetry(
            &mut telemetry,
            spatial,
            &wind.velocity,
            ground_height,
            &config.gravity,
            config.timestep,
        );
    }
}
