use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{
    ControlInputs, DebugForceLedger, Occupancy, PhysicsComponent, SpatialComponent,
};
use crate::resources::PhysicsConfig;

/// Bring a kinematic state back inside the simulation envelope.
///
/// Non-finite components are zeroed, speed and angular rate are clamped to
/// the hard caps, and altitude is clamped to the world bounds. Returns true
/// if anything had to be corrected. This never fails: whatever state comes
/// in, a finite bounded state comes out.
pub fn sanitize_kinematics(spatial: &mut SpatialComponent, config: &PhysicsConfig) -> bool {
    let mut corrected = false;

    corrected |= zero_non_finite(&mut spatial.position);
    corrected |= zero_non_finite(&mut spatial.velocity);
    corrected |= zero_non_finite(&mut spatial.angular_velocity);

    if !spatial
        .attitude
        .as_ref()
        .coords
        .iter()
        .all(|c| c.is_finite())
    {
        spatial.attitude = UnitQuaternion::identity();
        corrected = true;
    }

    let speed = spatial.velocity.norm();
    if speed > config.max_velocity {
        spatial.velocity *= config.max_velocity / speed;
        corrected = true;
    }

    let rate = spatial.angular_velocity.norm();
    if rate > config.max_angular_velocity {
        spatial.angular_velocity *= config.max_angular_velocity / rate;
        corrected = true;
    }

    if spatial.position.z < config.min_altitude || spatial.position.z > config.max_altitude {
        spatial.position.z = spatial.position.z.clamp(config.min_altitude, config.max_altitude);
        corrected = true;
    }

    corrected
}

fn zero_non_finite(v: &mut Vector3<f64>) -> bool {
    let mut corrected = false;
    for c in v.iter_mut() {
        if !c.is_finite() {
            *c = 0.0;
            corrected = true;
        }
    }
    corrected
}

/// First stage of the tick: sanity-clamp every kinematic state and clear the
/// previous tick's force accumulation and debug ledger.
pub fn sanitize_system(
    mut query: Query<(
        &mut SpatialComponent,
        &mut PhysicsComponent,
        Option<&mut DebugForceLedger>,
    )>,
    config: Res<PhysicsConfig>,
) {
    for (mut spatial, mut physics, ledger) in query.iter_mut() {
        if sanitize_kinematics(&mut spatial, &config) {
            debug!("kinematic state corrected by sanitizer");
        }
        physics.clear_forces();
        if let Some(mut ledger) = ledger {
            ledger.clear();
        }
    }
}

/// Inputs come from the occupant; without one there is nothing at the
/// controls, so every axis reads zero.
pub fn release_unoccupied_controls_system(
    mut query: Query<(&Occupancy, &mut ControlInputs)>,
) {
    for (occupancy, mut controls) in query.iter_mut() {
        if !occupancy.is_occupied() {
            controls.release();
        }
    }
}
