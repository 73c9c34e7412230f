use bevy::prelude::*;
use nalgebra::Vector3;
use rand::Rng;

use crate::components::{
    DebugForceLedger, Force, ForceCategory, GustState, PhysicsComponent, ReferenceFrame,
    SpatialComponent, Telemetry,
};
use crate::resources::{Atmosphere, PhysicsConfig, RngBank, TurbulenceConfig, Wind};

/// Smoothed stochastic turbulence, applied when airborne and faster than
/// the minimum airspeed, scaled by dynamic pressure.
///
/// The gust state wanders: a new random target direction is drawn on a
/// fixed period and the applied vector relaxes toward it, so the
/// perturbation is continuous rather than white noise.
pub fn turbulence_system(
    mut query: Query<(
        &mut GustState,
        &Telemetry,
        &SpatialComponent,
        &mut PhysicsComponent,
        &mut DebugForceLedger,
    )>,
    config: Res<TurbulenceConfig>,
    physics_config: Res<PhysicsConfig>,
    atmosphere: Res<Atmosphere>,
    wind: Res<Wind>,
    mut rng: ResMut<RngBank>,
) {
    let dt = physics_config.timestep;
    for (mut gust, telemetry, spatial, mut physics, mut ledger) in query.iter_mut() {
        let airborne = telemetry.altitude_agl > config.min_height;
        let fast_enough = telemetry.airspeed > config.min_airspeed;
        if !airborne || !fast_enough {
            // Ease the residual gust out instead of cutting it
            gust.current *= (1.0 - config.smoothing * dt).max(0.0);
            continue;
        }

        gust.time_to_next -= dt;
        if gust.time_to_next <= 0.0 {
            let stream = rng.stream("turbulence");
            gust.target = Vector3::new(
                stream.gen::<f64>() * 2.0 - 1.0,
                stream.gen::<f64>() * 2.0 - 1.0,
                stream.gen::<f64>() * 2.0 - 1.0,
            );
            gust.time_to_next = config.gust_period;
        }

        let blend = (config.smoothing * dt).min(1.0);
        let target = gust.target;
        let current = gust.current;
        gust.current += (target - current) * blend;

        let rho = atmosphere.density_at(telemetry.altitude_msl);
        let air_velocity = spatial.velocity - wind.velocity;
        let q_dyn = 0.5 * rho * air_velocity.norm_squared();

        let force = gust.current * q_dyn * config.intensity;
        physics.add_force(Force {
            vector: force,
            point: None,
            frame: ReferenceFrame::Inertial,
            category: ForceCategory::Turbulence,
        });
        ledger.record("turbulence", force, [0.7, 0.4, 0.9]);
    }
}
