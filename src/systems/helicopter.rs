use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{
    ControlInputs, DamageState, DebugForceLedger, Force, ForceCategory, HelicopterParams,
    HoverHold, Moment, PhysicsComponent, ReferenceFrame, RotorState, SpatialComponent, Telemetry,
    VehicleParams, VehiclePart,
};
use crate::resources::PhysicsConfig;

/// Collective stick travel inside this band reads as released
const COLLECTIVE_DEADZONE: f64 = 0.05;
/// Cyclic inside this band counts as centered for auto-leveling
const CYCLIC_DEADBAND: f64 = 0.1;

/// Collective command for this tick: the lever position when the pilot is
/// flying it, or the altitude-hold PID output when the lever is released
/// in the air.
///
/// Releasing the lever captures the current altitude as the hold target
/// and zeroes the integral; any manual input drops the hold again, so the
/// next release recaptures from wherever the vehicle is then.
pub fn collective_command(
    params: &HelicopterParams,
    input: f64,
    telemetry: &Telemetry,
    hold: &mut HoverHold,
    dt: f64,
) -> f64 {
    if input.abs() > COLLECTIVE_DEADZONE {
        hold.disengage();
        return ((input + 1.0) / 2.0).clamp(0.0, 1.0);
    }

    if telemetry.altitude_agl <= params.hover.min_height {
        hold.disengage();
        return ((input + 1.0) / 2.0).clamp(0.0, 1.0);
    }

    let target = match hold.target {
        Some(target) => target,
        None => {
            hold.target = Some(telemetry.altitude_msl);
            hold.integral = 0.0;
            telemetry.altitude_msl
        }
    };

    let error = target - telemetry.altitude_msl;
    hold.integral = (hold.integral + error * dt)
        .clamp(-params.hover.integral_limit, params.hover.integral_limit);

    let collective = params.hover.base_collective
        + params.hover.kp * error
        + params.hover.ki * hold.integral
        - params.hover.kd * telemetry.vertical_speed;
    collective.clamp(0.0, 1.0)
}

/// Rotor force model. Every bit of authority scales with the spool state:
/// a freshly started machine has no lift and no control until the rotor
/// comes up to speed.
pub fn helicopter_force_system(
    mut query: Query<(
        &VehicleParams,
        &SpatialComponent,
        &Telemetry,
        &mut ControlInputs,
        &DamageState,
        &mut RotorState,
        &mut HoverHold,
        &mut PhysicsComponent,
        &mut DebugForceLedger,
    )>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    for (params, spatial, telemetry, mut controls, damage, mut rotor, mut hold, mut physics, mut ledger) in
        query.iter_mut()
    {
        let VehicleParams::Helicopter(params) = params else {
            continue;
        };
        controls.clamp_ranges();

        // First-order spool toward nominal speed while the engine runs,
        // toward zero otherwise. A destroyed main rotor winds down too.
        let rotor_intact = damage.is_intact(VehiclePart::MainRotor);
        let spool_target = if controls.engine_on && rotor_intact { 1.0 } else { 0.0 };
        rotor.spin += (spool_target - rotor.spin) * (dt / params.spool_time).min(1.0);
        rotor.spin = rotor.spin.clamp(0.0, 1.0);
        let spin_sq = rotor.spin * rotor.spin;

        let collective = collective_command(params, controls.collective, telemetry, &mut hold, dt);

        // Ground effect and effective translational lift
        let ge = if telemetry.altitude_agl >= 0.0
            && telemetry.altitude_agl < params.ground_effect_height
        {
            let x = 1.0 - telemetry.altitude_agl / params.ground_effect_height;
            params.ground_effect_max * x * x
        } else {
            0.0
        };
        let horizontal_speed =
            (spatial.velocity.x * spatial.velocity.x + spatial.velocity.y * spatial.velocity.y).sqrt();
        let etl = (horizontal_speed / params.translational_lift_speed).clamp(0.0, 1.0);

        let lift_magnitude = if rotor_intact {
            params.max_lift
                * collective
                * spin_sq
                * (1.0 + ge)
                * (1.0 + params.translational_lift_bonus * etl)
        } else {
            0.0
        };

        // Cyclic tilts the lift vector off the mast by a small angle; the
        // force acts at the rotor head, so the tilt is also the source of
        // the pitch/roll control moments
        if lift_magnitude > 0.0 {
            let tilt = params.cyclic_tilt_deg.to_radians();
            let dir_body = Vector3::new(
                -controls.pitch * tilt,
                -controls.roll * tilt,
                1.0,
            )
            .normalize();
            let lift = dir_body * lift_magnitude;
            physics.add_force(Force {
                vector: lift,
                point: Some(Vector3::new(0.0, 0.0, params.rotor_height)),
                frame: ReferenceFrame::Body,
                category: ForceCategory::Aerodynamic,
            });
            ledger.record("rotor", spatial.attitude * lift, [0.2, 0.9, 0.3]);
        }

        // Main-rotor reaction torque about the mast. With a working tail
        // rotor it is countered exactly and the pedals plus yaw damping
        // work on top; without one the fuselage simply spins up.
        let mut moment = Vector3::zeros();
        moment.z += params.reaction_torque_factor * lift_magnitude;
        if damage.is_intact(VehiclePart::TailRotor) {
            moment.z -= params.reaction_torque_factor * lift_magnitude;
            moment.z += params.pedal_authority * controls.yaw * rotor.spin;
            moment.z -= params.yaw_damping * spatial.angular_velocity.z;
        }

        // Pitch/roll damping stays regardless of tail state
        moment.x -= params.pitch_roll_damping * spatial.angular_velocity.x;
        moment.y -= params.pitch_roll_damping * spatial.angular_velocity.y;

        // Righting torque toward vertical when the cyclic is centered
        if controls.pitch.abs() < CYCLIC_DEADBAND && controls.roll.abs() < CYCLIC_DEADBAND {
            let up_body = spatial.attitude.inverse() * Vector3::z();
            moment.x -= params.auto_level_gain * up_body.y * spin_sq;
            moment.y += params.auto_level_gain * up_body.x * spin_sq;
        }

        physics.add_moment(Moment {
            vector: moment,
            frame: ReferenceFrame::Body,
            category: ForceCategory::Aerodynamic,
        });

        // Quadratic airframe drag
        let speed = spatial.velocity.norm();
        if speed > 0.1 {
            let drag = -spatial.velocity * speed * params.drag_coefficient;
            physics.add_force(Force {
                vector: drag,
                point: None,
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::Aerodynamic,
            });
            ledger.record("drag", drag, [0.9, 0.25, 0.2]);
        }
    }
}
