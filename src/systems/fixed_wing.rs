use bevy::prelude::*;
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::components::{
    ControlInputs, DamageState, DebugForceLedger, FixedWingParams, Force, ForceCategory, Moment,
    PhysicsComponent, ReferenceFrame, SpatialComponent, Telemetry, VehicleParams, VehiclePart,
};
use crate::resources::{Atmosphere, Wind};

/// No aerodynamic forces below this airspeed
const MIN_AERO_AIRSPEED: f64 = 0.5;
/// Inputs inside this band count as centered for the passive stability terms
const CENTERED_DEADBAND: f64 = 0.1;
/// Pitch trim only engages below this pitch rate (rad/s)
const TRIM_MAX_PITCH_RATE: f64 = 0.2;
/// Throttle at or below this reads as idle for wheel braking
const IDLE_THROTTLE: f64 = 0.05;
/// Climb rate above which ground contact is released (m/s)
const CONTACT_MAX_CLIMB: f64 = 0.5;

/// Per-tick aerodynamic coefficients, derived purely from angle of attack,
/// flap deployment and height above ground. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct AeroState {
    pub cl: f64,
    pub cd: f64,
    pub ground_effect: f64,
    pub stalled: bool,
}

/// Lift coefficient with stall behavior.
///
/// Linear in AoA below the stall angle, clamped to +/- cl_max. Past the
/// stall the pre-stall value at the boundary fades linearly with excess
/// AoA, floored at 30% of the stall value so deep-stall lift never quite
/// dies. Continuous at the boundary by construction. Flaps add their bonus
/// on top in both regimes.
pub fn lift_coefficient(params: &FixedWingParams, aoa_rad: f64, flap: f64) -> (f64, bool) {
    let stall = params.stall_angle_deg.to_radians();
    let clamp = |cl: f64| cl.clamp(-params.cl_max, params.cl_max);

    let (mut cl, stalled) = if aoa_rad.abs() <= stall {
        (clamp(params.cl0 + params.cl_alpha * aoa_rad), false)
    } else {
        let cl_stall = clamp(params.cl0 + params.cl_alpha * stall * aoa_rad.signum());
        let excess = aoa_rad.abs() - stall;
        let faded = cl_stall * (1.0 - params.stall_dropoff * excess);
        let floor = 0.3 * cl_stall;
        let cl = if cl_stall >= 0.0 {
            faded.max(floor)
        } else {
            faded.min(floor)
        };
        (cl, true)
    };

    if let Some(flaps) = &params.flaps {
        cl += flaps.cl_bonus * flap;
    }
    (cl, stalled)
}

/// Drag build-up: parasitic + induced + high-AoA form drag + a post-stall
/// penalty growing with excess AoA (continuous at the stall boundary).
pub fn drag_coefficient(params: &FixedWingParams, cl: f64, aoa_rad: f64, flap: f64) -> f64 {
    let stall = params.stall_angle_deg.to_radians();
    let excess = (aoa_rad.abs() - stall).max(0.0);

    let induced = cl * cl / (PI * params.oswald_efficiency * params.aspect_ratio());
    let mut cd = params.cd0
        + induced
        + params.form_drag_factor * aoa_rad.sin().powi(2)
        + params.stall_drag_penalty * excess;

    if let Some(flaps) = &params.flaps {
        cd += flaps.cd_penalty * flap;
    }
    cd
}

/// Extra lift fraction from ground proximity: quadratic falloff from full
/// bonus on the deck to nothing at the threshold height.
pub fn ground_effect_bonus(params: &FixedWingParams, altitude_agl: f64) -> f64 {
    if altitude_agl < 0.0 || altitude_agl >= params.ground_effect_height {
        return 0.0;
    }
    let x = 1.0 - altitude_agl / params.ground_effect_height;
    params.ground_effect_max * x * x
}

/// Control-surface authority: dead below the minimum speed, saturating at
/// the reference speed, cut to a fraction while stalled.
pub fn control_effectiveness(params: &FixedWingParams, airspeed: f64, stalled: bool) -> f64 {
    let span = params.ref_control_speed - params.min_control_speed;
    let eff = ((airspeed - params.min_control_speed) / span).clamp(0.0, 1.0);
    if stalled {
        eff * params.stall_control_factor
    } else {
        eff
    }
}

pub fn aero_state(params: &FixedWingParams, aoa_rad: f64, flap: f64, altitude_agl: f64) -> AeroState {
    let (cl, stalled) = lift_coefficient(params, aoa_rad, flap);
    let cd = drag_coefficient(params, cl, aoa_rad, flap);
    AeroState {
        cl,
        cd,
        ground_effect: ground_effect_bonus(params, altitude_agl),
        stalled,
    }
}

fn wing_fraction(damage: &DamageState) -> f64 {
    damage.intact_fraction(&[VehiclePart::LeftWing, VehiclePart::RightWing])
}

/// Force model shared by the FixedWing and Jet kinds; the parameter struct
/// carries the tuning differences (including the jet's afterburner).
pub fn fixed_wing_force_system(
    mut query: Query<(
        &VehicleParams,
        &SpatialComponent,
        &Telemetry,
        &mut ControlInputs,
        &DamageState,
        &mut PhysicsComponent,
        &mut DebugForceLedger,
    )>,
    atmosphere: Res<Atmosphere>,
    wind: Res<Wind>,
) {
    for (params, spatial, telemetry, mut controls, damage, mut physics, mut ledger) in
        query.iter_mut()
    {
        let (params, has_afterburner) = match params {
            VehicleParams::FixedWing(p) => (p, false),
            VehicleParams::Jet(p) => (p, true),
            _ => continue,
        };
        controls.clamp_ranges();

        let rho = atmosphere.density_at(telemetry.altitude_msl);
        let air_velocity = spatial.velocity - wind.velocity;
        let airspeed = air_velocity.norm();
        let q_dyn = 0.5 * rho * airspeed * airspeed;
        let aoa_rad = telemetry.aoa_deg.to_radians();
        let flap = if params.flaps.is_some() { controls.flaps } else { 0.0 };

        let aero = aero_state(params, aoa_rad, flap, telemetry.altitude_agl);
        let wings = wing_fraction(damage);
        let ht = if damage.is_intact(VehiclePart::HorizontalTail) { 1.0 } else { 0.0 };
        let vt = if damage.is_intact(VehiclePart::VerticalTail) { 1.0 } else { 0.0 };

        let mut lift_magnitude = 0.0;
        if airspeed > MIN_AERO_AIRSPEED {
            let air_hat = air_velocity / airspeed;

            // Lift: perpendicular to the flight path, in the plane spanned
            // by the velocity and the vehicle's up axis
            let up = spatial.up();
            let lateral = up - air_hat * up.dot(&air_hat);
            if lateral.norm() > 1e-6 {
                let lift_dir = lateral.normalize();
                lift_magnitude =
                    q_dyn * params.wing_area * aero.cl * wings * (1.0 + aero.ground_effect);
                let lift = lift_dir * lift_magnitude;
                physics.add_force(Force {
                    vector: lift,
                    point: None,
                    frame: ReferenceFrame::Inertial,
                    category: ForceCategory::Aerodynamic,
                });
                ledger.record("lift", lift, [0.2, 0.9, 0.3]);
            }

            let drag = -air_hat * q_dyn * params.wing_area * aero.cd;
            physics.add_force(Force {
                vector: drag,
                point: None,
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::Aerodynamic,
            });
            ledger.record("drag", drag, [0.9, 0.25, 0.2]);
        }

        // Thrust
        if controls.engine_on && controls.throttle > 0.0 {
            let mut thrust = params.max_thrust * controls.throttle;
            if let (true, Some(multiplier)) = (controls.afterburner && has_afterburner, params.afterburner)
            {
                thrust *= multiplier;
            }
            let thrust_force = Vector3::new(thrust, 0.0, 0.0);
            physics.add_force(Force {
                vector: thrust_force,
                point: None,
                frame: ReferenceFrame::Body,
                category: ForceCategory::Propulsive,
            });
            ledger.record("thrust", spatial.attitude * thrust_force, [1.0, 0.6, 0.1]);
        }

        // Control surfaces. Nose-up is a negative moment about the
        // left-pointing body Y axis.
        let eff = control_effectiveness(params, airspeed, aero.stalled);
        let mut moment = Vector3::new(
            controls.roll * params.roll_power * eff * wings,
            -controls.pitch * params.pitch_power * eff * ht,
            controls.yaw * params.yaw_power * eff * vt,
        );

        // Passive stability. up_body is the world up axis seen from the
        // body frame; its lateral components measure tilt.
        let up_body = spatial.attitude.inverse() * Vector3::z();
        if airspeed > MIN_AERO_AIRSPEED {
            // Sideslip is negative with the nose left of the flight path,
            // so a positive gain steers the nose back into the wind
            let v_body = spatial.attitude.inverse() * air_velocity;
            let sideslip = v_body.y.atan2(v_body.x);
            moment.z += params.weathervane_gain * sideslip * eff * vt;
        }
        if controls.pitch.abs() < CENTERED_DEADBAND
            && spatial.angular_velocity.y.abs() < TRIM_MAX_PITCH_RATE
        {
            moment.y += params.pitch_trim_gain * up_body.x * eff * ht;
        }
        if controls.roll.abs() < CENTERED_DEADBAND {
            moment.x -= params.dihedral_gain * up_body.y * eff * wings;
        }

        // Aerodynamic damping
        moment -= params
            .angular_damping
            .component_mul(&spatial.angular_velocity)
            * eff;

        // Losing exactly one wing leaves the survivor's lift uncentered:
        // a hard roll toward the missing side plus a drag-driven yaw
        let left = damage.is_intact(VehiclePart::LeftWing);
        let right = damage.is_intact(VehiclePart::RightWing);
        if left != right {
            let side = if left { 1.0 } else { -1.0 };
            moment.x += side * params.asym_roll_factor * lift_magnitude.abs();
            moment.z -= side * params.asym_yaw_factor * lift_magnitude.abs();
        }

        physics.add_moment(Moment {
            vector: moment,
            frame: ReferenceFrame::Body,
            category: ForceCategory::Aerodynamic,
        });

        // Rolling ground contact: lateral tire grip per wheel, nosewheel
        // steered by the rudder axis, braking at idle throttle
        if let Some(gear) = &params.gear {
            let grounded = controls.gear_down
                && damage.is_intact(VehiclePart::LandingGear)
                && telemetry.altitude_agl < gear.contact_height
                && telemetry.vertical_speed <= CONTACT_MAX_CLIMB;
            if grounded {
                let steer = controls.yaw * gear.steer_angle_max_deg.to_radians();
                let mut net_ground = Vector3::zeros();
                for (i, wheel) in gear.wheels.iter().enumerate() {
                    let (sin_s, cos_s) = if i == 0 { (steer.sin(), steer.cos()) } else { (0.0, 1.0) };
                    let roll_dir_body = Vector3::new(cos_s, sin_s, 0.0);
                    let lat_dir_body = Vector3::new(-sin_s, cos_s, 0.0);

                    let v_point = spatial.velocity
                        + spatial.attitude * spatial.angular_velocity.cross(wheel);
                    let roll_dir = spatial.attitude * roll_dir_body;
                    let lat_dir = spatial.attitude * lat_dir_body;

                    let mut force = -lat_dir * v_point.dot(&lat_dir) * gear.tire_grip;
                    if controls.throttle <= IDLE_THROTTLE {
                        force -= roll_dir * v_point.dot(&roll_dir) * gear.brake_gain;
                    }
                    net_ground += force;
                    physics.add_force(Force {
                        vector: force,
                        point: Some(*wheel),
                        frame: ReferenceFrame::Inertial,
                        category: ForceCategory::Ground,
                    });
                }
                ledger.record("gear", net_ground, [0.6, 0.6, 0.65]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::VehicleConfig;
    use approx::assert_relative_eq;

    fn trainer_params() -> FixedWingParams {
        match VehicleConfig::trainer().params {
            VehicleParams::FixedWing(p) => p,
            _ => unreachable!(),
        }
    }

    #[test]
    fn cl_is_linear_and_clamped_below_stall() {
        let params = trainer_params();
        let (cl, stalled) = lift_coefficient(&params, 0.0, 0.0);
        assert_relative_eq!(cl, 0.35, epsilon = 1e-12);
        assert!(!stalled);

        let (cl, _) = lift_coefficient(&params, 5f64.to_radians(), 0.0);
        assert_relative_eq!(cl, 0.35 + 2.8 * 5f64.to_radians(), epsilon = 1e-12);

        // Sweep the whole pre-stall range: never beyond cl_max
        for deg in -14..=14 {
            let (cl, stalled) = lift_coefficient(&params, (deg as f64).to_radians(), 0.0);
            assert!(cl.abs() <= params.cl_max + 1e-12);
            assert!(!stalled);
        }
    }

    #[test]
    fn cl_is_continuous_at_the_stall_boundary() {
        let params = trainer_params();
        let stall = params.stall_angle_deg.to_radians();
        let eps = 1e-7;

        let (below, _) = lift_coefficient(&params, stall - eps, 0.0);
        let (above, stalled) = lift_coefficient(&params, stall + eps, 0.0);
        assert!(stalled);
        assert_relative_eq!(below, above, epsilon = 1e-4);

        let (below, _) = lift_coefficient(&params, -stall + eps, 0.0);
        let (above, _) = lift_coefficient(&params, -stall - eps, 0.0);
        assert_relative_eq!(below, above, epsilon = 1e-4);
    }

    #[test]
    fn deep_stall_lift_floors_at_30_percent() {
        let params = trainer_params();
        let stall = params.stall_angle_deg.to_radians();
        let (cl_stall, _) = lift_coefficient(&params, stall, 0.0);
        let (cl_deep, _) = lift_coefficient(&params, stall + 1.0, 0.0);
        assert_relative_eq!(cl_deep, 0.3 * cl_stall, epsilon = 1e-9);
    }

    #[test]
    fn flaps_add_lift_and_drag() {
        let params = trainer_params();
        let (clean_cl, _) = lift_coefficient(&params, 0.0, 0.0);
        let (flap_cl, _) = lift_coefficient(&params, 0.0, 1.0);
        assert_relative_eq!(flap_cl - clean_cl, 0.5, epsilon = 1e-12);

        let clean_cd = drag_coefficient(&params, clean_cl, 0.0, 0.0);
        let flap_cd = drag_coefficient(&params, clean_cl, 0.0, 1.0);
        assert_relative_eq!(flap_cd - clean_cd, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn reference_lift_scenario() {
        // AoA 0, 50 m/s, sea level: CL 0.35, lift ~ 8575 N
        let params = trainer_params();
        let aero = aero_state(&params, 0.0, 0.0, 1000.0);
        assert_relative_eq!(aero.cl, 0.35, epsilon = 1e-12);

        let q_dyn = 0.5 * 1.225 * 50.0 * 50.0;
        let lift = q_dyn * params.wing_area * aero.cl;
        assert_relative_eq!(lift, 8575.0, epsilon = 1.0);
    }

    #[test]
    fn ground_effect_fades_quadratically() {
        let params = trainer_params();
        assert_relative_eq!(ground_effect_bonus(&params, 0.0), params.ground_effect_max);
        let half = ground_effect_bonus(&params, params.ground_effect_height / 2.0);
        assert_relative_eq!(half, params.ground_effect_max * 0.25, epsilon = 1e-12);
        assert_relative_eq!(ground_effect_bonus(&params, params.ground_effect_height), 0.0);
        assert_relative_eq!(ground_effect_bonus(&params, 1e4), 0.0);
    }

    #[test]
    fn controls_dead_below_minimum_speed() {
        let params = trainer_params();
        assert_relative_eq!(control_effectiveness(&params, 0.0, false), 0.0);
        assert_relative_eq!(
            control_effectiveness(&params, params.min_control_speed, false),
            0.0
        );
        assert_relative_eq!(
            control_effectiveness(&params, params.ref_control_speed, false),
            1.0
        );
        assert_relative_eq!(
            control_effectiveness(&params, params.ref_control_speed * 2.0, false),
            1.0
        );

        let stalled = control_effectiveness(&params, params.ref_control_speed, true);
        assert_relative_eq!(stalled, params.stall_control_factor);
    }

    #[test]
    fn drag_rises_past_stall() {
        let params = trainer_params();
        let stall = params.stall_angle_deg.to_radians();
        let (cl_a, _) = lift_coefficient(&params, stall * 0.9, 0.0);
        let (cl_b, _) = lift_coefficient(&params, stall * 1.5, 0.0);
        let cd_flying = drag_coefficient(&params, cl_a, stall * 0.9, 0.0);
        let cd_stalled = drag_coefficient(&params, cl_b, stall * 1.5, 0.0);
        assert!(cd_stalled > cd_flying);
    }
}
