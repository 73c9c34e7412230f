use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{
    CarParams, ControlInputs, DamageState, DebugForceLedger, Force, ForceCategory, Moment,
    Occupancy, PhysicsComponent, ReferenceFrame, SpatialComponent, SteeringState, VehicleParams,
};
use crate::resources::{GroundModel, PhysicsConfig};

/// Forward speeds inside this band count as stopped for the drivetrain
const STOPPED_SPEED: f64 = 0.5;

/// Spring-damper response of one suspension leg. Compression and its rate
/// come from the downward probe at the wheel; springs only push.
fn suspension_force(
    params: &CarParams,
    ride_height: f64,
    compression_rate: f64,
) -> (f64, f64) {
    let sus = &params.suspension;
    let compression = (sus.rest_length - ride_height).clamp(0.0, sus.travel);
    if compression <= 0.0 {
        return (0.0, 0.0);
    }
    let force = (compression * sus.stiffness + compression_rate * sus.damping).max(0.0);
    (compression, force)
}

/// Suspension, drivetrain, steering and traction for the car kind.
///
/// Suspension and the passive resistances run whether or not anyone is
/// aboard; an abandoned vehicle additionally gets its inputs forced to
/// zero upstream and strong braking plus angular damping here, so it
/// always comes to rest.
pub fn car_force_system(
    mut query: Query<(
        &VehicleParams,
        &SpatialComponent,
        &mut ControlInputs,
        &DamageState,
        &Occupancy,
        &mut SteeringState,
        &mut PhysicsComponent,
        &mut DebugForceLedger,
    )>,
    ground: Res<GroundModel>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    for (params, spatial, mut controls, damage, occupancy, mut steering, mut physics, mut ledger) in
        query.iter_mut()
    {
        let VehicleParams::Car(params) = params else {
            continue;
        };
        controls.clamp_ranges();
        let occupied = occupancy.is_occupied();

        let forward = spatial.forward();
        let forward_speed = spatial.velocity.dot(&forward);

        // --- Suspension: four independent spring-damper legs ---
        let mut contact = [false; 4];
        let mut net_suspension = Vector3::zeros();
        for (i, wheel) in params.wheels.iter().enumerate() {
            if !damage.is_intact(CarParams::wheel_part(i)) {
                continue;
            }
            let world_point = spatial.position + spatial.attitude * wheel;
            let ride_height =
                world_point.z - ground.height_at(world_point.x, world_point.y);
            let v_point =
                spatial.velocity + spatial.attitude * spatial.angular_velocity.cross(wheel);
            let (compression, force) = suspension_force(params, ride_height, -v_point.z);
            if compression > 0.0 {
                contact[i] = true;
            }
            if force > 0.0 {
                let vector = Vector3::new(0.0, 0.0, force);
                net_suspension += vector;
                physics.add_force(Force {
                    vector,
                    point: Some(*wheel),
                    frame: ReferenceFrame::Inertial,
                    category: ForceCategory::Ground,
                });
            }
        }
        ledger.record("suspension", net_suspension, [0.3, 0.55, 0.95]);

        // --- Steering: slew the front wheels toward the input target ---
        let target = controls.yaw * params.steer_max_deg.to_radians();
        let rate = if target.abs() >= steering.angle.abs() {
            params.steer_blend_rate
        } else {
            params.steer_return_rate
        };
        let step = (target - steering.angle).clamp(-rate * dt, rate * dt);
        steering.angle += step;

        let front_fraction = damage.intact_fraction(&CarParams::front_wheels());
        let rear_fraction = damage.intact_fraction(&CarParams::rear_wheels());
        let front_contact = contact[0] || contact[1];
        let rear_contact = contact[2] || contact[3];

        // --- Drivetrain: accelerate with the request, brake against it ---
        if occupied && rear_contact && rear_fraction > 0.0 {
            let drive = controls.drive;
            let mut traction = Vector3::zeros();
            if drive.abs() > 1e-3 {
                let same_direction =
                    forward_speed.abs() < STOPPED_SPEED || drive * forward_speed >= 0.0;
                if same_direction {
                    let capped = (drive > 0.0 && forward_speed >= params.max_speed)
                        || (drive < 0.0 && forward_speed <= -params.max_reverse_speed);
                    if !capped {
                        traction += forward * drive * params.drive_force * rear_fraction;
                    }
                } else {
                    traction -=
                        forward * forward_speed.signum() * drive.abs() * params.brake_force;
                }
            }
            if controls.brake > 0.0 && forward_speed.abs() > 1e-3 {
                traction -=
                    forward * forward_speed.signum() * controls.brake * params.brake_force;
            }
            if traction.norm() > 0.0 {
                physics.add_force(Force {
                    vector: traction,
                    point: None,
                    frame: ReferenceFrame::Inertial,
                    category: ForceCategory::Ground,
                });
                ledger.record("traction", traction, [1.0, 0.6, 0.1]);
            }
        }

        // --- Yaw control: chase the Ackermann yaw-rate target ---
        if occupied && front_contact && front_fraction > 0.0 {
            let desired_yaw_rate = forward_speed * steering.angle.tan() / params.wheelbase();
            let torque =
                params.yaw_match_gain * (desired_yaw_rate - spatial.angular_velocity.z) * front_fraction;
            physics.add_moment(Moment {
                vector: Vector3::new(0.0, 0.0, torque),
                frame: ReferenceFrame::Body,
                category: ForceCategory::Ground,
            });
        }

        // --- Lateral grip, per wheel, with slip falloff ---
        let mut net_grip = Vector3::zeros();
        for (i, wheel) in params.wheels.iter().enumerate() {
            if !contact[i] || !damage.is_intact(CarParams::wheel_part(i)) {
                continue;
            }
            let steer = if i < 2 { steering.angle } else { 0.0 };
            let lat_dir_body = Vector3::new(-steer.sin(), steer.cos(), 0.0);
            let lat_dir = spatial.attitude * lat_dir_body;

            let v_point =
                spatial.velocity + spatial.attitude * spatial.angular_velocity.cross(wheel);
            let lateral_speed = v_point.dot(&lat_dir);

            let mut grip = params.lateral_grip;
            if lateral_speed.abs() > params.slip_threshold {
                grip /= params.slip_grip_divisor;
            }
            let force = -lat_dir * lateral_speed * grip;
            net_grip += force;
            physics.add_force(Force {
                vector: force,
                point: Some(*wheel),
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::Ground,
            });
        }
        ledger.record("grip", net_grip, [0.55, 0.35, 0.9]);

        // --- Always-on resistances, even unoccupied or wheelless ---
        let horizontal = Vector3::new(spatial.velocity.x, spatial.velocity.y, 0.0);
        if horizontal.norm() > 1e-3 {
            physics.add_force(Force {
                vector: -horizontal * params.rolling_resistance,
                point: None,
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::Ground,
            });
        }
        let speed = spatial.velocity.norm();
        if speed > 1e-3 {
            let drag = -spatial.velocity * speed * params.air_drag;
            physics.add_force(Force {
                vector: drag,
                point: None,
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::Aerodynamic,
            });
            ledger.record("drag", drag, [0.9, 0.25, 0.2]);
        }

        // --- Abandoned vehicle: brake hard and kill residual rotation ---
        if !occupied {
            if (contact[0] || contact[1] || contact[2] || contact[3])
                && horizontal.norm() > 1e-3
            {
                physics.add_force(Force {
                    vector: -horizontal * params.parked_brake_gain,
                    point: None,
                    frame: ReferenceFrame::Inertial,
                    category: ForceCategory::Ground,
                });
            }
            physics.add_moment(Moment {
                vector: -spatial.angular_velocity * params.parked_angular_damping,
                frame: ReferenceFrame::Body,
                category: ForceCategory::Ground,
            });
        }
    }
}
