use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::damage::{DamageState, VehiclePart};
use crate::utils::errors::SimError;

/// Vehicle kind discriminant. Force computation is dispatched on this as a
/// closed set; there is no per-kind virtual dispatch anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Helicopter,
    FixedWing,
    Jet,
}

/// Kind-specific force-model parameters. FixedWing and Jet share one
/// parameter struct and one algorithm, tuned separately.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub enum VehicleParams {
    Car(CarParams),
    Helicopter(HelicopterParams),
    FixedWing(FixedWingParams),
    Jet(FixedWingParams),
}

impl VehicleParams {
    pub fn kind(&self) -> VehicleKind {
        match self {
            VehicleParams::Car(_) => VehicleKind::Car,
            VehicleParams::Helicopter(_) => VehicleKind::Helicopter,
            VehicleParams::FixedWing(_) => VehicleKind::FixedWing,
            VehicleParams::Jet(_) => VehicleKind::Jet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedWingParams {
    pub wing_area: f64,
    pub wing_span: f64,
    pub oswald_efficiency: f64,

    // Lift curve
    pub cl0: f64,
    /// Lift-curve slope (per rad)
    pub cl_alpha: f64,
    pub cl_max: f64,
    pub stall_angle_deg: f64,
    /// Fraction of stall CL shed per radian of excess AoA
    pub stall_dropoff: f64,

    // Drag build-up
    pub cd0: f64,
    /// High-AoA form drag factor on sin^2(AoA)
    pub form_drag_factor: f64,
    /// Extra drag per radian of post-stall excess AoA
    pub stall_drag_penalty: f64,

    /// High-lift devices; None when the airframe has no flaps
    pub flaps: Option<FlapParams>,

    // Thrust
    pub max_thrust: f64,
    /// Reheat thrust multiplier; None for airframes without one
    pub afterburner: Option<f64>,

    // Control surfaces (N*m at full effectiveness)
    pub pitch_power: f64,
    pub roll_power: f64,
    pub yaw_power: f64,
    /// Below this airspeed the surfaces are dead (m/s)
    pub min_control_speed: f64,
    /// Full authority at and above this airspeed (m/s)
    pub ref_control_speed: f64,
    /// Authority multiplier while stalled
    pub stall_control_factor: f64,

    // Ground effect
    pub ground_effect_height: f64,
    pub ground_effect_max: f64,

    // Passive stability
    pub weathervane_gain: f64,
    pub pitch_trim_gain: f64,
    pub dihedral_gain: f64,
    /// Aerodynamic angular damping per body axis (roll, pitch, yaw)
    pub angular_damping: Vector3<f64>,

    // Asymmetric wing loss torques, per newton of remaining lift
    pub asym_roll_factor: f64,
    pub asym_yaw_factor: f64,

    /// Landing gear; None for belly-only airframes
    pub gear: Option<GearParams>,
}

impl FixedWingParams {
    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span * self.wing_span / self.wing_area
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlapParams {
    /// CL added at full deployment
    pub cl_bonus: f64,
    /// CD added at full deployment
    pub cd_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearParams {
    /// Wheel positions as body-frame offsets; index 0 is the steerable
    /// nose wheel
    pub wheels: Vec<Vector3<f64>>,
    /// Lateral velocity-nulling gain per wheel (N*s/m)
    pub tire_grip: f64,
    /// Longitudinal braking gain applied at idle throttle (N*s/m)
    pub brake_gain: f64,
    pub steer_angle_max_deg: f64,
    /// Height above ground below which the wheels can carry load (m)
    pub contact_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelicopterParams {
    /// Lift at full collective and full rotor spin (N)
    pub max_lift: f64,

    // Effective translational lift
    pub translational_lift_speed: f64,
    pub translational_lift_bonus: f64,

    /// Lift-vector tilt at full cyclic deflection (deg)
    pub cyclic_tilt_deg: f64,
    /// Rotor head height above the center of mass (m); tilting the lift
    /// vector at the head is what produces the cyclic control moments
    pub rotor_height: f64,

    /// Main-rotor reaction torque per newton of lift (m)
    pub reaction_torque_factor: f64,
    /// Pedal yaw torque at full deflection and full spin (N*m)
    pub pedal_authority: f64,
    pub yaw_damping: f64,
    pub pitch_roll_damping: f64,

    /// Quadratic airframe drag (N*s^2/m^2)
    pub drag_coefficient: f64,

    pub ground_effect_height: f64,
    pub ground_effect_max: f64,

    /// Righting torque toward vertical when cyclic is centered
    pub auto_level_gain: f64,

    /// First-order rotor spool time constant (s)
    pub spool_time: f64,

    pub hover: HoverHoldParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverHoldParams {
    /// Collective per meter of altitude error
    pub kp: f64,
    /// Collective per meter-second of accumulated error
    pub ki: f64,
    /// Collective per m/s of vertical speed
    pub kd: f64,
    /// Collective that roughly holds a hover
    pub base_collective: f64,
    /// Hold only engages above this height (m)
    pub min_height: f64,
    /// Clamp on the integral term
    pub integral_limit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarParams {
    /// Wheel positions as body-frame offsets: FL, FR, RL, RR
    pub wheels: [Vector3<f64>; 4],
    pub suspension: SuspensionParams,

    // Drivetrain
    pub drive_force: f64,
    pub brake_force: f64,
    pub max_speed: f64,
    pub max_reverse_speed: f64,

    // Steering
    pub steer_max_deg: f64,
    /// Steering slew rate toward a larger angle (rad/s)
    pub steer_blend_rate: f64,
    /// Steering slew rate back toward center (rad/s)
    pub steer_return_rate: f64,
    /// Torque per rad/s of yaw-rate error (N*m*s)
    pub yaw_match_gain: f64,

    // Traction
    /// Lateral velocity-nulling gain per wheel (N*s/m)
    pub lateral_grip: f64,
    /// Lateral speed beyond which the tire lets go (m/s)
    pub slip_threshold: f64,
    /// Grip divisor once sliding
    pub slip_grip_divisor: f64,

    // Always-on resistances
    pub rolling_resistance: f64,
    /// Quadratic air drag (N*s^2/m^2)
    pub air_drag: f64,

    // Abandoned-vehicle behavior
    pub parked_brake_gain: f64,
    pub parked_angular_damping: f64,
}

impl CarParams {
    /// Distance between front and rear axles (m)
    pub fn wheelbase(&self) -> f64 {
        (self.wheels[0].x - self.wheels[2].x).abs()
    }

    pub fn front_wheels() -> [VehiclePart; 2] {
        [VehiclePart::WheelFrontLeft, VehiclePart::WheelFrontRight]
    }

    pub fn rear_wheels() -> [VehiclePart; 2] {
        [VehiclePart::WheelRearLeft, VehiclePart::WheelRearRight]
    }

    pub fn wheel_part(index: usize) -> VehiclePart {
        match index {
            0 => VehiclePart::WheelFrontLeft,
            1 => VehiclePart::WheelFrontRight,
            2 => VehiclePart::WheelRearLeft,
            _ => VehiclePart::WheelRearRight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionParams {
    /// Spring stiffness (N/m)
    pub stiffness: f64,
    /// Compression-rate damping (N*s/m)
    pub damping: f64,
    /// Maximum compression (m)
    pub travel: f64,
    /// Probe rest length below the wheel mount (m)
    pub rest_length: f64,
}

/// A complete vehicle definition: identity, rigid-body properties, the
/// impact-damage threshold, and the kind-specific force-model parameters.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub mass: f64,
    /// Diagonal of the body-frame inertia tensor (kg*m^2)
    pub inertia: Vector3<f64>,
    /// Impact speed that destroys a part (m/s)
    pub impact_threshold: f64,
    pub params: VehicleParams,
}

impl VehicleConfig {
    pub fn kind(&self) -> VehicleKind {
        self.params.kind()
    }

    /// Fixed destructible-part order for the sequential break command
    pub fn damage_order(kind: VehicleKind) -> &'static [VehiclePart] {
        match kind {
            VehicleKind::FixedWing | VehicleKind::Jet => &[
                VehiclePart::LeftWing,
                VehiclePart::RightWing,
                VehiclePart::HorizontalTail,
                VehiclePart::VerticalTail,
                VehiclePart::LandingGear,
            ],
            VehicleKind::Helicopter => &[
                VehiclePart::TailRotor,
                VehiclePart::TailBoom,
                VehiclePart::MainRotor,
            ],
            VehicleKind::Car => &[
                VehiclePart::WheelFrontLeft,
                VehiclePart::WheelFrontRight,
                VehiclePart::WheelRearLeft,
                VehiclePart::WheelRearRight,
            ],
        }
    }

    pub fn damage_state(&self) -> DamageState {
        DamageState::new(Self::damage_order(self.kind()), self.impact_threshold)
    }

    /// Load a vehicle definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path)?;
        let config: VehicleConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.mass > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "{}: mass must be positive",
                self.name
            )));
        }
        if self.inertia.iter().any(|&i| i <= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "{}: inertia diagonal must be positive",
                self.name
            )));
        }
        if !(self.impact_threshold > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "{}: impact threshold must be positive",
                self.name
            )));
        }
        match &self.params {
            VehicleParams::FixedWing(p) | VehicleParams::Jet(p) => {
                if !(p.wing_area > 0.0) || !(p.wing_span > 0.0) {
                    return Err(SimError::InvalidConfig(format!(
                        "{}: wing geometry must be positive",
                        self.name
                    )));
                }
                if !(p.stall_angle_deg > 0.0 && p.stall_angle_deg < 45.0) {
                    return Err(SimError::InvalidConfig(format!(
                        "{}: stall angle out of range",
                        self.name
                    )));
                }
                if p.ref_control_speed <= p.min_control_speed {
                    return Err(SimError::InvalidConfig(format!(
                        "{}: control reference speed must exceed minimum",
                        self.name
                    )));
                }
            }
            VehicleParams::Helicopter(p) => {
                if !(p.max_lift > 0.0) || !(p.spool_time > 0.0) {
                    return Err(SimError::InvalidConfig(format!(
                        "{}: rotor parameters must be positive",
                        self.name
                    )));
                }
            }
            VehicleParams::Car(p) => {
                if !(p.suspension.stiffness > 0.0) || !(p.suspension.travel > 0.0) {
                    return Err(SimError::InvalidConfig(format!(
                        "{}: suspension parameters must be positive",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Light piston trainer
    pub fn trainer() -> Self {
        Self {
            name: "Trainer".to_string(),
            mass: 1100.0,
            inertia: Vector3::new(1800.0, 2200.0, 3000.0),
            impact_threshold: 12.0,
            params: VehicleParams::FixedWing(FixedWingParams {
                wing_area: 16.0,
                wing_span: 10.0,
                oswald_efficiency: 0.8,
                cl0: 0.35,
                cl_alpha: 2.8,
                cl_max: 1.5,
                stall_angle_deg: 15.0,
                stall_dropoff: 2.5,
                cd0: 0.030,
                form_drag_factor: 1.2,
                stall_drag_penalty: 0.8,
                flaps: Some(FlapParams {
                    cl_bonus: 0.5,
                    cd_penalty: 0.06,
                }),
                max_thrust: 5500.0,
                afterburner: None,
                pitch_power: 9000.0,
                roll_power: 7000.0,
                yaw_power: 4000.0,
                min_control_speed: 8.0,
                ref_control_speed: 55.0,
                stall_control_factor: 0.35,
                ground_effect_height: 12.0,
                ground_effect_max: 0.12,
                weathervane_gain: 2500.0,
                pitch_trim_gain: 4000.0,
                dihedral_gain: 3000.0,
                angular_damping: Vector3::new(2000.0, 3000.0, 2500.0),
                asym_roll_factor: 0.8,
                asym_yaw_factor: 0.25,
                gear: Some(GearParams {
                    wheels: vec![
                        Vector3::new(1.8, 0.0, -1.0),
                        Vector3::new(-0.6, 0.9, -1.0),
                        Vector3::new(-0.6, -0.9, -1.0),
                    ],
                    tire_grip: 3500.0,
                    brake_gain: 2800.0,
                    steer_angle_max_deg: 25.0,
                    contact_height: 2.5,
                }),
            }),
        }
    }

    /// Swept-wing strike jet
    pub fn strike() -> Self {
        Self {
            name: "Strike".to_string(),
            mass: 9500.0,
            inertia: Vector3::new(22_000.0, 48_000.0, 60_000.0),
            impact_threshold: 18.0,
            params: VehicleParams::Jet(FixedWingParams {
                wing_area: 28.0,
                wing_span: 9.5,
                oswald_efficiency: 0.7,
                cl0: 0.05,
                cl_alpha: 3.5,
                cl_max: 1.2,
                stall_angle_deg: 22.0,
                stall_dropoff: 2.0,
                cd0: 0.018,
                form_drag_factor: 1.5,
                stall_drag_penalty: 1.0,
                flaps: Some(FlapParams {
                    cl_bonus: 0.35,
                    cd_penalty: 0.05,
                }),
                max_thrust: 65_000.0,
                afterburner: Some(1.6),
                pitch_power: 90_000.0,
                roll_power: 60_000.0,
                yaw_power: 40_000.0,
                min_control_speed: 25.0,
                // Rudder authority saturates at this fixed reference speed;
                // retained tuning constant, not derived
                ref_control_speed: 100.0,
                stall_control_factor: 0.35,
                ground_effect_height: 10.0,
                ground_effect_max: 0.08,
                weathervane_gain: 18_000.0,
                pitch_trim_gain: 22_000.0,
                dihedral_gain: 12_000.0,
                angular_damping: Vector3::new(14_000.0, 26_000.0, 20_000.0),
                asym_roll_factor: 0.9,
                asym_yaw_factor: 0.3,
                gear: Some(GearParams {
                    wheels: vec![
                        Vector3::new(4.2, 0.0, -1.6),
                        Vector3::new(-1.1, 1.4, -1.6),
                        Vector3::new(-1.1, -1.4, -1.6),
                    ],
                    tire_grip: 16_000.0,
                    brake_gain: 14_000.0,
                    steer_angle_max_deg: 18.0,
                    contact_height: 3.0,
                }),
            }),
        }
    }

    /// Light scout helicopter
    pub fn scout() -> Self {
        Self {
            name: "Scout".to_string(),
            mass: 2200.0,
            inertia: Vector3::new(4200.0, 4600.0, 3000.0),
            impact_threshold: 8.0,
            params: VehicleParams::Helicopter(HelicopterParams {
                max_lift: 40_000.0,
                translational_lift_speed: 12.0,
                translational_lift_bonus: 0.18,
                cyclic_tilt_deg: 10.0,
                rotor_height: 1.5,
                reaction_torque_factor: 0.012,
                pedal_authority: 2600.0,
                yaw_damping: 1500.0,
                pitch_roll_damping: 2800.0,
                drag_coefficient: 1.9,
                ground_effect_height: 6.0,
                ground_effect_max: 0.25,
                auto_level_gain: 5000.0,
                spool_time: 8.0,
                hover: HoverHoldParams {
                    kp: 0.015,
                    ki: 0.004,
                    kd: 0.020,
                    base_collective: 0.55,
                    min_height: 3.0,
                    integral_limit: 0.2,
                },
            }),
        }
    }

    /// Utility runabout car
    pub fn runabout() -> Self {
        Self {
            name: "Runabout".to_string(),
            mass: 1400.0,
            inertia: Vector3::new(600.0, 2000.0, 2200.0),
            impact_threshold: 6.0,
            params: VehicleParams::Car(CarParams {
                wheels: [
                    Vector3::new(1.25, 0.75, -0.35),
                    Vector3::new(1.25, -0.75, -0.35),
                    Vector3::new(-1.25, 0.75, -0.35),
                    Vector3::new(-1.25, -0.75, -0.35),
                ],
                suspension: SuspensionParams {
                    stiffness: 42_000.0,
                    damping: 3800.0,
                    travel: 0.22,
                    rest_length: 0.45,
                },
                drive_force: 5200.0,
                brake_force: 9000.0,
                max_speed: 44.0,
                max_reverse_speed: 9.0,
                steer_max_deg: 32.0,
                steer_blend_rate: 1.8,
                steer_return_rate: 2.8,
                yaw_match_gain: 5200.0,
                lateral_grip: 2400.0,
                slip_threshold: 4.0,
                slip_grip_divisor: 3.0,
                rolling_resistance: 38.0,
                air_drag: 0.57,
                parked_brake_gain: 900.0,
                parked_angular_damping: 3000.0,
            }),
        }
    }
}
