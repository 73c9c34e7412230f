mod damage;
mod fixed_wing;
mod ground;
mod helicopter;
pub mod physics;
mod rebase;
mod sanitize;
mod spawn;
mod telemetry;
mod turbulence;

pub use damage::damage_intake_system;
pub use fixed_wing::{
    aero_state, control_effectiveness, fixed_wing_force_system, ground_effect_bonus,
    lift_coefficient, AeroState,
};
pub use ground::car_force_system;
pub use helicopter::{collective_command, helicopter_force_system};
pub use physics::{aggregate_forces_system, integrate_state, physics_integrator_system};
pub use rebase::{floating_origin_system, OriginShifted};
pub use sanitize::{release_unoccupied_controls_system, sanitize_kinematics, sanitize_system};
pub use spawn::spawn_vehicle;
pub use telemetry::{telemetry_system, update_telemetry};
pub use turbulence::turbulence_system;
