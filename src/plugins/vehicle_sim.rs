use bevy::prelude::*;

use crate::components::{BreakCommand, ImpactEvent};
use crate::resources::{
    Atmosphere, GroundModel, OriginOffset, PhysicsConfig, RebaseConfig, RngBank, TurbulenceConfig,
    Wind,
};
use crate::systems::{
    aggregate_forces_system, car_force_system, damage_intake_system, fixed_wing_force_system,
    floating_origin_system, helicopter_force_system, physics_integrator_system,
    release_unoccupied_controls_system, sanitize_system, telemetry_system, turbulence_system,
    OriginShifted,
};

/// Per-tick simulation stages, in strict order. Damage intake runs before
/// force computation so a flag mutated by an event is consistent for every
/// force model this tick; the rebase runs alone at the step boundary.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum SimSet {
    Sanitize,
    Telemetry,
    Damage,
    Forces,
    Aggregate,
    Integrate,
    Rebase,
}

pub struct VehicleSimPlugin {
    pub timestep: f64,
    pub master_seed: u64,
}

impl Default for VehicleSimPlugin {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0, // 120 Hz physics rate
            master_seed: 0,
        }
    }
}

impl Plugin for VehicleSimPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ImpactEvent>()
            .add_event::<BreakCommand>()
            .add_event::<OriginShifted>();

        app.insert_resource(PhysicsConfig {
            timestep: self.timestep,
            ..Default::default()
        })
        .insert_resource(RngBank::new(self.master_seed))
        .init_resource::<Atmosphere>()
        .init_resource::<Wind>()
        .init_resource::<GroundModel>()
        .init_resource::<TurbulenceConfig>()
        .init_resource::<RebaseConfig>()
        .init_resource::<OriginOffset>();

        app.insert_resource(Time::<Fixed>::from_seconds(self.timestep));

        app.configure_sets(
            FixedUpdate,
            (
                SimSet::Sanitize,
                SimSet::Telemetry,
                SimSet::Damage,
                SimSet::Forces,
                SimSet::Aggregate,
                SimSet::Integrate,
                SimSet::Rebase,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (sanitize_system, release_unoccupied_controls_system).in_set(SimSet::Sanitize),
                telemetry_system.in_set(SimSet::Telemetry),
                damage_intake_system.in_set(SimSet::Damage),
                (
                    helicopter_force_system,
                    fixed_wing_force_system,
                    car_force_system,
                    turbulence_system,
                )
                    .chain()
                    .in_set(SimSet::Forces),
                aggregate_forces_system.in_set(SimSet::Aggregate),
                physics_integrator_system.in_set(SimSet::Integrate),
                floating_origin_system.in_set(SimSet::Rebase),
            ),
        );
    }
}
