use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{
    Armament, ControlInputs, DebugForceLedger, GustState, HoverHold, Occupancy, PhysicsComponent,
    RotorState, SpatialComponent, SteeringState, Telemetry, VehicleConfig, VehicleKind,
};

/// Spawn a vehicle entity from a configuration, with the common
/// telemetry/damage contract plus the kind-specific state components.
pub fn spawn_vehicle(
    world: &mut World,
    config: &VehicleConfig,
    position: Vector3<f64>,
) -> Entity {
    let mut entity = world.spawn((
        SpatialComponent::at_position(position),
        PhysicsComponent::with_diagonal_inertia(config.mass, config.inertia),
        ControlInputs::default(),
        Telemetry::default(),
        config.damage_state(),
        config.params.clone(),
        config.clone(),
        Occupancy::default(),
        DebugForceLedger::default(),
    ));

    match config.kind() {
        VehicleKind::Helicopter => {
            entity.insert((
                RotorState::default(),
                HoverHold::default(),
                GustState::default(),
                Armament::new(600, 3.0, 850.0),
            ));
        }
        VehicleKind::FixedWing => {
            entity.insert((GustState::default(), Armament::new(400, 2.5, 880.0)));
        }
        VehicleKind::Jet => {
            entity.insert((GustState::default(), Armament::new(940, 2.0, 1050.0)));
        }
        VehicleKind::Car => {
            entity.insert(SteeringState::default());
        }
    }

    entity.id()
}
