mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use nalgebra::Vector3;

use airframe::systems::OriginShifted;
use airframe::{OriginOffset, SpatialComponent, VehicleConfig};
use common::TestAppBuilder;

#[test]
fn long_cruise_triggers_a_rebase_and_preserves_geometry() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::strike(), Vector3::new(0.0, 0.0, 3000.0))
        .build();
    let vehicle = sim.vehicle(0);
    sim.mount(vehicle);

    // A static world anchor nearby, and the vehicle teleported to the edge
    // of the rebase envelope
    let anchor = sim
        .app
        .world_mut()
        .spawn(SpatialComponent::at_position(Vector3::new(
            3990.0, 100.0, 0.0,
        )))
        .id();
    sim.edit_spatial(vehicle, |spatial| {
        spatial.position = Vector3::new(3990.0, 0.0, 3000.0);
        spatial.velocity = Vector3::new(250.0, 0.0, 0.0);
        spatial.angular_velocity = Vector3::new(0.0, 0.0, 0.1);
    });

    let before_vehicle = sim.spatial(vehicle);
    let before_anchor = sim
        .app
        .world()
        .get::<SpatialComponent>(anchor)
        .unwrap()
        .clone();
    let before_relative = before_anchor.position - before_vehicle.position;

    // A few ticks at 250 m/s pushes it over the 4 km threshold
    sim.run_steps(30);

    let origin = sim.app.world().resource::<OriginOffset>();
    assert_eq!(origin.rebase_count, 1, "exactly one rebase expected");
    let accumulated = origin.accumulated;
    assert!(accumulated.x > 3990.0);
    assert_relative_eq!(accumulated.z, 0.0, epsilon = 1e-12);

    let after_vehicle = sim.spatial(vehicle);
    let after_anchor = sim
        .app
        .world()
        .get::<SpatialComponent>(anchor)
        .unwrap()
        .clone();

    // Back near the origin, velocities untouched by the shift
    assert!(after_vehicle.position.x.abs() < 300.0);
    assert_relative_eq!(after_vehicle.velocity.x, 250.0, epsilon = 30.0);
    assert_relative_eq!(after_vehicle.angular_velocity.z, 0.1, epsilon = 0.05);

    // The anchor moved by the same offset: relative geometry preserved up
    // to the vehicle's own motion during those ticks
    let after_relative = after_anchor.position - after_vehicle.position;
    let flown = before_relative - after_relative;
    // Only the vehicle's own displacement separates the two measurements
    assert_relative_eq!(flown.y, 0.0, epsilon = 20.0);
    assert!(flown.x.abs() < 120.0, "roughly 30 ticks of cruise");
}

#[test]
fn rebase_broadcasts_the_offset() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::strike(), Vector3::new(0.0, 0.0, 3000.0))
        .build();
    let vehicle = sim.vehicle(0);
    sim.mount(vehicle);
    sim.edit_spatial(vehicle, |spatial| {
        spatial.position = Vector3::new(5000.0, 1200.0, 3000.0);
    });

    sim.run_steps(1);

    let events = sim.app.world().resource::<Events<OriginShifted>>();
    let mut cursor = events.get_cursor();
    let shifts: Vec<_> = cursor.read(events).collect();
    assert_eq!(shifts.len(), 1);
    assert_relative_eq!(shifts[0].offset.x, 5000.0, epsilon = 30.0);
    assert_relative_eq!(shifts[0].offset.y, 1200.0, epsilon = 30.0);
    assert_relative_eq!(shifts[0].offset.z, 0.0, epsilon = 1e-12);

    let origin = sim.app.world().resource::<OriginOffset>();
    assert_eq!(origin.rebase_count, 1);
}

#[test]
fn pairwise_distances_survive_a_rebase_exactly() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::trainer(), Vector3::new(0.0, 0.0, 1000.0))
        .with_vehicle(VehicleConfig::runabout(), Vector3::new(0.0, 0.0, 0.7))
        .build();
    let flyer = sim.vehicle(0);
    let car = sim.vehicle(1);
    sim.mount(flyer);

    sim.edit_spatial(flyer, |spatial| {
        spatial.position = Vector3::new(7000.0, -2000.0, 1000.0);
    });
    sim.edit_spatial(car, |spatial| {
        spatial.position = Vector3::new(6800.0, -2100.0, 0.7);
        spatial.velocity = Vector3::zeros();
    });

    let before = {
        let a = sim.spatial(flyer).position;
        let b = sim.spatial(car).position;
        a - b
    };

    sim.run_steps(1);

    // Both moved by the same offset in the same tick; the car is parked so
    // only the flyer's single-tick motion shows up in x
    let a = sim.spatial(flyer).position;
    let b = sim.spatial(car).position;
    let after = a - b;
    assert_relative_eq!(after.y, before.y, epsilon = 0.5);
    assert_relative_eq!(after.x, before.x, epsilon = 0.5);
    assert!(a.x.abs() < 10.0, "flyer recentered");
}
