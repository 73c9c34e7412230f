mod common;

use nalgebra::Vector3;

use airframe::components::{BreakCommand, ImpactEvent};
use airframe::{VehicleConfig, VehiclePart};
use common::TestAppBuilder;

#[test]
fn impact_event_flows_through_the_pipeline() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::trainer(), Vector3::new(0.0, 0.0, 500.0))
        .build();
    let vehicle = sim.vehicle(0);

    sim.app.world_mut().send_event(ImpactEvent {
        vehicle,
        speed: 15.0,
        part_hit: Some(VehiclePart::LeftWing),
    });
    sim.run_steps(1);

    let damage = sim.damage(vehicle);
    assert!(!damage.is_intact(VehiclePart::LeftWing));
    assert!(damage.is_intact(VehiclePart::RightWing));
}

#[test]
fn damage_is_monotonic_across_ticks() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::trainer(), Vector3::new(0.0, 0.0, 500.0))
        .build();
    let vehicle = sim.vehicle(0);
    sim.mount(vehicle);

    sim.app.world_mut().send_event(ImpactEvent {
        vehicle,
        speed: 20.0,
        part_hit: Some(VehiclePart::HorizontalTail),
    });
    sim.run_steps(1);
    assert!(!sim.damage(vehicle).is_intact(VehiclePart::HorizontalTail));

    // No sequence of further simulation brings it back
    for _ in 0..10 {
        sim.set_controls(vehicle, |controls| {
            controls.throttle = 0.5;
        });
        sim.run_steps(60);
        assert!(!sim.damage(vehicle).is_intact(VehiclePart::HorizontalTail));
    }

    // Only the full reset does
    sim.edit_damage(vehicle, |damage| damage.reset());
    assert!(sim.damage(vehicle).is_intact(VehiclePart::HorizontalTail));
}

#[test]
fn sequential_break_commands_walk_the_order() {
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::scout(), Vector3::new(0.0, 0.0, 100.0))
        .build();
    let vehicle = sim.vehicle(0);

    // Helicopter order: tail rotor, tail boom, main rotor
    sim.app.world_mut().send_event(BreakCommand { vehicle });
    sim.run_steps(1);
    let damage = sim.damage(vehicle);
    assert!(!damage.is_intact(VehiclePart::TailRotor));
    assert!(damage.is_intact(VehiclePart::TailBoom));
    assert!(damage.is_intact(VehiclePart::MainRotor));

    sim.app.world_mut().send_event(BreakCommand { vehicle });
    sim.app.world_mut().send_event(BreakCommand { vehicle });
    sim.run_steps(1);
    let damage = sim.damage(vehicle);
    assert!(!damage.is_intact(VehiclePart::TailBoom));
    assert!(!damage.is_intact(VehiclePart::MainRotor));
}

#[test]
fn damage_applies_between_ticks_not_within() {
    // The impact lands during the damage stage; the same tick's force
    // stage already sees the destroyed wing, and so does every later tick
    let mut sim = TestAppBuilder::new()
        .with_vehicle(VehicleConfig::trainer(), Vector3::new(0.0, 0.0, 1000.0))
        .build();
    let vehicle = sim.vehicle(0);
    sim.mount(vehicle);
    sim.edit_spatial(vehicle, |spatial| {
        spatial.velocity = Vector3::new(60.0, 0.0, 0.0);
    });

    sim.app.world_mut().send_event(ImpactEvent {
        vehicle,
        speed: 100.0,
        part_hit: Some(VehiclePart::LeftWing),
    });
    sim.run_steps(1);

    let damage = sim.damage(vehicle);
    // 100 m/s against a 12 m/s threshold: the named part plus extra rolls
    assert!(!damage.is_intact(VehiclePart::LeftWing));
    assert!(damage.intact_parts().len() < 4);
}
