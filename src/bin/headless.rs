//! Headless demonstration loop: spawn a trainer at altitude, mount a pilot,
//! hold cruise power and log telemetry once per simulated second.

use bevy::prelude::*;
use nalgebra::Vector3;

use airframe::{
    spawn_vehicle, ControlInputs, Occupancy, Telemetry, VehicleConfig, VehicleSimPlugin,
};

const TICKS: usize = 120 * 30; // 30 simulated seconds at 120 Hz

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, bevy::log::LogPlugin::default()));
    app.add_plugins(VehicleSimPlugin::default());

    let config = VehicleConfig::trainer();
    let vehicle = spawn_vehicle(
        app.world_mut(),
        &config,
        Vector3::new(0.0, 0.0, 800.0),
    );

    let pilot = app.world_mut().spawn_empty().id();
    let mut occupancy = app.world_mut().get_mut::<Occupancy>(vehicle).unwrap();
    occupancy.mount(pilot);

    {
        let mut spatial = app
            .world_mut()
            .get_mut::<airframe::SpatialComponent>(vehicle)
            .unwrap();
        spatial.velocity = Vector3::new(55.0, 0.0, 0.0);
    }

    for tick in 0..TICKS {
        {
            let mut controls = app.world_mut().get_mut::<ControlInputs>(vehicle).unwrap();
            controls.throttle = 0.7;
            controls.pitch = 0.0;
        }
        app.world_mut().run_schedule(FixedUpdate);

        if tick % 120 == 0 {
            let telemetry = app.world().get::<Telemetry>(vehicle).unwrap();
            info!(
                "t={:>3}s  ias {:6.1} m/s  alt {:6.0} m  vs {:5.1} m/s  hdg {:5.1}  aoa {:4.1}  g {:4.2}",
                tick / 120,
                telemetry.airspeed,
                telemetry.altitude_msl,
                telemetry.vertical_speed,
                telemetry.heading_deg,
                telemetry.aoa_deg,
                telemetry.g_force
            );
        }
    }
}
