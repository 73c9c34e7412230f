#![allow(dead_code)]

use bevy::prelude::*;
use nalgebra::Vector3;

use airframe::{
    spawn_vehicle, Atmosphere, ControlInputs, DamageState, Occupancy, SpatialComponent, Telemetry,
    VehicleConfig, VehicleSimPlugin,
};

/// Builder for a headless simulation app with vehicles pre-spawned
pub struct TestAppBuilder {
    vehicles: Vec<(VehicleConfig, Vector3<f64>)>,
    atmosphere: Option<Atmosphere>,
    master_seed: u64,
    timestep: f64,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            vehicles: Vec::new(),
            atmosphere: None,
            master_seed: 42,
            timestep: 1.0 / 120.0,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, config: VehicleConfig, position: Vector3<f64>) -> Self {
        self.vehicles.push((config, position));
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.master_seed = seed;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();
        app.add_plugins(VehicleSimPlugin {
            timestep: self.timestep,
            master_seed: self.master_seed,
        });
        if let Some(atmosphere) = self.atmosphere {
            app.insert_resource(atmosphere);
        }

        let mut entities = Vec::new();
        for (config, position) in &self.vehicles {
            entities.push(spawn_vehicle(app.world_mut(), config, *position));
        }

        TestApp { app, entities }
    }
}

pub struct TestApp {
    pub app: App,
    pub entities: Vec<Entity>,
}

impl TestApp {
    pub fn vehicle(&self, index: usize) -> Entity {
        self.entities[index]
    }

    /// Advance the fixed-rate simulation schedule by `n` ticks
    pub fn run_steps(&mut self, n: usize) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Put a pilot aboard; returns the pilot entity
    pub fn mount(&mut self, vehicle: Entity) -> Entity {
        let pilot = self.app.world_mut().spawn_empty().id();
        let mut occupancy = self.app.world_mut().get_mut::<Occupancy>(vehicle).unwrap();
        assert!(occupancy.mount(pilot), "vehicle already occupied");
        pilot
    }

    pub fn set_controls(&mut self, vehicle: Entity, f: impl FnOnce(&mut ControlInputs)) {
        let mut controls = self
            .app
            .world_mut()
            .get_mut::<ControlInputs>(vehicle)
            .unwrap();
        f(&mut controls);
    }

    pub fn edit_spatial(&mut self, vehicle: Entity, f: impl FnOnce(&mut SpatialComponent)) {
        let mut spatial = self
            .app
            .world_mut()
            .get_mut::<SpatialComponent>(vehicle)
            .unwrap();
        f(&mut spatial);
    }

    pub fn edit_damage(&mut self, vehicle: Entity, f: impl FnOnce(&mut DamageState)) {
        let mut damage = self
            .app
            .world_mut()
            .get_mut::<DamageState>(vehicle)
            .unwrap();
        f(&mut damage);
    }

    pub fn spatial(&self, vehicle: Entity) -> SpatialComponent {
        self.app.world().get::<SpatialComponent>(vehicle).unwrap().clone()
    }

    pub fn telemetry(&self, vehicle: Entity) -> Telemetry {
        self.app.world().get::<Telemetry>(vehicle).unwrap().clone()
    }

    pub fn damage(&self, vehicle: Entity) -> DamageState {
        self.app.world().get::<DamageState>(vehicle).unwrap().clone()
    }
}

/// Every kinematic quantity finite and inside the hard caps
pub fn assert_spatial_valid(spatial: &SpatialComponent) {
    assert!(
        spatial.position.iter().all(|v| v.is_finite()),
        "position not finite: {:?}",
        spatial.position
    );
    assert!(
        spatial.velocity.iter().all(|v| v.is_finite()),
        "velocity not finite: {:?}",
        spatial.velocity
    );
    assert!(
        spatial.angular_velocity.iter().all(|v| v.is_finite()),
        "angular velocity not finite: {:?}",
        spatial.angular_velocity
    );
    assert!(spatial
        .attitude
        .as_ref()
        .coords
        .iter()
        .all(|c| c.is_finite()));
}
