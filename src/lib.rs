pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{
    Armament, ControlInputs, DamageState, DebugForceLedger, Occupancy, SpatialComponent, Telemetry,
    VehicleConfig, VehicleKind, VehicleParams, VehiclePart,
};
pub use plugins::{SimSet, VehicleSimPlugin};
pub use resources::{Atmosphere, GroundModel, OriginOffset, PhysicsConfig, RngBank, Wind};
pub use systems::spawn_vehicle;
pub use utils::errors::SimError;
