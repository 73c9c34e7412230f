mod config;
mod state;

pub use config::{
    CarParams, FixedWingParams, FlapParams, GearParams, HelicopterParams, HoverHoldParams,
    SuspensionParams, VehicleConfig, VehicleKind, VehicleParams,
};
pub use state::{GustState, HoverHold, Occupancy, RotorState, SteeringState};
