mod armament;
mod controls;
mod damage;
mod ledger;
mod physics;
mod spatial;
mod telemetry;
mod vehicle;

pub use armament::Armament;
pub use controls::ControlInputs;
pub use damage::{BreakCommand, DamageState, ImpactEvent, VehiclePart};
pub use ledger::{DebugForceLedger, LedgerEntry};
pub use physics::{Force, ForceCategory, Moment, PhysicsComponent, ReferenceFrame};
pub use spatial::SpatialComponent;
pub use telemetry::Telemetry;
pub use vehicle::{
    CarParams, FixedWingParams, FlapParams, GearParams, GustState, HelicopterParams, HoverHold,
    HoverHoldParams, Occupancy, RotorState, SteeringState, SuspensionParams, VehicleConfig,
    VehicleKind, VehicleParams,
};
