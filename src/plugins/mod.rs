mod vehicle_sim;

pub use vehicle_sim::{SimSet, VehicleSimPlugin};
