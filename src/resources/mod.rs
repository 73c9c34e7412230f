mod environment;
mod physics;
mod rng;

pub use environment::{Atmosphere, AtmosphereModel, GroundModel, TurbulenceConfig, Wind};
pub use physics::{OriginOffset, PhysicsConfig, RebaseConfig};
pub use rng::RngBank;
